//! Enveloppes SOAP de requête et de réponse
//!
//! - [`RequestEnvelope`] : déclarations de namespaces, en-tête puis corps
//! - [`ResponseEnvelope`] : en-tête optionnel, corps polymorphe, pièces jointes
//!
//! Les enveloppes n'effectuent aucune entrée/sortie : elles se convertissent
//! en texte XML et inversement, l'échange réseau restant à la charge d'un
//! [`crate::Transport`].

mod request;
mod response;

pub use request::RequestEnvelope;
pub use response::ResponseEnvelope;

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

fn with_declaration(xml: String) -> String {
    let mut document = String::with_capacity(XML_DECLARATION.len() + xml.len());
    document.push_str(XML_DECLARATION);
    document.push_str(&xml);
    document
}
