//! # Corps SOAP polymorphes
//!
//! Une même enveloppe de réponse peut porter des corps de formes différentes
//! selon la transaction invoquée. Chaque variante implémente [`SoapBody`] :
//! elle absorbe son contenu typé et sait dire, à partir de ce seul contenu,
//! si la transaction a échoué.
//!
//! - [`GenericResponseBody`] : élément XML opaque, ne signale jamais d'erreur
//! - [`QueryResponseBody`] : `AdhocQueryResponse`, ne signale jamais d'erreur
//! - [`RetrieveDocumentBody`] : `RetrieveDocumentSetResponse`, en erreur
//!   quand le statut du registre contient [`FAILURE_MARKER`]
//!
//! [`ResponseBody`] regroupe ces variantes en un ensemble fermé ; la couche
//! transport choisit la variante (via [`BodyKind`]) avant le décodage.

mod generic;
mod query;
mod request;
mod retrieve;

use std::fmt;

use xmltree::Element;

use crate::registry::{AdhocQueryResponse, RegistryError, RetrieveDocumentSetResponse};

pub use generic::GenericResponseBody;
pub use query::QueryResponseBody;
pub use request::{AdhocQueryBody, RequestBody, RetrieveDocumentSetBody};
pub use retrieve::{FAILURE_MARKER, RetrieveDocumentBody};

/// Capacités communes à tous les corps SOAP
pub trait SoapBody {
    /// Forme du contenu absorbé par ce corps
    type Content;

    /// Remplace le contenu du corps
    fn set_content(&mut self, content: Self::Content);

    /// Examine le contenu et retourne l'échec qu'il signale, le cas échéant.
    ///
    /// Ne modifie rien, et un contenu absent ou partiel ne signale aucune
    /// erreur.
    fn error_from_fault(&self) -> Option<BodyFault>;

    fn has_error(&self) -> bool {
        self.error_from_fault().is_some()
    }
}

/// Échec signalé par le contenu d'une réponse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyFault {
    /// Statut tel que fourni par le registre
    pub status: String,

    /// Erreurs détaillées, si le registre en a fourni
    pub errors: Vec<RegistryError>,
}

impl fmt::Display for BodyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status)
    }
}

impl std::error::Error for BodyFault {}

/// Variantes de corps de réponse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Generic,
    Query,
    Retrieve,
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyKind::Generic => write!(f, "generic"),
            BodyKind::Query => write!(f, "stored-query"),
            BodyKind::Retrieve => write!(f, "document-retrieval"),
        }
    }
}

/// Contenu typé pouvant être installé dans un [`ResponseBody`]
#[derive(Debug, Clone, PartialEq)]
pub enum BodyContent {
    Generic(Element),
    Query(AdhocQueryResponse),
    Retrieve(RetrieveDocumentSetResponse),
}

impl BodyContent {
    pub fn kind(&self) -> BodyKind {
        match self {
            BodyContent::Generic(_) => BodyKind::Generic,
            BodyContent::Query(_) => BodyKind::Query,
            BodyContent::Retrieve(_) => BodyKind::Retrieve,
        }
    }
}

/// Corps de réponse : exactement une variante active
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Generic(GenericResponseBody),
    Query(QueryResponseBody),
    Retrieve(RetrieveDocumentBody),
}

impl ResponseBody {
    /// Corps vide de la variante `kind`
    pub fn new(kind: BodyKind) -> Self {
        match kind {
            BodyKind::Generic => ResponseBody::Generic(GenericResponseBody::default()),
            BodyKind::Query => ResponseBody::Query(QueryResponseBody::default()),
            BodyKind::Retrieve => ResponseBody::Retrieve(RetrieveDocumentBody::default()),
        }
    }

    pub fn kind(&self) -> BodyKind {
        match self {
            ResponseBody::Generic(_) => BodyKind::Generic,
            ResponseBody::Query(_) => BodyKind::Query,
            ResponseBody::Retrieve(_) => BodyKind::Retrieve,
        }
    }

    pub fn as_generic(&self) -> Option<&GenericResponseBody> {
        match self {
            ResponseBody::Generic(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_query(&self) -> Option<&QueryResponseBody> {
        match self {
            ResponseBody::Query(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_retrieve(&self) -> Option<&RetrieveDocumentBody> {
        match self {
            ResponseBody::Retrieve(body) => Some(body),
            _ => None,
        }
    }

    pub fn as_retrieve_mut(&mut self) -> Option<&mut RetrieveDocumentBody> {
        match self {
            ResponseBody::Retrieve(body) => Some(body),
            _ => None,
        }
    }

    pub fn into_generic(self) -> Option<Element> {
        match self {
            ResponseBody::Generic(body) => body.into_content(),
            _ => None,
        }
    }

    pub fn into_query(self) -> Option<AdhocQueryResponse> {
        match self {
            ResponseBody::Query(body) => body.into_content(),
            _ => None,
        }
    }

    pub fn into_retrieve(self) -> Option<RetrieveDocumentSetResponse> {
        match self {
            ResponseBody::Retrieve(body) => body.into_content(),
            _ => None,
        }
    }
}

impl SoapBody for ResponseBody {
    type Content = BodyContent;

    /// Installe `content` dans la variante active.
    ///
    /// # Panics
    ///
    /// Panique si la forme de `content` ne correspond pas à la variante
    /// active : c'est une erreur de programmation de l'appelant.
    fn set_content(&mut self, content: BodyContent) {
        match (self, content) {
            (ResponseBody::Generic(body), BodyContent::Generic(c)) => body.set_content(c),
            (ResponseBody::Query(body), BodyContent::Query(c)) => body.set_content(c),
            (ResponseBody::Retrieve(body), BodyContent::Retrieve(c)) => body.set_content(c),
            (body, content) => panic!(
                "cannot set {} content into a {} body",
                content.kind(),
                body.kind()
            ),
        }
    }

    fn error_from_fault(&self) -> Option<BodyFault> {
        match self {
            ResponseBody::Generic(body) => body.error_from_fault(),
            ResponseBody::Query(body) => body.error_from_fault(),
            ResponseBody::Retrieve(body) => body.error_from_fault(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::status;

    #[test]
    fn test_new_body_has_requested_kind() {
        for kind in [BodyKind::Generic, BodyKind::Query, BodyKind::Retrieve] {
            let body = ResponseBody::new(kind);
            assert_eq!(body.kind(), kind);
            assert!(!body.has_error());
        }
    }

    #[test]
    fn test_dispatches_fault_detection_to_variant() {
        let mut body = ResponseBody::new(BodyKind::Retrieve);
        body.set_content(BodyContent::Retrieve(RetrieveDocumentSetResponse::new(
            status::FAILURE,
        )));

        let fault = body.error_from_fault().unwrap();
        assert_eq!(fault.status, status::FAILURE);
        assert_eq!(fault.to_string(), status::FAILURE);
        assert!(body.has_error());
    }

    #[test]
    fn test_set_content_replaces_previous() {
        let mut body = ResponseBody::new(BodyKind::Query);
        body.set_content(BodyContent::Query(AdhocQueryResponse::new(status::FAILURE)));
        body.set_content(BodyContent::Query(AdhocQueryResponse::new(status::SUCCESS)));

        assert_eq!(
            body.as_query().and_then(|b| b.content()).map(|c| c.status.as_str()),
            Some(status::SUCCESS)
        );
    }

    #[test]
    #[should_panic(expected = "cannot set stored-query content into a document-retrieval body")]
    fn test_shape_mismatch_panics() {
        let mut body = ResponseBody::new(BodyKind::Retrieve);
        body.set_content(BodyContent::Query(AdhocQueryResponse::new(status::SUCCESS)));
    }

    #[test]
    fn test_into_wrong_variant_is_none() {
        let body = ResponseBody::new(BodyKind::Query);
        assert_eq!(body.clone().into_retrieve(), None);
        assert_eq!(body.into_query(), None);
    }
}
