//! SOAP Faults
//!
//! Les variantes de corps qui ne signalent pas d'erreur d'après leur contenu
//! reposent sur ce chemin : un `Fault` dans le Body est détecté avant tout
//! décodage typé.

use std::io::BufReader;

use xmltree::{Element, XMLNode};

use crate::errors::SoapError;
use crate::namespaces::ns;

pub const SENDER: &str = "SOAP-ENV:Sender";
pub const RECEIVER: &str = "SOAP-ENV:Receiver";

/// Erreur SOAP (Fault), version 1.2 ou 1.1
#[derive(Debug, Clone, PartialEq)]
pub struct SoapFault {
    /// Code d'erreur (ex: "SOAP-ENV:Sender")
    pub code: String,

    /// Sous-code optionnel
    pub subcode: Option<String>,

    /// Description de l'erreur
    pub reason: String,

    /// Détail brut, si présent
    pub detail: Option<Element>,
}

impl SoapFault {
    pub fn new(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            subcode: None,
            reason: reason.into(),
            detail: None,
        }
    }

    pub fn with_subcode(mut self, subcode: impl Into<String>) -> Self {
        self.subcode = Some(subcode.into());
        self
    }

    /// Cherche un Fault dans le Body d'un document SOAP
    pub fn detect(xml: &str) -> Result<Option<SoapFault>, SoapError> {
        let root = Element::parse(BufReader::new(xml.as_bytes()))?;
        Ok(Self::from_envelope(&root))
    }

    /// Cherche un Fault dans le Body d'une enveloppe déjà analysée
    pub fn from_envelope(envelope: &Element) -> Option<SoapFault> {
        envelope
            .get_child("Body")
            .and_then(|body| body.get_child("Fault"))
            .map(Self::from_element)
    }

    /// Construit un fault depuis un élément `Fault`
    pub fn from_element(fault: &Element) -> SoapFault {
        // SOAP 1.2 : Code/Value, Code/Subcode/Value, Reason/Text
        if let Some(code) = fault.get_child("Code") {
            let subcode = code
                .get_child("Subcode")
                .and_then(|s| child_text(s, "Value"));
            let reason = fault
                .get_child("Reason")
                .and_then(|r| child_text(r, "Text"))
                .unwrap_or_default();

            return SoapFault {
                code: child_text(code, "Value").unwrap_or_default(),
                subcode,
                reason,
                detail: fault.get_child("Detail").cloned(),
            };
        }

        // SOAP 1.1 : faultcode, faultstring, detail
        SoapFault {
            code: child_text(fault, "faultcode").unwrap_or_default(),
            subcode: None,
            reason: child_text(fault, "faultstring").unwrap_or_default(),
            detail: fault.get_child("detail").cloned(),
        }
    }

    /// Sérialise le fault dans une enveloppe SOAP 1.2 complète
    pub fn to_xml(&self) -> Result<String, SoapError> {
        let mut fault = Element::new("SOAP-ENV:Fault");

        // Code
        let mut code = Element::new("SOAP-ENV:Code");
        code.children
            .push(XMLNode::Element(text_element("SOAP-ENV:Value", &self.code)));
        if let Some(subcode) = &self.subcode {
            let mut sub = Element::new("SOAP-ENV:Subcode");
            sub.children
                .push(XMLNode::Element(text_element("SOAP-ENV:Value", subcode)));
            code.children.push(XMLNode::Element(sub));
        }
        fault.children.push(XMLNode::Element(code));

        // Reason
        let mut reason = Element::new("SOAP-ENV:Reason");
        reason
            .children
            .push(XMLNode::Element(text_element("SOAP-ENV:Text", &self.reason)));
        fault.children.push(XMLNode::Element(reason));

        // Detail
        if let Some(detail) = &self.detail {
            let mut wrapper = Element::new("SOAP-ENV:Detail");
            wrapper.children.extend(detail.children.iter().cloned());
            fault.children.push(XMLNode::Element(wrapper));
        }

        let mut body = Element::new("SOAP-ENV:Body");
        body.children.push(XMLNode::Element(fault));

        let mut envelope = Element::new("SOAP-ENV:Envelope");
        envelope
            .attributes
            .insert("xmlns:SOAP-ENV".to_string(), ns::SOAP_ENVELOPE.to_string());
        envelope.children.push(XMLNode::Element(body));

        let mut buf = Vec::new();
        let config = xmltree::EmitterConfig::new()
            .perform_indent(true)
            .indent_string("  ");
        envelope.write_with_config(&mut buf, config)?;

        Ok(String::from_utf8(buf)?)
    }
}

fn text_element(name: &str, text: &str) -> Element {
    let mut element = Element::new(name);
    element.children.push(XMLNode::Text(text.to_string()));
    element
}

fn child_text(element: &Element, name: &str) -> Option<String> {
    element
        .get_child(name)
        .and_then(|c| c.get_text())
        .map(|t| t.trim().to_string())
}
