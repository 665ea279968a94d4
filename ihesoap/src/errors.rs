use thiserror::Error;

use crate::body::BodyFault;
use crate::fault::SoapFault;

/// Erreurs de la couche SOAP
#[derive(Error, Debug)]
pub enum SoapError {
    #[error("XML serialization error: {0}")]
    Serialize(#[from] quick_xml::se::SeError),

    #[error("XML deserialization error: {0}")]
    Deserialize(#[from] quick_xml::de::DeError),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] xmltree::ParseError),

    #[error("XML write error: {0}")]
    XmlWrite(#[from] xmltree::Error),

    #[error("Invalid UTF-8 in XML output: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Missing SOAP Envelope")]
    MissingEnvelope,

    #[error("Unexpected SOAP envelope namespace: {0:?}")]
    EnvelopeNamespace(String),

    #[error("Missing SOAP Body")]
    MissingBody,

    #[error("SOAP fault {}: {}", .0.code, .0.reason)]
    Fault(SoapFault),

    #[error("Registry failure: {0}")]
    Registry(BodyFault),

    #[error("Response to {0} carries no content")]
    EmptyResponse(String),

    #[error("Transport error: {0:#}")]
    Transport(#[source] anyhow::Error),
}

impl SoapError {
    /// Retourne le statut fourni par le registre si l'erreur en porte un
    pub fn registry_status(&self) -> Option<&str> {
        match self {
            SoapError::Registry(fault) => Some(&fault.status),
            _ => None,
        }
    }
}
