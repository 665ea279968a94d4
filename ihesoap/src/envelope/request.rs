use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::with_declaration;
use crate::body::RequestBody;
use crate::errors::SoapError;
use crate::header::RequestHeader;
use crate::namespaces::{NamespaceDecls, NamespaceTable};

/// Enveloppe d'une requête sortante.
///
/// La racine déclare tous les préfixes utilisés par l'en-tête et le corps ;
/// l'en-tête précède toujours le corps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "soap:Envelope")]
pub struct RequestEnvelope<B> {
    #[serde(rename = "@xmlns:soap", skip_serializing_if = "Option::is_none")]
    xmlns_soap: Option<String>,

    #[serde(rename = "@xmlns:wsa", skip_serializing_if = "Option::is_none")]
    xmlns_wsa: Option<String>,

    #[serde(rename = "@xmlns:wsse", skip_serializing_if = "Option::is_none")]
    xmlns_wsse: Option<String>,

    #[serde(rename = "@xmlns:saml", skip_serializing_if = "Option::is_none")]
    xmlns_saml: Option<String>,

    #[serde(rename = "@xmlns:ds", skip_serializing_if = "Option::is_none")]
    xmlns_ds: Option<String>,

    #[serde(rename = "@xmlns:query", skip_serializing_if = "Option::is_none")]
    xmlns_query: Option<String>,

    #[serde(rename = "@xmlns:rim", skip_serializing_if = "Option::is_none")]
    xmlns_rim: Option<String>,

    #[serde(rename = "@xmlns:xdsb", skip_serializing_if = "Option::is_none")]
    xmlns_xdsb: Option<String>,

    #[serde(rename = "soap:Header", alias = "Header")]
    header: RequestHeader,

    #[serde(rename = "soap:Body", alias = "Body")]
    body: B,
}

impl<B> RequestEnvelope<B> {
    /// Crée une enveloppe avec des déclarations explicites
    pub fn new(namespaces: NamespaceDecls, header: RequestHeader, body: B) -> Self {
        Self {
            xmlns_soap: namespaces.soap,
            xmlns_wsa: namespaces.wsa,
            xmlns_wsse: namespaces.wsse,
            xmlns_saml: namespaces.saml,
            xmlns_ds: namespaces.ds,
            xmlns_query: namespaces.query,
            xmlns_rim: namespaces.rim,
            xmlns_xdsb: namespaces.xdsb,
            header,
            body,
        }
    }

    pub fn namespaces(&self) -> NamespaceDecls {
        NamespaceDecls {
            soap: self.xmlns_soap.clone(),
            wsa: self.xmlns_wsa.clone(),
            wsse: self.xmlns_wsse.clone(),
            saml: self.xmlns_saml.clone(),
            ds: self.xmlns_ds.clone(),
            query: self.xmlns_query.clone(),
            rim: self.xmlns_rim.clone(),
            xdsb: self.xmlns_xdsb.clone(),
        }
    }

    pub fn header(&self) -> &RequestHeader {
        &self.header
    }

    pub fn set_header(&mut self, header: RequestHeader) {
        self.header = header;
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }

    /// Remplace le corps ; l'ancien corps est abandonné
    pub fn set_body(&mut self, body: B) {
        self.body = body;
    }

    pub fn into_body(self) -> B {
        self.body
    }
}

impl<B: RequestBody> RequestEnvelope<B> {
    /// Crée l'enveloppe en déclarant les namespaces de la transaction du corps
    pub fn for_body(table: &NamespaceTable, header: RequestHeader, body: B) -> Self {
        Self::new(table.declarations(B::TRANSACTION), header, body)
    }
}

impl<B: Serialize> RequestEnvelope<B> {
    /// Sérialise l'enveloppe en document XML complet
    pub fn to_xml(&self) -> Result<String, SoapError> {
        Ok(with_declaration(quick_xml::se::to_string(self)?))
    }
}

impl<B: DeserializeOwned> RequestEnvelope<B> {
    /// Relit une enveloppe de requête (serveurs, doublures de test)
    pub fn from_xml(xml: &str) -> Result<Self, SoapError> {
        Ok(quick_xml::de::from_str(xml)?)
    }
}
