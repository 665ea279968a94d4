//! ITI-43 Retrieve Document Set

use serde::{Deserialize, Serialize};

use super::{RegistryErrorList, status};
use crate::attachment::{Binary, CID_PREFIX};
use crate::namespaces::ns;

/// Requête `RetrieveDocumentSetRequest`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieveDocumentSetRequest {
    #[serde(rename = "xdsb:DocumentRequest", alias = "DocumentRequest", default)]
    pub document_requests: Vec<DocumentRequest>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRequest {
    #[serde(
        rename = "xdsb:HomeCommunityId",
        alias = "HomeCommunityId",
        skip_serializing_if = "Option::is_none"
    )]
    pub home_community_id: Option<String>,

    #[serde(rename = "xdsb:RepositoryUniqueId", alias = "RepositoryUniqueId")]
    pub repository_unique_id: String,

    #[serde(rename = "xdsb:DocumentUniqueId", alias = "DocumentUniqueId")]
    pub document_unique_id: String,
}

impl RetrieveDocumentSetRequest {
    /// Requête pour un seul document
    pub fn single(repository_unique_id: &str, document_unique_id: &str) -> Self {
        Self::default().with_document(None, repository_unique_id, document_unique_id)
    }

    pub fn with_document(
        mut self,
        home_community_id: Option<&str>,
        repository_unique_id: &str,
        document_unique_id: &str,
    ) -> Self {
        self.document_requests.push(DocumentRequest {
            home_community_id: home_community_id.map(str::to_string),
            repository_unique_id: repository_unique_id.to_string(),
            document_unique_id: document_unique_id.to_string(),
        });
        self
    }
}

/// Réponse `RetrieveDocumentSetResponse`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieveDocumentSetResponse {
    #[serde(rename = "@xmlns:xdsb", skip_serializing_if = "Option::is_none")]
    pub xmlns_xdsb: Option<String>,

    #[serde(rename = "@xmlns:rs", skip_serializing_if = "Option::is_none")]
    pub xmlns_rs: Option<String>,

    #[serde(rename = "rs:RegistryResponse", alias = "RegistryResponse", default)]
    pub registry_response: RegistryResponse,

    #[serde(rename = "xdsb:DocumentResponse", alias = "DocumentResponse", default)]
    pub document_response: Vec<DocumentResponse>,
}

/// Statut global de la transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryResponse {
    #[serde(rename = "@status", default)]
    pub status: String,

    #[serde(
        rename = "rs:RegistryErrorList",
        alias = "RegistryErrorList",
        skip_serializing_if = "Option::is_none"
    )]
    pub registry_error_list: Option<RegistryErrorList>,
}

/// Document retourné
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResponse {
    #[serde(
        rename = "xdsb:HomeCommunityId",
        alias = "HomeCommunityId",
        skip_serializing_if = "Option::is_none"
    )]
    pub home_community_id: Option<String>,

    #[serde(
        rename = "xdsb:RepositoryUniqueId",
        alias = "RepositoryUniqueId",
        skip_serializing_if = "Option::is_none"
    )]
    pub repository_unique_id: Option<String>,

    #[serde(
        rename = "xdsb:DocumentUniqueId",
        alias = "DocumentUniqueId",
        skip_serializing_if = "Option::is_none"
    )]
    pub document_unique_id: Option<String>,

    #[serde(rename = "xdsb:mimeType", alias = "mimeType", default)]
    pub mime_type: String,

    #[serde(
        rename = "xdsb:Document",
        alias = "Document",
        skip_serializing_if = "Option::is_none"
    )]
    pub document: Option<Document>,
}

/// Contenu d'un document : octets en ligne ou référence XOP vers une pièce jointe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(rename = "$text", default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<Binary>,

    #[serde(
        rename = "xop:Include",
        alias = "Include",
        skip_serializing_if = "Option::is_none"
    )]
    pub include: Option<XopInclude>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct XopInclude {
    #[serde(rename = "@xmlns:xop", skip_serializing_if = "Option::is_none")]
    pub xmlns_xop: Option<String>,

    #[serde(rename = "@href")]
    pub href: String,
}

impl Document {
    pub fn inline(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            inline: Some(Binary::new(bytes)),
            include: None,
        }
    }

    /// Document transmis comme pièce jointe `content_id`
    pub fn attached(content_id: &str) -> Self {
        Self {
            inline: None,
            include: Some(XopInclude {
                xmlns_xop: Some(ns::XOP.to_string()),
                href: format!("{}{}", CID_PREFIX, content_id),
            }),
        }
    }

    /// Référence de pièce jointe, si le document n'est pas en ligne
    pub fn reference(&self) -> Option<&str> {
        self.include.as_ref().map(|i| i.href.as_str())
    }
}

impl RetrieveDocumentSetResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            xmlns_xdsb: Some(ns::XDSB.to_string()),
            xmlns_rs: Some(ns::RS.to_string()),
            registry_response: RegistryResponse {
                status: status.into(),
                registry_error_list: None,
            },
            document_response: Vec::new(),
        }
    }

    /// Ajoute un document à la réponse, après ceux déjà présents
    pub fn with_document(mut self, response: DocumentResponse) -> Self {
        self.document_response.push(response);
        self
    }

    pub fn status(&self) -> &str {
        &self.registry_response.status
    }

    pub fn is_success(&self) -> bool {
        self.status() == status::SUCCESS
    }
}
