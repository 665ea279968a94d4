//! # Structures ebXML / XDS.b
//!
//! Formes XML des messages échangés par les transactions IHE. Chaque
//! structure est une transcription directe du schéma : les éléments sont
//! émis avec leur préfixe (`rim:`, `query:`, `rs:`, `xdsb:`) et relus par
//! leur nom local, quel que soit le préfixe choisi par l'émetteur.

mod query;
mod retrieve;
mod rim;

use serde::{Deserialize, Serialize};

pub use query::{AdhocQuery, AdhocQueryRequest, AdhocQueryResponse, RegistryObjectList, ResponseOption};
pub use retrieve::{
    Document, DocumentRequest, DocumentResponse, RegistryResponse, RetrieveDocumentSetRequest,
    RetrieveDocumentSetResponse, XopInclude,
};
pub use rim::{
    ExternalIdentifier, ExtrinsicObject, InternationalString, LocalizedString, ObjectRef, Slot,
    ValueList,
};

/// Statuts de réponse ebXML RegRep 3.0
pub mod status {
    pub const SUCCESS: &str = "urn:oasis:names:tc:ebxml-regrep:ResponseStatusType:Success";
    pub const FAILURE: &str = "urn:oasis:names:tc:ebxml-regrep:ResponseStatusType:Failure";
    pub const PARTIAL_SUCCESS: &str =
        "urn:oasis:names:tc:ebxml-regrep:ResponseStatusType:PartialSuccess";

    /// Statut d'une fiche de document approuvée
    pub const APPROVED: &str = "urn:oasis:names:tc:ebxml-regrep:StatusType:Approved";

    /// Sévérités des erreurs de registre
    pub const SEVERITY_ERROR: &str = "urn:oasis:names:tc:ebxml-regrep:ErrorSeverityType:Error";
    pub const SEVERITY_WARNING: &str =
        "urn:oasis:names:tc:ebxml-regrep:ErrorSeverityType:Warning";
}

/// Identifiants des requêtes stockées XDS.b
pub mod stored_query {
    pub const FIND_DOCUMENTS: &str = "urn:uuid:14d4debf-8f97-4251-9a74-a90016b0af0d";
    pub const GET_DOCUMENTS: &str = "urn:uuid:5c4f972b-d56b-40ac-a5fc-c8ca9b40b9d4";

    pub const RETURN_LEAF_CLASS: &str = "LeafClass";
    pub const RETURN_OBJECT_REF: &str = "ObjectRef";
}

/// Liste d'erreurs retournée par un registre ou un entrepôt
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryErrorList {
    #[serde(rename = "@highestSeverity", skip_serializing_if = "Option::is_none")]
    pub highest_severity: Option<String>,

    #[serde(rename = "rs:RegistryError", alias = "RegistryError", default)]
    pub errors: Vec<RegistryError>,
}

/// Erreur individuelle d'un registre
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryError {
    #[serde(rename = "@errorCode", default)]
    pub error_code: String,

    #[serde(rename = "@codeContext", default)]
    pub code_context: String,

    #[serde(rename = "@severity", skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    #[serde(rename = "@location", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl RegistryError {
    pub fn new(error_code: impl Into<String>, code_context: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            code_context: code_context.into(),
            severity: Some(status::SEVERITY_ERROR.to_string()),
            location: None,
        }
    }
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code, self.code_context)
    }
}
