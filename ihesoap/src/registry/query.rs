//! ITI-18 Registry Stored Query

use serde::{Deserialize, Serialize};

use super::rim::{ExtrinsicObject, ObjectRef, Slot};
use super::{RegistryErrorList, status, stored_query};
use crate::namespaces::ns;

const SLOT_PATIENT_ID: &str = "$XDSDocumentEntryPatientId";
const SLOT_ENTRY_STATUS: &str = "$XDSDocumentEntryStatus";
const SLOT_ENTRY_UUID: &str = "$XDSDocumentEntryEntryUUID";

/// Requête `AdhocQueryRequest`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdhocQueryRequest {
    #[serde(rename = "query:ResponseOption", alias = "ResponseOption")]
    pub response_option: ResponseOption,

    #[serde(rename = "rim:AdhocQuery", alias = "AdhocQuery")]
    pub adhoc_query: AdhocQuery,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseOption {
    #[serde(rename = "@returnComposedObjects", default)]
    pub return_composed_objects: bool,

    #[serde(rename = "@returnType")]
    pub return_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdhocQuery {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@home", skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,

    #[serde(rename = "rim:Slot", alias = "Slot", default)]
    pub slots: Vec<Slot>,
}

impl AdhocQueryRequest {
    /// Requête stockée `query_id` sans paramètre, retour `LeafClass`
    pub fn new(query_id: impl Into<String>) -> Self {
        Self {
            response_option: ResponseOption {
                return_composed_objects: true,
                return_type: stored_query::RETURN_LEAF_CLASS.to_string(),
            },
            adhoc_query: AdhocQuery {
                id: query_id.into(),
                home: None,
                slots: Vec::new(),
            },
        }
    }

    /// FindDocuments : fiches approuvées d'un patient
    ///
    /// `patient_id` est l'identifiant CX complet (`id^^^&oid&ISO`).
    pub fn find_documents(patient_id: &str) -> Self {
        Self::new(stored_query::FIND_DOCUMENTS)
            .with_slot(SLOT_PATIENT_ID, [format!("'{}'", patient_id)])
            .with_slot(SLOT_ENTRY_STATUS, [format!("('{}')", status::APPROVED)])
    }

    /// GetDocuments : fiches désignées par leur entryUUID
    pub fn get_documents<S: AsRef<str>>(entry_uuids: &[S]) -> Self {
        let list = entry_uuids
            .iter()
            .map(|uuid| format!("'{}'", uuid.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        Self::new(stored_query::GET_DOCUMENTS).with_slot(SLOT_ENTRY_UUID, [format!("({})", list)])
    }

    pub fn with_slot<I, S>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.adhoc_query.slots.push(Slot::new(name, values));
        self
    }

    pub fn with_return_type(mut self, return_type: &str) -> Self {
        self.response_option.return_type = return_type.to_string();
        self
    }

    pub fn with_home(mut self, home_community_id: impl Into<String>) -> Self {
        self.adhoc_query.home = Some(home_community_id.into());
        self
    }
}

/// Réponse `AdhocQueryResponse`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdhocQueryResponse {
    #[serde(rename = "@xmlns:query", skip_serializing_if = "Option::is_none")]
    pub xmlns_query: Option<String>,

    #[serde(rename = "@xmlns:rim", skip_serializing_if = "Option::is_none")]
    pub xmlns_rim: Option<String>,

    #[serde(rename = "@xmlns:rs", skip_serializing_if = "Option::is_none")]
    pub xmlns_rs: Option<String>,

    #[serde(rename = "@status", default)]
    pub status: String,

    #[serde(rename = "rim:RegistryObjectList", alias = "RegistryObjectList", default)]
    pub registry_object_list: RegistryObjectList,

    #[serde(
        rename = "rs:RegistryErrorList",
        alias = "RegistryErrorList",
        skip_serializing_if = "Option::is_none"
    )]
    pub registry_error_list: Option<RegistryErrorList>,
}

/// Résultats d'une requête stockée
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryObjectList {
    #[serde(rename = "rim:ObjectRef", alias = "ObjectRef", default)]
    pub object_refs: Vec<ObjectRef>,

    #[serde(rename = "rim:ExtrinsicObject", alias = "ExtrinsicObject", default)]
    pub extrinsic_objects: Vec<ExtrinsicObject>,

    #[serde(rename = "rim:Message", alias = "Message", default)]
    pub messages: Vec<String>,
}

impl AdhocQueryResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            xmlns_query: Some(ns::QUERY.to_string()),
            xmlns_rim: Some(ns::RIM.to_string()),
            xmlns_rs: Some(ns::RS.to_string()),
            status: status.into(),
            ..Self::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == status::SUCCESS
    }

    pub fn extrinsic_objects(&self) -> &[ExtrinsicObject] {
        &self.registry_object_list.extrinsic_objects
    }

    pub fn object_refs(&self) -> &[ObjectRef] {
        &self.registry_object_list.object_refs
    }
}
