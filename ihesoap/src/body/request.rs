use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{BodyFault, SoapBody};
use crate::namespaces::Transaction;
use crate::registry::{AdhocQueryRequest, RetrieveDocumentSetRequest};

/// Corps de requête lié à une transaction.
///
/// La transaction détermine l'action WS-Addressing envoyée et la variante de
/// corps installée pour décoder la réponse.
pub trait RequestBody: SoapBody + Serialize + DeserializeOwned {
    const TRANSACTION: Transaction;
}

/// Corps `AdhocQueryRequest` (ITI-18)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdhocQueryBody {
    #[serde(
        rename = "query:AdhocQueryRequest",
        alias = "AdhocQueryRequest",
        skip_serializing_if = "Option::is_none"
    )]
    request: Option<AdhocQueryRequest>,
}

impl AdhocQueryBody {
    pub fn new(request: AdhocQueryRequest) -> Self {
        Self {
            request: Some(request),
        }
    }

    pub fn content(&self) -> Option<&AdhocQueryRequest> {
        self.request.as_ref()
    }
}

impl SoapBody for AdhocQueryBody {
    type Content = AdhocQueryRequest;

    fn set_content(&mut self, content: AdhocQueryRequest) {
        self.request = Some(content);
    }

    fn error_from_fault(&self) -> Option<BodyFault> {
        None
    }
}

impl RequestBody for AdhocQueryBody {
    const TRANSACTION: Transaction = Transaction::RegistryStoredQuery;
}

/// Corps `RetrieveDocumentSetRequest` (ITI-43)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieveDocumentSetBody {
    #[serde(
        rename = "xdsb:RetrieveDocumentSetRequest",
        alias = "RetrieveDocumentSetRequest",
        skip_serializing_if = "Option::is_none"
    )]
    request: Option<RetrieveDocumentSetRequest>,
}

impl RetrieveDocumentSetBody {
    pub fn new(request: RetrieveDocumentSetRequest) -> Self {
        Self {
            request: Some(request),
        }
    }

    pub fn content(&self) -> Option<&RetrieveDocumentSetRequest> {
        self.request.as_ref()
    }
}

impl SoapBody for RetrieveDocumentSetBody {
    type Content = RetrieveDocumentSetRequest;

    fn set_content(&mut self, content: RetrieveDocumentSetRequest) {
        self.request = Some(content);
    }

    fn error_from_fault(&self) -> Option<BodyFault> {
        None
    }
}

impl RequestBody for RetrieveDocumentSetBody {
    const TRANSACTION: Transaction = Transaction::RetrieveDocumentSet;
}
