use super::{BodyFault, SoapBody};
use crate::registry::AdhocQueryResponse;

/// Corps d'une réponse de requête stockée (ITI-18).
///
/// Le statut de la réponse est informatif : ce corps ne signale jamais
/// d'erreur à lui seul.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryResponseBody {
    response: Option<AdhocQueryResponse>,
}

impl QueryResponseBody {
    pub fn new(response: AdhocQueryResponse) -> Self {
        Self {
            response: Some(response),
        }
    }

    pub fn content(&self) -> Option<&AdhocQueryResponse> {
        self.response.as_ref()
    }

    pub fn into_content(self) -> Option<AdhocQueryResponse> {
        self.response
    }
}

impl SoapBody for QueryResponseBody {
    type Content = AdhocQueryResponse;

    fn set_content(&mut self, content: AdhocQueryResponse) {
        self.response = Some(content);
    }

    fn error_from_fault(&self) -> Option<BodyFault> {
        None
    }
}
