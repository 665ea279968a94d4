use super::{BodyFault, SoapBody};
use crate::registry::RetrieveDocumentSetResponse;

/// Segment de statut marquant un échec.
///
/// Le statut est un URN complet dont le dernier segment porte le résultat ;
/// la recherche se fait par inclusion, sensible à la casse.
pub const FAILURE_MARKER: &str = "Failure";

/// Corps d'une réponse de récupération de documents (ITI-43)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrieveDocumentBody {
    response: Option<RetrieveDocumentSetResponse>,
}

impl RetrieveDocumentBody {
    pub fn new(response: RetrieveDocumentSetResponse) -> Self {
        Self {
            response: Some(response),
        }
    }

    pub fn content(&self) -> Option<&RetrieveDocumentSetResponse> {
        self.response.as_ref()
    }

    pub fn content_mut(&mut self) -> Option<&mut RetrieveDocumentSetResponse> {
        self.response.as_mut()
    }

    pub fn into_content(self) -> Option<RetrieveDocumentSetResponse> {
        self.response
    }
}

impl SoapBody for RetrieveDocumentBody {
    type Content = RetrieveDocumentSetResponse;

    fn set_content(&mut self, content: RetrieveDocumentSetResponse) {
        self.response = Some(content);
    }

    fn error_from_fault(&self) -> Option<BodyFault> {
        let registry_response = &self.response.as_ref()?.registry_response;
        if !registry_response.status.contains(FAILURE_MARKER) {
            return None;
        }

        Some(BodyFault {
            status: registry_response.status.clone(),
            errors: registry_response
                .registry_error_list
                .as_ref()
                .map(|list| list.errors.clone())
                .unwrap_or_default(),
        })
    }
}
