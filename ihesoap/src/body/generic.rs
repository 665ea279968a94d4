use xmltree::Element;

use super::{BodyFault, SoapBody};

/// Corps générique : élément XML opaque.
///
/// Ce corps ne signale jamais d'erreur ; les échecs de ces réponses passent
/// par un SOAP Fault, traité par la couche transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericResponseBody {
    response: Option<Element>,
}

impl GenericResponseBody {
    pub fn new(response: Element) -> Self {
        Self {
            response: Some(response),
        }
    }

    pub fn content(&self) -> Option<&Element> {
        self.response.as_ref()
    }

    pub fn into_content(self) -> Option<Element> {
        self.response
    }
}

impl SoapBody for GenericResponseBody {
    type Content = Element;

    fn set_content(&mut self, content: Element) {
        self.response = Some(content);
    }

    fn error_from_fault(&self) -> Option<BodyFault> {
        None
    }
}
