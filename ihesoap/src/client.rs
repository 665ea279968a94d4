//! Client des transactions IHE
//!
//! Le client construit l'enveloppe de requête, la confie à un [`Transport`]
//! puis décode la réponse dans la variante de corps de la transaction
//! invoquée. Deux chemins d'erreur sont vérifiés, dans cet ordre :
//!
//! 1. un `Fault` SOAP dans le Body ([`SoapError::Fault`]) ;
//! 2. une erreur signalée par le contenu du corps ([`SoapError::Registry`]).

use std::io::BufReader;

use iheconfig::Config;
use tracing::{debug, info, warn};
use xmltree::Element;

use crate::attachment::Attachment;
use crate::body::{AdhocQueryBody, RequestBody, RetrieveDocumentSetBody, SoapBody};
use crate::config_ext::SoapConfigExt;
use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::errors::SoapError;
use crate::fault::SoapFault;
use crate::header::{RequestHeader, Security};
use crate::namespaces::{NamespaceTable, Transaction};
use crate::registry::{
    AdhocQueryRequest, AdhocQueryResponse, DocumentResponse, RetrieveDocumentSetRequest,
};

/// Échange d'un document SOAP avec un point d'accès distant
pub trait Transport {
    /// Envoie `payload` à `endpoint` et retourne le document de réponse brut
    fn send(&self, endpoint: &str, action: &str, payload: &str) -> anyhow::Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, endpoint: &str, action: &str, payload: &str) -> anyhow::Result<String> {
        (**self).send(endpoint, action, payload)
    }
}

/// Document obtenu par une transaction ITI-43
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedDocument {
    pub repository_unique_id: Option<String>,
    pub document_unique_id: Option<String>,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Client SOAP lié à un point d'accès
pub struct SoapClient<T> {
    transport: T,
    endpoint: String,
    namespaces: NamespaceTable,
    security: Option<Security>,
    log_payloads: bool,
}

impl<T: Transport> SoapClient<T> {
    pub fn new(transport: T, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            namespaces: NamespaceTable::default(),
            security: None,
            log_payloads: false,
        }
    }

    /// Crée un client pour `transaction` d'après la configuration.
    ///
    /// Échoue si aucun point d'accès n'est configuré pour la transaction.
    pub fn from_config(
        transport: T,
        config: &Config,
        transaction: Transaction,
    ) -> anyhow::Result<Self> {
        let endpoint = config.get_soap_endpoint(transaction)?.ok_or_else(|| {
            anyhow::anyhow!(
                "No endpoint configured for {} (soap.endpoints.{})",
                transaction,
                transaction.config_key()
            )
        })?;

        Ok(Self::new(transport, endpoint)
            .with_namespaces(config.get_soap_namespaces()?)
            .with_payload_logging(config.get_log_payloads()?))
    }

    pub fn with_namespaces(mut self, namespaces: NamespaceTable) -> Self {
        self.namespaces = namespaces;
        self
    }

    /// Bloc de sécurité joint à chaque requête
    pub fn with_security(mut self, security: Security) -> Self {
        self.security = Some(security);
        self
    }

    pub fn with_payload_logging(mut self, enabled: bool) -> Self {
        self.log_payloads = enabled;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Invoque la transaction portée par `body`.
    ///
    /// La variante du corps de réponse est choisie d'après la transaction
    /// avant le décodage ; un corps qui signale une erreur est converti en
    /// [`SoapError::Registry`].
    pub fn call<B: RequestBody>(&self, body: B) -> Result<ResponseEnvelope, SoapError> {
        let transaction = B::TRANSACTION;
        let header = RequestHeader::new(transaction.action(), &self.endpoint)
            .with_security(self.security.clone());
        let message_id = header.message_id.clone();

        let request = RequestEnvelope::for_body(&self.namespaces, header, body);
        let payload = request.to_xml()?;

        info!(
            transaction = %transaction,
            endpoint = %self.endpoint,
            message_id = %message_id,
            "Sending SOAP request"
        );
        if self.log_payloads {
            debug!(payload = %payload, "SOAP request payload");
        }

        let raw = self
            .transport
            .send(&self.endpoint, transaction.action(), &payload)
            .map_err(SoapError::Transport)?;

        if self.log_payloads {
            debug!(payload = %raw, "SOAP response payload");
        }

        let root = Element::parse(BufReader::new(raw.as_bytes()))?;
        if let Some(fault) = SoapFault::from_envelope(&root) {
            warn!(
                transaction = %transaction,
                code = %fault.code,
                reason = %fault.reason,
                "SOAP fault received"
            );
            return Err(SoapError::Fault(fault));
        }

        let envelope = ResponseEnvelope::from_parsed(&root, &raw, transaction.response_kind())?;

        if let Some(fault) = envelope.body().error_from_fault() {
            warn!(
                transaction = %transaction,
                status = %fault.status,
                errors = fault.errors.len(),
                "Registry reported a failure"
            );
            return Err(SoapError::Registry(fault));
        }

        if let Some(relates_to) = envelope.header().and_then(|h| h.relates_to.as_deref()) {
            if relates_to != message_id {
                warn!(
                    expected = %message_id,
                    received = %relates_to,
                    "Response does not relate to the request"
                );
            }
        }

        debug!(transaction = %transaction, "SOAP call completed");
        Ok(envelope)
    }

    /// Transaction ITI-18
    pub fn stored_query(
        &self,
        request: AdhocQueryRequest,
    ) -> Result<AdhocQueryResponse, SoapError> {
        let transaction = AdhocQueryBody::TRANSACTION;
        let envelope = self.call(AdhocQueryBody::new(request))?;
        let (_, body, _) = envelope.into_parts();

        let response = body
            .into_query()
            .ok_or_else(|| SoapError::EmptyResponse(transaction.to_string()))?;

        info!(
            status = %response.status,
            documents = response.extrinsic_objects().len(),
            references = response.object_refs().len(),
            "Stored query answered"
        );
        Ok(response)
    }

    /// Transaction ITI-43.
    ///
    /// Chaque document est résolu en ligne ou d'après la pièce jointe que
    /// désigne sa référence XOP ; un document dont la pièce jointe manque est
    /// ignoré.
    pub fn retrieve_document_set(
        &self,
        request: RetrieveDocumentSetRequest,
    ) -> Result<Vec<RetrievedDocument>, SoapError> {
        let transaction = RetrieveDocumentSetBody::TRANSACTION;
        let envelope = self.call(RetrieveDocumentSetBody::new(request))?;
        let (_, body, mut attachments) = envelope.into_parts();

        let response = body
            .into_retrieve()
            .ok_or_else(|| SoapError::EmptyResponse(transaction.to_string()))?;

        let documents: Vec<RetrievedDocument> = response
            .document_response
            .into_iter()
            .filter_map(|document| resolve_document(document, &mut attachments))
            .collect();

        info!(
            status = %response.registry_response.status,
            documents = documents.len(),
            "Documents retrieved"
        );
        Ok(documents)
    }
}

fn resolve_document(
    response: DocumentResponse,
    attachments: &mut Vec<Attachment>,
) -> Option<RetrievedDocument> {
    let document = response.document?;

    let bytes = match (document.inline, document.include) {
        (Some(inline), _) => inline.into_bytes(),
        (None, Some(include)) => {
            let Some(position) = attachments
                .iter()
                .position(|a| a.matches_reference(&include.href))
            else {
                warn!(
                    reference = %include.href,
                    document = ?response.document_unique_id,
                    "Referenced attachment is missing"
                );
                return None;
            };
            attachments.remove(position).into_data()
        }
        (None, None) => return None,
    };

    Some(RetrievedDocument {
        repository_unique_id: response.repository_unique_id,
        document_unique_id: response.document_unique_id,
        mime_type: response.mime_type,
        bytes,
    })
}
