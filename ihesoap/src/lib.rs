//! # ihesoap - Enveloppes SOAP pour les transactions IHE
//!
//! Cette crate modélise les messages SOAP échangés avec un registre et un
//! entrepôt de documents XDS.b.
//!
//! ## Fonctionnalités
//!
//! - ✅ Enveloppes de requête : namespaces, en-tête WS-Addressing, corps typé
//! - ✅ Enveloppes de réponse : en-tête optionnel, corps polymorphe, pièces jointes
//! - ✅ Détection d'erreur propre à chaque variante de corps
//! - ✅ Détection des SOAP Faults (1.1 et 1.2)
//! - ✅ Résolution des références XOP vers les pièces jointes
//! - ✅ Client générique au-dessus d'un [`Transport`]
//!
//! ## Architecture
//!
//! - [`RequestEnvelope`] : enveloppe sortante
//! - [`ResponseEnvelope`] : enveloppe entrante
//! - [`SoapBody`] / [`ResponseBody`] : corps et leur test d'erreur
//! - [`Attachment`] : pièce jointe binaire (ContentID + données)
//! - [`SoapFault`] : erreur SOAP
//! - [`SoapClient`] : invocation des transactions ITI-18 et ITI-43
//!
//! ## Example
//!
//! ```ignore
//! use ihesoap::{BodyKind, ResponseEnvelope, SoapBody};
//!
//! let envelope = ResponseEnvelope::from_xml(&raw, BodyKind::Retrieve)?;
//! if let Some(fault) = envelope.body().error_from_fault() {
//!     eprintln!("retrieve failed: {}", fault.status);
//! }
//! ```

pub mod attachment;
pub mod body;
pub mod client;
pub mod config_ext;
pub mod envelope;
pub mod errors;
pub mod fault;
pub mod header;
pub mod namespaces;
pub mod registry;

pub use attachment::{Attachment, Binary};
pub use body::{
    AdhocQueryBody, BodyContent, BodyFault, BodyKind, FAILURE_MARKER, GenericResponseBody,
    QueryResponseBody, RequestBody, ResponseBody, RetrieveDocumentBody, RetrieveDocumentSetBody,
    SoapBody,
};
pub use client::{RetrievedDocument, SoapClient, Transport};
pub use config_ext::SoapConfigExt;
pub use envelope::{RequestEnvelope, ResponseEnvelope};
pub use errors::SoapError;
pub use fault::SoapFault;
pub use header::{AddressingAction, RequestHeader, ResponseHeader, Security, new_message_id};
pub use namespaces::{NamespaceDecls, NamespaceTable, Transaction, ns};
