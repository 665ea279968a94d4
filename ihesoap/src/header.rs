//! En-têtes SOAP : adressage WS-Addressing et bloc de sécurité
//!
//! Le bloc de sécurité (assertion SAML et signature XML) est produit par un
//! module externe et simplement transporté : aucune de ses valeurs n'est
//! interprétée ici.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// En-tête d'une requête sortante
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestHeader {
    #[serde(rename = "wsa:Action", alias = "Action")]
    pub action: AddressingAction,

    #[serde(rename = "wsa:MessageID", alias = "MessageID")]
    pub message_id: String,

    #[serde(rename = "wsa:To", alias = "To")]
    pub to: String,

    #[serde(
        rename = "wsse:Security",
        alias = "Security",
        skip_serializing_if = "Option::is_none"
    )]
    pub security: Option<Security>,
}

impl RequestHeader {
    /// Crée un en-tête avec un identifiant de message `urn:uuid:` neuf
    pub fn new(action: &str, to: &str) -> Self {
        Self {
            action: AddressingAction::must_understand(action),
            message_id: new_message_id(),
            to: to.to_string(),
            security: None,
        }
    }

    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = message_id.into();
        self
    }

    pub fn with_security(mut self, security: Option<Security>) -> Self {
        self.security = security;
        self
    }
}

/// Génère un identifiant de message WS-Addressing
pub fn new_message_id() -> String {
    format!("urn:uuid:{}", Uuid::new_v4())
}

/// En-tête d'une réponse entrante ; tous les champs sont optionnels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHeader {
    #[serde(rename = "wsa:Action", alias = "Action", skip_serializing_if = "Option::is_none")]
    pub action: Option<AddressingAction>,

    #[serde(
        rename = "wsa:MessageID",
        alias = "MessageID",
        skip_serializing_if = "Option::is_none"
    )]
    pub message_id: Option<String>,

    #[serde(rename = "wsa:To", alias = "To", skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(
        rename = "wsa:RelatesTo",
        alias = "RelatesTo",
        skip_serializing_if = "Option::is_none"
    )]
    pub relates_to: Option<String>,
}

impl ResponseHeader {
    /// En-tête répondant au message `request_id`
    pub fn reply_to(action: &str, request_id: &str) -> Self {
        Self {
            action: Some(AddressingAction::must_understand(action)),
            message_id: Some(new_message_id()),
            to: None,
            relates_to: Some(request_id.to_string()),
        }
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_ref().map(|a| a.value.as_str())
    }
}

/// Action WS-Addressing avec son attribut `mustUnderstand`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressingAction {
    #[serde(
        rename = "@soap:mustUnderstand",
        alias = "@mustUnderstand",
        skip_serializing_if = "Option::is_none"
    )]
    pub must_understand: Option<String>,

    #[serde(rename = "$text", default)]
    pub value: String,
}

impl AddressingAction {
    pub fn must_understand(value: &str) -> Self {
        Self {
            must_understand: Some("true".to_string()),
            value: value.to_string(),
        }
    }
}

/// Bloc `wsse:Security`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    #[serde(
        rename = "saml:Assertion",
        alias = "Assertion",
        skip_serializing_if = "Option::is_none"
    )]
    pub assertion: Option<Assertion>,
}

/// Assertion SAML 2.0 pré-construite
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    #[serde(rename = "@ID", default)]
    pub id: String,

    #[serde(rename = "@IssueInstant", default)]
    pub issue_instant: String,

    #[serde(rename = "@Version", default)]
    pub version: String,

    #[serde(rename = "saml:Issuer", alias = "Issuer", default)]
    pub issuer: Issuer,

    #[serde(
        rename = "ds:Signature",
        alias = "Signature",
        skip_serializing_if = "Option::is_none"
    )]
    pub signature: Option<Signature>,

    #[serde(rename = "saml:Subject", alias = "Subject", default)]
    pub subject: Subject,

    #[serde(
        rename = "saml:AuthnStatement",
        alias = "AuthnStatement",
        skip_serializing_if = "Option::is_none"
    )]
    pub authn_statement: Option<AuthnStatement>,

    #[serde(rename = "saml:AttributeStatement", alias = "AttributeStatement", default)]
    pub attribute_statements: Vec<AttributeStatement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issuer {
    #[serde(rename = "@Format", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(rename = "$text", default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "saml:NameID", alias = "NameID", default)]
    pub name_id: NameId,

    #[serde(
        rename = "saml:SubjectConfirmation",
        alias = "SubjectConfirmation",
        skip_serializing_if = "Option::is_none"
    )]
    pub subject_confirmation: Option<SubjectConfirmation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameId {
    #[serde(rename = "@Format", skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(rename = "$text", default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectConfirmation {
    #[serde(rename = "@Method")]
    pub method: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthnStatement {
    #[serde(rename = "@AuthnInstant", default)]
    pub authn_instant: String,

    #[serde(rename = "@SessionIndex", skip_serializing_if = "Option::is_none")]
    pub session_index: Option<String>,

    #[serde(rename = "saml:AuthnContext", alias = "AuthnContext", default)]
    pub authn_context: AuthnContext,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthnContext {
    #[serde(rename = "saml:AuthnContextClassRef", alias = "AuthnContextClassRef", default)]
    pub class_ref: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeStatement {
    #[serde(rename = "saml:Attribute", alias = "Attribute", default)]
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "@Name")]
    pub name: String,

    #[serde(rename = "@NameFormat", skip_serializing_if = "Option::is_none")]
    pub name_format: Option<String>,

    #[serde(rename = "saml:AttributeValue", alias = "AttributeValue", default)]
    pub values: Vec<String>,
}

/// Signature XML (`ds:Signature`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(rename = "ds:SignedInfo", alias = "SignedInfo", default)]
    pub signed_info: SignedInfo,

    #[serde(rename = "ds:SignatureValue", alias = "SignatureValue", default)]
    pub signature_value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedInfo {
    #[serde(rename = "ds:CanonicalizationMethod", alias = "CanonicalizationMethod", default)]
    pub canonicalization_method: Algorithm,

    #[serde(rename = "ds:SignatureMethod", alias = "SignatureMethod", default)]
    pub signature_method: Algorithm,

    #[serde(rename = "ds:Reference", alias = "Reference", default)]
    pub reference: Reference,
}

/// Élément vide portant un attribut `Algorithm`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Algorithm {
    #[serde(rename = "@Algorithm", default)]
    pub algorithm: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "@URI", default)]
    pub uri: String,

    #[serde(rename = "ds:DigestMethod", alias = "DigestMethod", default)]
    pub digest_method: Algorithm,

    #[serde(rename = "ds:DigestValue", alias = "DigestValue", default)]
    pub digest_value: String,
}
