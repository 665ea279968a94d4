//! Pièces jointes binaires transportées hors de l'arbre XML
//!
//! Une réponse peut accompagner son corps de documents binaires (style MTOM).
//! Ils sont modélisés comme des éléments `<attachments>` frères du Body, chacun
//! identifié par un `ContentID` et portant ses octets encodés en base64.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Préfixe des références XOP (`href="cid:..."`)
pub const CID_PREFIX: &str = "cid:";

/// Contenu binaire, sérialisé en base64 dans le XML
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Binary(pub Vec<u8>);

impl Binary {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Décode une chaîne base64, en ignorant les retours à la ligne
    pub fn from_base64(text: &str) -> Result<Self, base64::DecodeError> {
        let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD.decode(compact).map(Self)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }
}

impl From<Vec<u8>> for Binary {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl Serialize for Binary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Binary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Binary::from_base64(&text).map_err(serde::de::Error::custom)
    }
}

/// Une partie binaire associée à une réponse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Identifiant de contenu (sans le préfixe `cid:`)
    #[serde(rename = "ContentID")]
    content_id: String,

    #[serde(rename = "Data", default)]
    data: Binary,
}

impl Attachment {
    pub fn new(content_id: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            content_id: content_id.into(),
            data: Binary::new(data),
        }
    }

    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    pub fn data(&self) -> &[u8] {
        self.data.as_bytes()
    }

    /// Transfère les octets à l'appelant sans copie
    pub fn into_data(self) -> Vec<u8> {
        self.data.into_bytes()
    }

    /// Indique si `reference` désigne cette pièce jointe.
    ///
    /// Accepte l'identifiant nu, avec le préfixe `cid:`, ou entre chevrons
    /// (forme des en-têtes MIME `Content-ID`).
    pub fn matches_reference(&self, reference: &str) -> bool {
        let reference = reference.strip_prefix(CID_PREFIX).unwrap_or(reference);
        let reference = reference
            .strip_prefix('<')
            .and_then(|r| r.strip_suffix('>'))
            .unwrap_or(reference);
        let own = self
            .content_id
            .strip_prefix('<')
            .and_then(|r| r.strip_suffix('>'))
            .unwrap_or(&self.content_id);
        own == reference
    }
}
