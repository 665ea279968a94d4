//! Objets du modèle d'information ebRIM 3.0

use serde::{Deserialize, Serialize};

/// Slot nommé portant une liste de valeurs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(rename = "@name")]
    pub name: String,

    #[serde(rename = "rim:ValueList", alias = "ValueList", default)]
    pub value_list: ValueList,
}

impl Slot {
    pub fn new<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            value_list: ValueList {
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn values(&self) -> &[String] {
        &self.value_list.values
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueList {
    #[serde(rename = "rim:Value", alias = "Value", default)]
    pub values: Vec<String>,
}

/// Chaîne localisée (Name, Description)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternationalString {
    #[serde(rename = "rim:LocalizedString", alias = "LocalizedString", default)]
    pub localized: Vec<LocalizedString>,
}

impl InternationalString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            localized: vec![LocalizedString {
                lang: None,
                charset: None,
                value: value.into(),
            }],
        }
    }

    /// Première valeur disponible
    pub fn value(&self) -> Option<&str> {
        self.localized.first().map(|l| l.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedString {
    #[serde(rename = "@xml:lang", alias = "@lang", skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,

    #[serde(rename = "@charset", skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,

    #[serde(rename = "@value", default)]
    pub value: String,
}

/// Identifiant externe (patient, identifiant unique du document…)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIdentifier {
    #[serde(rename = "@id", default)]
    pub id: String,

    #[serde(rename = "@registryObject", skip_serializing_if = "Option::is_none")]
    pub registry_object: Option<String>,

    #[serde(rename = "@identificationScheme", default)]
    pub identification_scheme: String,

    #[serde(rename = "@value", default)]
    pub value: String,

    #[serde(rename = "rim:Name", alias = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<InternationalString>,
}

/// Référence vers un objet du registre (réponse `ObjectRef`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@home", skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,
}

/// Fiche de document (réponse `LeafClass`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtrinsicObject {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@mimeType", default)]
    pub mime_type: String,

    #[serde(rename = "@objectType", default)]
    pub object_type: String,

    #[serde(rename = "@status", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(rename = "@home", skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,

    #[serde(rename = "rim:Slot", alias = "Slot", default)]
    pub slots: Vec<Slot>,

    #[serde(rename = "rim:Name", alias = "Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<InternationalString>,

    #[serde(
        rename = "rim:Description",
        alias = "Description",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<InternationalString>,

    #[serde(rename = "rim:ExternalIdentifier", alias = "ExternalIdentifier", default)]
    pub external_identifiers: Vec<ExternalIdentifier>,
}

impl ExtrinsicObject {
    /// Valeurs du slot `name`, s'il est présent
    pub fn slot(&self, name: &str) -> Option<&[String]> {
        self.slots
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.values())
    }

    /// Valeur de l'identifiant externe de schéma `scheme`
    pub fn external_id(&self, scheme: &str) -> Option<&str> {
        self.external_identifiers
            .iter()
            .find(|e| e.identification_scheme == scheme)
            .map(|e| e.value.as_str())
    }
}
