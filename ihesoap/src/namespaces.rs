//! Table des namespaces et des transactions IHE
//!
//! Les URI sont des données de configuration : les valeurs par défaut
//! proviennent du module [`ns`] et peuvent être remplacées par la
//! configuration (voir [`crate::SoapConfigExt`]).

use serde::{Deserialize, Serialize};

use crate::body::BodyKind;

/// URI des namespaces utilisés par les transactions XDS.b
pub mod ns {
    /// Enveloppe SOAP 1.2
    pub const SOAP_ENVELOPE: &str = "http://www.w3.org/2003/05/soap-envelope";

    /// WS-Addressing
    pub const ADDRESSING: &str = "http://www.w3.org/2005/08/addressing";

    /// WS-Security (extension)
    pub const SECURITY: &str =
        "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";

    /// Assertion SAML 2.0
    pub const ASSERTION: &str = "urn:oasis:names:tc:SAML:2.0:assertion";

    /// Signature XML
    pub const XMLDSIG: &str = "http://www.w3.org/2000/09/xmldsig#";

    /// ebXML RegRep 3.0 query
    pub const QUERY: &str = "urn:oasis:names:tc:ebxml-regrep:xsd:query:3.0";

    /// ebXML RegRep 3.0 information model
    pub const RIM: &str = "urn:oasis:names:tc:ebxml-regrep:xsd:rim:3.0";

    /// ebXML RegRep 3.0 registry services
    pub const RS: &str = "urn:oasis:names:tc:ebxml-regrep:xsd:rs:3.0";

    /// IHE XDS.b
    pub const XDSB: &str = "urn:ihe:iti:xds-b:2007";

    /// XML Schema instance
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

    /// XOP (références MTOM)
    pub const XOP: &str = "http://www.w3.org/2004/08/xop/include";
}

/// Transactions IHE supportées
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transaction {
    /// ITI-18 Registry Stored Query
    RegistryStoredQuery,
    /// ITI-43 Retrieve Document Set
    RetrieveDocumentSet,
}

impl Transaction {
    /// Action WS-Addressing de la requête
    pub fn action(&self) -> &'static str {
        match self {
            Transaction::RegistryStoredQuery => "urn:ihe:iti:2007:RegistryStoredQuery",
            Transaction::RetrieveDocumentSet => "urn:ihe:iti:2007:RetrieveDocumentSet",
        }
    }

    /// Action WS-Addressing attendue dans la réponse
    pub fn response_action(&self) -> &'static str {
        match self {
            Transaction::RegistryStoredQuery => "urn:ihe:iti:2007:RegistryStoredQueryResponse",
            Transaction::RetrieveDocumentSet => "urn:ihe:iti:2007:RetrieveDocumentSetResponse",
        }
    }

    /// Variante de corps à installer avant de décoder la réponse.
    ///
    /// La réponse ne décrit pas sa propre forme : c'est la transaction
    /// invoquée qui la détermine.
    pub fn response_kind(&self) -> BodyKind {
        match self {
            Transaction::RegistryStoredQuery => BodyKind::Query,
            Transaction::RetrieveDocumentSet => BodyKind::Retrieve,
        }
    }

    /// Clé utilisée dans la section `soap.endpoints` de la configuration
    pub fn config_key(&self) -> &'static str {
        match self {
            Transaction::RegistryStoredQuery => "registry_stored_query",
            Transaction::RetrieveDocumentSet => "retrieve_document_set",
        }
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transaction::RegistryStoredQuery => write!(f, "ITI-18 RegistryStoredQuery"),
            Transaction::RetrieveDocumentSet => write!(f, "ITI-43 RetrieveDocumentSet"),
        }
    }
}

/// URI associées à chaque préfixe utilisé dans les requêtes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceTable {
    pub soap: String,
    pub wsa: String,
    pub wsse: String,
    pub saml: String,
    pub ds: String,
    pub query: String,
    pub rim: String,
    pub rs: String,
    pub xdsb: String,
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self {
            soap: ns::SOAP_ENVELOPE.to_string(),
            wsa: ns::ADDRESSING.to_string(),
            wsse: ns::SECURITY.to_string(),
            saml: ns::ASSERTION.to_string(),
            ds: ns::XMLDSIG.to_string(),
            query: ns::QUERY.to_string(),
            rim: ns::RIM.to_string(),
            rs: ns::RS.to_string(),
            xdsb: ns::XDSB.to_string(),
        }
    }
}

impl NamespaceTable {
    /// Déclarations à poser sur la racine d'une requête pour `transaction`
    pub fn declarations(&self, transaction: Transaction) -> NamespaceDecls {
        let mut decls = NamespaceDecls {
            soap: Some(self.soap.clone()),
            wsa: Some(self.wsa.clone()),
            wsse: Some(self.wsse.clone()),
            saml: Some(self.saml.clone()),
            ds: Some(self.ds.clone()),
            ..NamespaceDecls::default()
        };

        match transaction {
            Transaction::RegistryStoredQuery => {
                decls.query = Some(self.query.clone());
                decls.rim = Some(self.rim.clone());
            }
            Transaction::RetrieveDocumentSet => {
                decls.xdsb = Some(self.xdsb.clone());
            }
        }

        decls
    }
}

/// Ensemble de déclarations `xmlns:*` d'une enveloppe de requête
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceDecls {
    pub soap: Option<String>,
    pub wsa: Option<String>,
    pub wsse: Option<String>,
    pub saml: Option<String>,
    pub ds: Option<String>,
    pub query: Option<String>,
    pub rim: Option<String>,
    pub xdsb: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_declarations() {
        let decls = NamespaceTable::default().declarations(Transaction::RegistryStoredQuery);

        assert_eq!(decls.soap.as_deref(), Some(ns::SOAP_ENVELOPE));
        assert_eq!(decls.query.as_deref(), Some(ns::QUERY));
        assert_eq!(decls.rim.as_deref(), Some(ns::RIM));
        assert_eq!(decls.xdsb, None);
    }

    #[test]
    fn test_retrieve_declarations() {
        let decls = NamespaceTable::default().declarations(Transaction::RetrieveDocumentSet);

        assert_eq!(decls.xdsb.as_deref(), Some(ns::XDSB));
        assert_eq!(decls.query, None);
        assert_eq!(decls.rim, None);
    }

    #[test]
    fn test_partial_table_keeps_defaults() {
        let table: NamespaceTable =
            serde_yaml::from_str("wsa: urn:example:addressing\n").unwrap();

        assert_eq!(table.wsa, "urn:example:addressing");
        assert_eq!(table.soap, ns::SOAP_ENVELOPE);
    }

    #[test]
    fn test_dispatch_table() {
        assert_eq!(
            Transaction::RegistryStoredQuery.response_kind(),
            BodyKind::Query
        );
        assert_eq!(
            Transaction::RetrieveDocumentSet.response_kind(),
            BodyKind::Retrieve
        );
        assert_eq!(
            Transaction::RetrieveDocumentSet.response_action(),
            "urn:ihe:iti:2007:RetrieveDocumentSetResponse"
        );
    }
}
