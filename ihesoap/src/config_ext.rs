//! Extension pour intégrer la configuration SOAP dans iheconfig
//!
//! Ce module fournit le trait `SoapConfigExt` qui ajoute à `iheconfig::Config`
//! l'accès aux URI de namespaces et aux points d'accès des transactions.

use anyhow::Result;
use iheconfig::Config;
use serde_yaml::Value;

use crate::namespaces::{NamespaceTable, Transaction};

/// Trait d'extension pour la section `soap` de la configuration
///
/// # Exemple
///
/// ```rust,ignore
/// use iheconfig::get_config;
/// use ihesoap::{SoapConfigExt, Transaction};
///
/// let config = get_config();
/// let endpoint = config.get_soap_endpoint(Transaction::RegistryStoredQuery)?;
/// ```
pub trait SoapConfigExt {
    /// Récupère la table des namespaces (`soap.namespaces`)
    ///
    /// Les préfixes absents de la configuration prennent leur URI standard.
    fn get_soap_namespaces(&self) -> Result<NamespaceTable>;

    /// Récupère le point d'accès d'une transaction
    ///
    /// # Returns
    ///
    /// `None` si aucune URL n'est configurée (valeur absente ou vide)
    fn get_soap_endpoint(&self, transaction: Transaction) -> Result<Option<String>>;

    /// Définit le point d'accès d'une transaction
    fn set_soap_endpoint(&self, transaction: Transaction, url: String) -> Result<()>;
}

impl SoapConfigExt for Config {
    fn get_soap_namespaces(&self) -> Result<NamespaceTable> {
        match self.get_value(&["soap", "namespaces"]) {
            Ok(value @ Value::Mapping(_)) => Ok(serde_yaml::from_value(value)?),
            _ => Ok(NamespaceTable::default()),
        }
    }

    fn get_soap_endpoint(&self, transaction: Transaction) -> Result<Option<String>> {
        match self.get_value(&["soap", "endpoints", transaction.config_key()]) {
            Ok(Value::String(url)) if !url.trim().is_empty() => Ok(Some(url)),
            _ => Ok(None),
        }
    }

    fn set_soap_endpoint(&self, transaction: Transaction, url: String) -> Result<()> {
        self.set_value(
            &["soap", "endpoints", transaction.config_key()],
            Value::String(url),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespaces::ns;
    use std::fs;

    #[test]
    fn test_default_namespaces() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();

        let table = config.get_soap_namespaces().unwrap();
        assert_eq!(table, NamespaceTable::default());
        assert_eq!(
            config
                .get_soap_endpoint(Transaction::RetrieveDocumentSet)
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_overridden_namespace_keeps_others() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.yaml"),
            "soap:\n  namespaces:\n    xdsb: urn:example:xdsb\n",
        )
        .unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();

        let table = config.get_soap_namespaces().unwrap();
        assert_eq!(table.xdsb, "urn:example:xdsb");
        assert_eq!(table.wsa, ns::ADDRESSING);
    }

    #[test]
    fn test_endpoint_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();

        config
            .set_soap_endpoint(
                Transaction::RegistryStoredQuery,
                "https://registry.example/xds".to_string(),
            )
            .unwrap();

        assert_eq!(
            config
                .get_soap_endpoint(Transaction::RegistryStoredQuery)
                .unwrap()
                .as_deref(),
            Some("https://registry.example/xds")
        );
        assert_eq!(
            config
                .get_soap_endpoint(Transaction::RetrieveDocumentSet)
                .unwrap(),
            None
        );
    }
}
