//! Keystore parameters for jar signing.

use std::path::PathBuf;

fn default_keystore() -> PathBuf {
    PathBuf::from("src/main/deploy/keystore.jks")
}

fn default_alias() -> String {
    "myalias".to_string()
}

fn default_store_type() -> String {
    "jks".to_string()
}

/// Location and credentials of the signing keystore.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct KeystoreSettings {
    /// Keystore file. Must exist unless the existence check is skipped.
    #[serde(default = "default_keystore")]
    pub keystore: PathBuf,

    /// Alias used when accessing the keystore.
    #[serde(default = "default_alias")]
    pub alias: String,

    /// Password of the keystore itself.
    #[serde(default)]
    pub store_password: String,

    /// Password of the key within the keystore; defaults to the store
    /// password when unset.
    #[serde(default)]
    pub key_password: Option<String>,

    /// Keystore type.
    #[serde(default = "default_store_type")]
    pub store_type: String,

    /// Extra arguments passed through to the signing tool verbatim
    /// (for example `-tsa` / `-tsacert`).
    #[serde(default)]
    pub additional_signer_args: Vec<String>,
}

impl Default for KeystoreSettings {
    fn default() -> Self {
        Self {
            keystore: default_keystore(),
            alias: default_alias(),
            store_password: String::new(),
            key_password: None,
            store_type: default_store_type(),
            additional_signer_args: Vec::new(),
        }
    }
}
