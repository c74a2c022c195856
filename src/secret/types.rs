//! Secret, SecretList and SecretType as they come out of `kubectl get -o json`.
//!
//! Only the fields the decoder needs are kept. `data` lives in a
//! `BTreeMap` so every consumer sees keys in ascending order.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::decode::{classify, DecodeStrategy};
use crate::errors::{Result, ViewSecretError};

/// A single Kubernetes secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Secret {
    /// Key → base64-encoded value. Absent or `null` data is empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,

    /// Declared secret type. Missing means `Other("")`.
    #[serde(default, rename = "type")]
    pub secret_type: SecretType,
}

/// Name and namespace, used for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub namespace: String,
}

/// The result of `kubectl get secrets -o json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SecretList {
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Secret>,
}

/// Known secret types, plus a catch-all that keeps the raw string.
///
/// refs: <https://kubernetes.io/docs/concepts/configuration/secret/#secret-types>
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SecretType {
    Opaque,
    ServiceAccountToken,
    DockerCfg,
    DockerConfigJson,
    BasicAuth,
    SshAuth,
    Tls,
    BootstrapToken,
    HelmRelease,
    Other(String),
}

impl SecretType {
    pub fn as_str(&self) -> &str {
        match self {
            SecretType::Opaque => "Opaque",
            SecretType::ServiceAccountToken => "kubernetes.io/service-account-token",
            SecretType::DockerCfg => "kubernetes.io/dockercfg",
            SecretType::DockerConfigJson => "kubernetes.io/dockerconfigjson",
            SecretType::BasicAuth => "kubernetes.io/basic-auth",
            SecretType::SshAuth => "kubernetes.io/ssh-auth",
            SecretType::Tls => "kubernetes.io/tls",
            SecretType::BootstrapToken => "bootstrap.kubernetes.io/token",
            SecretType::HelmRelease => "helm.sh/release.v1",
            SecretType::Other(raw) => raw,
        }
    }

    /// The decode strategy for values of this type.
    pub fn strategy(&self) -> DecodeStrategy {
        classify(self.as_str())
    }
}

impl Default for SecretType {
    fn default() -> Self {
        SecretType::Other(String::new())
    }
}

impl From<&str> for SecretType {
    fn from(raw: &str) -> Self {
        match raw {
            "Opaque" => SecretType::Opaque,
            "kubernetes.io/service-account-token" => SecretType::ServiceAccountToken,
            "kubernetes.io/dockercfg" => SecretType::DockerCfg,
            "kubernetes.io/dockerconfigjson" => SecretType::DockerConfigJson,
            "kubernetes.io/basic-auth" => SecretType::BasicAuth,
            "kubernetes.io/ssh-auth" => SecretType::SshAuth,
            "kubernetes.io/tls" => SecretType::Tls,
            "bootstrap.kubernetes.io/token" => SecretType::BootstrapToken,
            "helm.sh/release.v1" => SecretType::HelmRelease,
            other => SecretType::Other(other.to_string()),
        }
    }
}

impl From<String> for SecretType {
    fn from(raw: String) -> Self {
        SecretType::from(raw.as_str())
    }
}

impl From<SecretType> for String {
    fn from(t: SecretType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for SecretType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Secret {
    /// Parse the JSON of a single secret.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|source| ViewSecretError::Parse {
            shape: "secret",
            source,
        })
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn namespace(&self) -> &str {
        &self.metadata.namespace
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Data keys in ascending order.
    pub fn keys(&self) -> Vec<String> {
        self.data.keys().cloned().collect()
    }
}

impl SecretList {
    /// Parse the JSON of a secret list.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|source| ViewSecretError::Parse {
            shape: "secret list",
            source,
        })
    }

    /// Secret names in ascending order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.items.iter().map(|s| s.name().to_string()).collect();
        names.sort();
        names.dedup();
        names
    }

    /// Consume the list into a name → secret lookup.
    pub fn into_lookup(self) -> BTreeMap<String, Secret> {
        self.items
            .into_iter()
            .map(|s| (s.metadata.name.clone(), s))
            .collect()
    }
}

/// Treat an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
