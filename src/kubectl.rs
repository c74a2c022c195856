//! Fetching secrets through `kubectl`.
//!
//! One blocking `kubectl get ... -o json` per call; stdout is buffered in
//! full and handed back as bytes.

use std::process::Command;

use tracing::debug;

use crate::errors::{Result, ViewSecretError};

/// Where secret JSON comes from.
pub trait SecretSource {
    /// JSON of a single secret.
    fn get_secret(&self, name: &str) -> Result<Vec<u8>>;

    /// JSON of every secret in the target namespace.
    fn list_secrets(&self) -> Result<Vec<u8>>;
}

/// `kubectl` invocation settings shared by every call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Kubectl {
    pub binary: String,
    pub namespace: Option<String>,
    pub kubeconfig: Option<String>,
    pub context: Option<String>,
    pub impersonate: Option<String>,
    pub impersonate_groups: Vec<String>,
}

impl Kubectl {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            ..Self::default()
        }
    }

    /// `get secret <name> -o json` plus the shared flags.
    pub fn get_secret_args(&self, name: &str) -> Vec<String> {
        let mut args = vec![
            "get".to_string(),
            "secret".to_string(),
            name.to_string(),
            "-o".to_string(),
            "json".to_string(),
        ];
        args.extend(self.common_args());
        args
    }

    /// `get secrets -o json` plus the shared flags.
    pub fn list_secrets_args(&self) -> Vec<String> {
        let mut args = vec![
            "get".to_string(),
            "secrets".to_string(),
            "-o".to_string(),
            "json".to_string(),
        ];
        args.extend(self.common_args());
        args
    }

    fn common_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        let flags = [
            ("-n", &self.namespace),
            ("--kubeconfig", &self.kubeconfig),
            ("--context", &self.context),
            ("--as", &self.impersonate),
        ];
        for (flag, value) in flags {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                args.push(flag.to_string());
                args.push(v.to_string());
            }
        }
        for group in &self.impersonate_groups {
            args.push("--as-group".to_string());
            args.push(group.clone());
        }
        args
    }

    fn run(&self, args: &[String]) -> Result<Vec<u8>> {
        debug!(binary = self.binary.as_str(), ?args, "running kubectl");

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|e| ViewSecretError::KubectlNotFound(format!("{}: {e}", self.binary)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                match output.status.code() {
                    Some(code) => format!("exited with code {code}"),
                    None => "terminated by signal".to_string(),
                }
            } else {
                stderr
            };
            return Err(ViewSecretError::Kubectl(message));
        }

        debug!(bytes = output.stdout.len(), "kubectl returned");
        Ok(output.stdout)
    }
}

impl SecretSource for Kubectl {
    fn get_secret(&self, name: &str) -> Result<Vec<u8>> {
        self.run(&self.get_secret_args(name))
    }

    fn list_secrets(&self) -> Result<Vec<u8>> {
        self.run(&self.list_secrets_args())
    }
}
