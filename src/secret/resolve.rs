//! Deciding what to decode from a secret.
//!
//! Rules, first match wins:
//! 1. no data → `SecretEmpty`
//! 2. exactly one key → that key, flagged as auto-selected, whatever was asked
//! 3. `decode_all` → every key, ascending
//! 4. explicit key → that key, or `KeyNotFound`
//! 5. otherwise ask the prompter for `all` or one key, then re-apply 3 or 4
//!
//! Rule 2 precedes `decode_all`: a one-key secret is always answered with
//! that key and reported as auto-selected, even under `-a`.

use tracing::debug;

use super::decode::DecodeStrategy;
use super::render::KeyValue;
use super::types::Secret;
use crate::errors::{Result, ViewSecretError};
use crate::prompt::Prompter;

/// Prompt option that selects every key.
pub const ALL_OPTION: &str = "all";

/// What the caller asked for.
#[derive(Debug, Clone, Copy, Default)]
pub struct Request<'a> {
    pub decode_all: bool,
    pub key: Option<&'a str>,
}

/// The decoded selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Single {
        entry: KeyValue,
        /// Set when the secret has only one key and it was picked without asking.
        auto_selected: bool,
    },
    Multi(Vec<KeyValue>),
}

impl Resolution {
    pub fn key_values(&self) -> &[KeyValue] {
        match self {
            Resolution::Single { entry, .. } => std::slice::from_ref(entry),
            Resolution::Multi(all) => all,
        }
    }

    pub fn into_key_values(self) -> Vec<KeyValue> {
        match self {
            Resolution::Single { entry, .. } => vec![entry],
            Resolution::Multi(all) => all,
        }
    }
}

/// Apply the selection rules to `secret`.
///
/// `prompter` is consulted at most once, and only when the secret has two
/// or more keys and neither `decode_all` nor a key was requested.
pub fn resolve(
    secret: &Secret,
    request: Request<'_>,
    prompter: &mut dyn Prompter,
) -> Result<Resolution> {
    let strategy = secret.secret_type.strategy();
    debug!(secret = secret.name(), ?strategy, keys = secret.data.len(), "resolving");

    let mut decode_all = request.decode_all;
    let mut key = request.key.filter(|k| !k.is_empty()).map(str::to_owned);

    loop {
        if secret.is_empty() {
            return Err(ViewSecretError::SecretEmpty);
        }

        if secret.data.len() == 1 {
            if let Some((only, raw)) = secret.data.iter().next() {
                debug!(key = only.as_str(), "single key, auto-selecting");
                return Ok(Resolution::Single {
                    entry: decode_entry(only, raw, strategy)?,
                    auto_selected: true,
                });
            }
        }

        if decode_all {
            return decode_every_key(secret, strategy).map(Resolution::Multi);
        }

        if let Some(wanted) = key.as_deref() {
            let raw = secret
                .data
                .get(wanted)
                .ok_or_else(|| ViewSecretError::KeyNotFound(wanted.to_string()))?;
            return Ok(Resolution::Single {
                entry: decode_entry(wanted, raw, strategy)?,
                auto_selected: false,
            });
        }

        let choice = prompter.select(
            "Select a key to decode",
            &format!(
                "secret '{}' has {} keys; choose '{ALL_OPTION}' to decode every key",
                secret.name(),
                secret.data.len()
            ),
            &key_options(secret),
        )?;
        debug!(choice = choice.as_str(), "prompt answered");

        // Either branch ends the loop on the next pass.
        if choice == ALL_OPTION {
            decode_all = true;
        } else {
            key = Some(choice);
        }
    }
}

/// `["all", <keys ascending>...]`
pub fn key_options(secret: &Secret) -> Vec<String> {
    let mut options = vec![ALL_OPTION.to_string()];
    options.extend(secret.keys());
    options
}

/// Decode every key in ascending order, stopping at the first failure.
pub fn decode_every_key(secret: &Secret, strategy: DecodeStrategy) -> Result<Vec<KeyValue>> {
    // BTreeMap iteration is already ascending.
    secret
        .data
        .iter()
        .map(|(key, raw)| decode_entry(key, raw, strategy))
        .collect()
}

fn decode_entry(key: &str, raw: &str, strategy: DecodeStrategy) -> Result<KeyValue> {
    let value = strategy
        .decode(raw)
        .map_err(|source| ViewSecretError::Decode {
            key: key.to_string(),
            source,
        })?;
    Ok(KeyValue::new(key, value))
}
