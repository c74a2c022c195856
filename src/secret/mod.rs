//! Secret module — parsing, decoding, key selection and rendering.
//!
//! This module provides:
//! - `Secret`, `SecretList` and `SecretType` (`types`)
//! - Type → strategy classification and value decoding (`decode`)
//! - The key selection rules (`resolve`)
//! - Text / JSON / YAML output (`render`)

pub mod decode;
pub mod render;
pub mod resolve;
pub mod types;

// Re-export the most commonly used items.
pub use decode::{classify, decode, DecodeStrategy};
pub use render::{render, KeyValue, OutputFormat};
pub use resolve::{resolve, Request, Resolution, ALL_OPTION};
pub use types::{Metadata, Secret, SecretList, SecretType};
