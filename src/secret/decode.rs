//! Decoding of secret values.
//!
//! Kubernetes stores every value base64-encoded. Some secret types wrap
//! the payload further:
//! - Helm releases are base64 (by Helm) of gzip, then base64 again (by Kubernetes).
//! - Docker configs are JSON blobs that read better pretty-printed.

use std::io::Read;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use flate2::read::GzDecoder;

use crate::errors::DecodeError;

/// Standard alphabet with required padding, tolerating non-zero trailing bits
/// the way kubectl's own decoder does (`YR==` reads as `a`).
const STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// First two bytes of every gzip stream.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// How a value of a given secret type is turned back into plaintext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStrategy {
    PlainBase64,
    DoubleBase64Gzip,
    JsonPrettyPrint,
}

/// Map a declared secret type to its decode strategy.
///
/// Exact, case-sensitive match. Anything unrecognised (including the
/// empty string) decodes as plain base64.
pub fn classify(declared: &str) -> DecodeStrategy {
    match declared {
        "helm.sh/release.v1" => DecodeStrategy::DoubleBase64Gzip,
        "kubernetes.io/dockercfg" | "kubernetes.io/dockerconfigjson" => {
            DecodeStrategy::JsonPrettyPrint
        }
        "Opaque"
        | "kubernetes.io/tls"
        | "kubernetes.io/ssh-auth"
        | "kubernetes.io/basic-auth"
        | "kubernetes.io/service-account-token"
        | "bootstrap.kubernetes.io/token" => DecodeStrategy::PlainBase64,
        _ => DecodeStrategy::PlainBase64,
    }
}

impl DecodeStrategy {
    /// Decode a raw value with this strategy.
    pub fn decode(self, raw: &str) -> Result<String, DecodeError> {
        decode(self, raw)
    }
}

/// Decode a raw secret value.
pub fn decode(strategy: DecodeStrategy, raw: &str) -> Result<String, DecodeError> {
    match strategy {
        DecodeStrategy::PlainBase64 => {
            let bytes = STANDARD.decode(raw).map_err(DecodeError::Base64)?;
            Ok(into_text(bytes))
        }
        DecodeStrategy::DoubleBase64Gzip => decode_helm(raw),
        DecodeStrategy::JsonPrettyPrint => decode_docker_config(raw),
    }
}

fn decode_helm(raw: &str) -> Result<String, DecodeError> {
    let outer = STANDARD.decode(raw).map_err(DecodeError::OuterBase64)?;
    let compressed = STANDARD.decode(&outer).map_err(DecodeError::InnerBase64)?;

    if !compressed.starts_with(&GZIP_MAGIC) {
        return Err(DecodeError::GzipHeader(
            "payload does not start with gzip magic bytes".into(),
        ));
    }

    let mut plain = Vec::new();
    GzDecoder::new(compressed.as_slice())
        .read_to_end(&mut plain)
        .map_err(DecodeError::GzipRead)?;

    Ok(into_text(plain))
}

/// Non-JSON payloads (legacy dockercfg, hand-written blobs) pass through as-is.
fn decode_docker_config(raw: &str) -> Result<String, DecodeError> {
    let bytes = STANDARD.decode(raw).map_err(DecodeError::Base64)?;

    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&bytes) {
        if let Ok(pretty) = serde_json::to_string_pretty(&value) {
            return Ok(pretty);
        }
    }

    Ok(into_text(bytes))
}

fn into_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(input: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(input).unwrap();
        enc.finish().unwrap()
    }

    fn helm_encode(plain: &str) -> String {
        let once = STANDARD.encode(gzip(plain.as_bytes()));
        STANDARD.encode(once)
    }

    #[test]
    fn classify_helm() {
        assert_eq!(
            classify("helm.sh/release.v1"),
            DecodeStrategy::DoubleBase64Gzip
        );
    }

    #[test]
    fn classify_docker_variants() {
        assert_eq!(
            classify("kubernetes.io/dockercfg"),
            DecodeStrategy::JsonPrettyPrint
        );
        assert_eq!(
            classify("kubernetes.io/dockerconfigjson"),
            DecodeStrategy::JsonPrettyPrint
        );
    }

    #[test]
    fn classify_falls_back_to_plain_base64() {
        for declared in ["", "Opaque", "opaque", "HELM.SH/RELEASE.V1", "x/y", " "] {
            assert_eq!(classify(declared), DecodeStrategy::PlainBase64);
        }
    }

    #[test]
    fn plain_base64_decodes() {
        assert_eq!(
            decode(DecodeStrategy::PlainBase64, "dGVzdAo=").unwrap(),
            "test\n"
        );
    }

    #[test]
    fn plain_base64_reports_offset() {
        let err = decode(DecodeStrategy::PlainBase64, "dGVzdAo}}}=").unwrap_err();
        match err {
            DecodeError::Base64(base64::DecodeError::InvalidByte(offset, byte)) => {
                assert_eq!(offset, 7);
                assert_eq!(byte, b'}');
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn plain_base64_rejects_url_safe_alphabet() {
        // "-_" are only valid in the URL-safe alphabet.
        assert!(decode(DecodeStrategy::PlainBase64, "-_-_").is_err());
    }

    #[test]
    fn trailing_bits_are_tolerated() {
        // "YR==" carries non-zero bits past the final byte; kubectl reads it as "a".
        assert_eq!(decode(DecodeStrategy::PlainBase64, "YR==").unwrap(), "a");
        assert_eq!(
            decode(DecodeStrategy::JsonPrettyPrint, "YR==").unwrap(),
            "a"
        );
    }

    #[test]
    fn padding_is_still_required() {
        assert!(matches!(
            decode(DecodeStrategy::PlainBase64, "YQ"),
            Err(DecodeError::Base64(_))
        ));
    }

    #[test]
    fn helm_round_trip() {
        let raw = helm_encode("test\n");
        assert_eq!(
            decode(DecodeStrategy::DoubleBase64Gzip, &raw).unwrap(),
            "test\n"
        );
    }

    #[test]
    fn helm_outer_layer_failure() {
        let err = decode(DecodeStrategy::DoubleBase64Gzip, "not base64!").unwrap_err();
        assert!(matches!(err, DecodeError::OuterBase64(_)));
    }

    #[test]
    fn helm_inner_layer_failure() {
        let raw = STANDARD.encode("not base64!");
        let err = decode(DecodeStrategy::DoubleBase64Gzip, &raw).unwrap_err();
        assert!(matches!(err, DecodeError::InnerBase64(_)));
    }

    #[test]
    fn helm_without_gzip_header() {
        let raw = STANDARD.encode(STANDARD.encode("plain text"));
        let err = decode(DecodeStrategy::DoubleBase64Gzip, &raw).unwrap_err();
        assert!(matches!(err, DecodeError::GzipHeader(_)));
    }

    #[test]
    fn helm_truncated_stream() {
        let mut compressed = gzip(b"some longer helm release payload\n");
        compressed.truncate(compressed.len() - 6);
        let raw = STANDARD.encode(STANDARD.encode(compressed));
        let err = decode(DecodeStrategy::DoubleBase64Gzip, &raw).unwrap_err();
        assert!(matches!(err, DecodeError::GzipRead(_)));
    }

    #[test]
    fn docker_config_is_pretty_printed() {
        let raw = STANDARD.encode(r#"{"a":1}"#);
        assert_eq!(
            decode(DecodeStrategy::JsonPrettyPrint, &raw).unwrap(),
            "{\n  \"a\": 1\n}"
        );
    }

    #[test]
    fn docker_config_nested() {
        let raw = STANDARD.encode(r#"{"auths":{"registry.example.com":{"auth":"dXNlcjpwYXNz"}}}"#);
        let want = r#"{
  "auths": {
    "registry.example.com": {
      "auth": "dXNlcjpwYXNz"
    }
  }
}"#;
        assert_eq!(decode(DecodeStrategy::JsonPrettyPrint, &raw).unwrap(), want);
    }

    #[test]
    fn docker_config_invalid_json_passes_through() {
        let raw = STANDARD.encode("{registry: not-json");
        assert_eq!(
            decode(DecodeStrategy::JsonPrettyPrint, &raw).unwrap(),
            "{registry: not-json"
        );
    }

    #[test]
    fn docker_config_bad_base64_fails() {
        assert!(decode(DecodeStrategy::JsonPrettyPrint, "%%%").is_err());
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let raw = STANDARD.encode([0x66, 0x6f, 0xff, 0x6f]);
        assert_eq!(
            decode(DecodeStrategy::PlainBase64, &raw).unwrap(),
            "fo\u{fffd}o"
        );
    }
}
