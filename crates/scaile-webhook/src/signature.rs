//! HMAC-SHA256 webhook signatures.
//!
//! Signatures are computed over the exact request body bytes and transported
//! as lowercase hex in the `X-Signature` header. Verification compares the
//! MAC in constant time through [`Mac::verify_slice`].

use std::fmt;
use std::sync::Arc;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{Error, Result};

type HmacSha256 = Hmac<Sha256>;

/// Name of the header carrying the payload signature (`X-Signature`).
///
/// Lowercase, as required by `http::HeaderName::from_static`.
pub const SIGNATURE_HEADER: &str = "x-signature";

/// Length of a hex-encoded SHA-256 MAC.
const SIGNATURE_HEX_LEN: usize = 64;

/// Shared secret used as the HMAC key.
///
/// The value is never printed by [`Debug`].
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookSecret(Arc<str>);

impl WebhookSecret {
    /// Creates a new secret, rejecting empty values.
    pub fn new(secret: impl AsRef<str>) -> Result<Self> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(Error::configuration().with_message("Webhook secret cannot be empty"));
        }

        Ok(Self(Arc::from(secret)))
    }

    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for WebhookSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WebhookSecret([REDACTED])")
    }
}

/// Signs and verifies webhook payloads with a fixed secret.
#[derive(Clone)]
pub struct SignatureVerifier {
    mac: HmacSha256,
}

impl fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignatureVerifier").finish_non_exhaustive()
    }
}

impl SignatureVerifier {
    /// Creates a verifier keyed with the given secret.
    pub fn new(secret: &WebhookSecret) -> Result<Self> {
        let mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| {
            Error::configuration()
                .with_message("Webhook secret is not a valid HMAC key")
                .with_source(e.to_string())
        })?;

        Ok(Self { mac })
    }

    /// Computes the lowercase hex signature of `body`.
    pub fn sign(&self, body: &[u8]) -> String {
        let mut mac = self.mac.clone();
        mac.update(body);
        hex::encode(mac.finalize().into_bytes())
    }

    /// Checks `signature` against the MAC of the raw `body`.
    ///
    /// Returns `false` when the signature is absent, is not exactly 64
    /// lowercase hex characters, or does not match.
    #[must_use]
    pub fn verify(&self, body: &[u8], signature: Option<&str>) -> bool {
        let Some(expected) = signature.and_then(decode_signature) else {
            return false;
        };

        let mut mac = self.mac.clone();
        mac.update(body);
        mac.verify_slice(&expected).is_ok()
    }
}

/// Decodes a canonical lowercase hex signature.
fn decode_signature(signature: &str) -> Option<Vec<u8>> {
    let canonical = signature.len() == SIGNATURE_HEX_LEN
        && signature
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));

    if !canonical {
        return None;
    }

    hex::decode(signature).ok()
}
