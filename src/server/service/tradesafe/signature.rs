//! Webhook signature verification.
//!
//! TradeSafe signs each notification with HMAC-SHA256 over the raw request body using
//! the shared webhook secret and sends the hex digest in `X-TradeSafe-Signature`,
//! optionally prefixed with `sha256=`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::server::error::payment::PaymentError;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "x-tradesafe-signature";

/// Checks `signature` against the HMAC of `body`.
///
/// The digest comparison is constant time. A missing header, non-hex value or mismatch
/// all fail the same way.
pub fn verify(secret: &str, body: &[u8], signature: Option<&str>) -> Result<(), PaymentError> {
    let signature = signature.ok_or(PaymentError::InvalidSignature)?.trim();
    let signature = signature.strip_prefix("sha256=").unwrap_or(signature);

    let expected = hex::decode(signature).map_err(|_| PaymentError::InvalidSignature)?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| PaymentError::InvalidSignature)?;
    mac.update(body);

    mac.verify_slice(&expected)
        .map_err(|_| PaymentError::InvalidSignature)
}

/// Hex HMAC-SHA256 of `body`, as TradeSafe would send it.
#[cfg(test)]
pub fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";
    const BODY: &[u8] = br#"{"id":"txn-1","state":"FUNDS_RECEIVED"}"#;

    /// Tests a correctly signed body, with and without the prefix.
    ///
    /// Expected: Ok
    #[test]
    fn accepts_valid_signature() {
        let signature = sign(SECRET, BODY);

        assert!(verify(SECRET, BODY, Some(&signature)).is_ok());
        assert!(verify(SECRET, BODY, Some(&format!("sha256={}", signature))).is_ok());
        assert!(verify(SECRET, BODY, Some(&signature.to_uppercase())).is_ok());
    }

    /// Tests tampered bodies and wrong secrets.
    ///
    /// Expected: Err(InvalidSignature)
    #[test]
    fn rejects_mismatch() {
        let signature = sign(SECRET, BODY);

        assert!(matches!(
            verify(SECRET, br#"{"id":"txn-1","state":"COMPLETED"}"#, Some(&signature)),
            Err(PaymentError::InvalidSignature)
        ));
        assert!(matches!(
            verify("other-secret", BODY, Some(&signature)),
            Err(PaymentError::InvalidSignature)
        ));
    }

    /// Tests missing and malformed headers.
    ///
    /// Expected: Err(InvalidSignature)
    #[test]
    fn rejects_missing_or_malformed_header() {
        assert!(matches!(
            verify(SECRET, BODY, None),
            Err(PaymentError::InvalidSignature)
        ));
        assert!(matches!(
            verify(SECRET, BODY, Some("not-hex")),
            Err(PaymentError::InvalidSignature)
        ));
        assert!(matches!(
            verify(SECRET, BODY, Some("")),
            Err(PaymentError::InvalidSignature)
        ));
    }
}
