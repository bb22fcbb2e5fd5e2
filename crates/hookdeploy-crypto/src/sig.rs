use hmac::{Hmac, Mac};
use sha1::Sha1;

use super::errors::CryptoError;

/// Prefix of the `X-Hub-Signature` header value.
pub const SIGNATURE_PREFIX: &str = "sha1=";

type HmacSha1 = Hmac<Sha1>;

/// Webhook signature, as sent in the `X-Hub-Signature` header (`sha1=<hex>`).
pub struct Signature<'a>(pub &'a str);

impl<'a> Signature<'a> {
    /// Check if a signature is valid.
    ///
    /// The comparison runs in constant time.
    pub fn is_valid(&self, body: &[u8], secret: &str) -> Result<bool, CryptoError> {
        let hex_digest =
            self.0
                .strip_prefix(SIGNATURE_PREFIX)
                .ok_or_else(|| CryptoError::MissingSignaturePrefix {
                    sig: self.0.to_string(),
                })?;
        let decoded_signature =
            hex::decode(hex_digest).map_err(|_| CryptoError::InvalidSignatureFormat {
                sig: self.0.to_string(),
            })?;

        let mut hmac = new_hmac(secret)?;
        hmac.update(body);
        Ok(hmac.verify_slice(&decoded_signature).is_ok())
    }

    /// Validate an optional signature header against a raw body.
    ///
    /// Missing, malformed or mismatching signatures are all invalid.
    pub fn validate(header: Option<&str>, body: &[u8], secret: &str) -> bool {
        match header {
            Some(header) => Signature(header).is_valid(body, secret).unwrap_or(false),
            None => false,
        }
    }

    /// Compute the signature header value of a body.
    pub fn sign(body: &[u8], secret: &str) -> Result<String, CryptoError> {
        let mut hmac = new_hmac(secret)?;
        hmac.update(body);
        Ok(format!(
            "{SIGNATURE_PREFIX}{}",
            hex::encode(hmac.finalize().into_bytes())
        ))
    }
}

fn new_hmac(secret: &str) -> Result<HmacSha1, CryptoError> {
    HmacSha1::new_from_slice(secret.as_bytes()).map_err(|_| CryptoError::InvalidSecretKeyLength)
}

#[cfg(test)]
mod tests {
    use super::Signature;

    struct SigSet {
        signature: &'static str,
        body: &'static [u8],
        secret: &'static str,
    }

    // RFC 2202, HMAC-SHA1 test case 2.
    fn valid_sig_set() -> SigSet {
        SigSet {
            signature: "sha1=effcdf6ae5eb2fa2d27416d5f184df9c259a7c79",
            body: b"what do ya want for nothing?",
            secret: "Jefe",
        }
    }

    fn invalid_sig_set() -> SigSet {
        SigSet {
            signature: "sha1=effcdf6ae5eb2fa2d27416d5f184df9c259a7c78",
            body: b"what do ya want for nothing?",
            secret: "Jefe",
        }
    }

    #[test]
    fn test_is_valid_signature_valid() {
        let sigset = valid_sig_set();
        assert!(
            Signature(sigset.signature)
                .is_valid(sigset.body, sigset.secret)
                .unwrap(),
            "signature should be valid"
        );
    }

    #[test]
    fn test_is_valid_signature_invalid() {
        let sigset = invalid_sig_set();
        assert!(
            !Signature(sigset.signature)
                .is_valid(sigset.body, sigset.secret)
                .unwrap(),
            "signature should NOT be valid"
        );
    }

    #[test]
    fn test_sign() {
        let sigset = valid_sig_set();
        assert_eq!(
            Signature::sign(sigset.body, sigset.secret).unwrap(),
            sigset.signature
        );
    }

    #[test]
    fn test_validate_round_trip() {
        let bodies: [&[u8]; 3] = [b"", br#"{"ref": "refs/heads/master"}"#, &[0, 159, 146, 150]];
        for body in bodies {
            let header = Signature::sign(body, "s3cr3t").unwrap();
            assert!(Signature::validate(Some(&header), body, "s3cr3t"));
            assert!(!Signature::validate(Some(&header), body, "another"));
        }
    }

    #[test]
    fn test_validate_rejects_malformed_headers() {
        let sigset = valid_sig_set();
        let without_prefix = sigset.signature.trim_start_matches("sha1=");
        let truncated = &sigset.signature[..sigset.signature.len() - 2];
        let sha256 = sigset.signature.replace("sha1=", "sha256=");

        for header in [None, Some(""), Some(without_prefix), Some(truncated), Some(&sha256[..]), Some("sha1=zz")] {
            assert!(
                !Signature::validate(header, sigset.body, sigset.secret),
                "header {header:?} should NOT be valid"
            );
        }
    }
}
