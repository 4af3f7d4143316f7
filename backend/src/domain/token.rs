//! Bearer token passed through from callers to the backend.
//!
//! The gateway never validates tokens; it only normalises the header value and
//! keeps the secret out of logs. Use [`BearerToken::fingerprint`] whenever a
//! token needs to be correlated in log output.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

const BEARER_PREFIX: &str = "Bearer ";
const BEARER_SCHEME: &str = "bearer";
const FINGERPRINT_HEX_LEN: usize = 12;

/// An `Authorization` header value of the form `Bearer <token>`.
///
/// # Examples
/// ```
/// use oncare_gateway::domain::BearerToken;
///
/// let token = BearerToken::parse("abc").expect("non-blank");
/// assert_eq!(token.header_value(), "Bearer abc");
/// assert!(!format!("{token:?}").contains("abc"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Normalise a raw header or cookie value. Returns `None` for blank input
    /// so a missing token is simply not forwarded.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let secret = strip_scheme(raw.trim()).trim();
        if secret.is_empty() {
            return None;
        }
        Some(Self(Zeroizing::new(format!("{BEARER_PREFIX}{secret}"))))
    }

    /// Full header value including the `Bearer ` prefix.
    #[must_use]
    pub fn header_value(&self) -> &str {
        self.0.as_str()
    }

    /// Short SHA-256 fingerprint safe to log.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        let mut encoded = hex::encode(digest);
        encoded.truncate(FINGERPRINT_HEX_LEN);
        encoded
    }
}

fn strip_scheme(value: &str) -> &str {
    match value.split_once(char::is_whitespace) {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case(BEARER_SCHEME) => rest,
        _ if value.eq_ignore_ascii_case(BEARER_SCHEME) => "",
        _ => value,
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken")
            .field(&format_args!("sha256:{}", self.fingerprint()))
            .finish()
    }
}
