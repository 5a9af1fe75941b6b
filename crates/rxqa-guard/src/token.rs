//! Access tokens.
//!
//! A token is `base64("1:" + email|date|time|duration + ":" + checksum)`
//! where the checksum is a 32-bit rolling hash of the payload written as
//! eight lowercase hex digits. Times contain colons, so the version is
//! split at the first colon and the checksum at the last.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GuardError, Result};
use crate::window::AccessWindow;

pub const TOKEN_VERSION: &str = "1";

const FIELD_SEPARATOR: char = '|';

/// 32-bit rolling hash (`hash * 31 + unit`) over UTF-16 code units.
pub fn rolling_checksum(data: &str) -> String {
    let hash = data.encode_utf16().fold(0u32, |hash, unit| {
        (hash << 5).wrapping_sub(hash).wrapping_add(u32::from(unit))
    });
    format!("{hash:08x}")
}

/// Who may use the form, and when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken {
    pub email: String,
    /// Start date, `YYYY-MM-DD`.
    pub date: String,
    /// Start time, `HH:MM`.
    pub time: String,
    /// Window length such as `3h`.
    pub duration: String,
}

impl AccessToken {
    pub fn new(
        email: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            date: date.into(),
            time: time.into(),
            duration: duration.into(),
        }
    }

    fn fields(&self) -> [(&'static str, &str); 4] {
        [
            ("email", &self.email),
            ("date", &self.date),
            ("time", &self.time),
            ("duration", &self.duration),
        ]
    }

    fn payload(&self) -> Result<String> {
        for (name, value) in self.fields() {
            if value.is_empty() || value.contains(FIELD_SEPARATOR) {
                return Err(GuardError::TokenField { field: name });
            }
        }
        Ok([
            self.email.as_str(),
            self.date.as_str(),
            self.time.as_str(),
            self.duration.as_str(),
        ]
        .join("|"))
    }

    pub fn encode(&self) -> Result<String> {
        let payload = self.payload()?;
        let checksum = rolling_checksum(&payload);
        Ok(BASE64.encode(format!("{TOKEN_VERSION}:{payload}:{checksum}")))
    }

    pub fn decode(token: &str) -> Result<Self> {
        let bytes = BASE64
            .decode(token.trim())
            .map_err(|source| GuardError::TokenEncoding { source })?;
        let text = String::from_utf8(bytes).map_err(|_| GuardError::TokenNotUtf8)?;

        let (body, checksum) = text.rsplit_once(':').ok_or(GuardError::TokenFormat {
            reason: "missing checksum",
        })?;
        let (version, payload) = body.split_once(':').ok_or(GuardError::TokenFormat {
            reason: "missing version",
        })?;

        if version != TOKEN_VERSION {
            return Err(GuardError::TokenVersion {
                found: version.to_string(),
            });
        }

        let expected = rolling_checksum(payload);
        if checksum != expected {
            return Err(GuardError::TokenChecksum {
                expected,
                actual: checksum.to_string(),
            });
        }

        let mut parts = payload.split(FIELD_SEPARATOR);
        let mut next = |field: &'static str| {
            parts
                .next()
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .ok_or(GuardError::TokenField { field })
        };
        let decoded = Self {
            email: next("email")?,
            date: next("date")?,
            time: next("time")?,
            duration: next("duration")?,
        };
        debug!(date = %decoded.date, time = %decoded.time, duration = %decoded.duration, "Decoded access token");
        Ok(decoded)
    }

    /// Access window described by this token.
    pub fn window(&self) -> Result<AccessWindow> {
        AccessWindow::parse(&self.date, &self.time, &self.duration)
    }
}

/// `base_url?token=<token>` link for `token`.
pub fn access_link(base_url: &str, token: &AccessToken) -> Result<String> {
    Ok(format!("{base_url}?token={}", token.encode()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> AccessToken {
        AccessToken::new("tester@example.com", "2026-10-19", "14:30", "3h")
    }

    #[test]
    fn checksum_is_java_style_string_hash() {
        assert_eq!(rolling_checksum(""), "00000000");
        assert_eq!(rolling_checksum("a"), "00000061");
        assert_eq!(rolling_checksum("hello"), "05e918d2");
        assert_eq!(
            rolling_checksum("tester@example.com|2026-10-19|14:30|3h"),
            "b38c4a4e"
        );
    }

    #[test]
    fn encode_then_decode() {
        let encoded = token().encode().expect("encode");
        assert_eq!(AccessToken::decode(&encoded).expect("decode"), token());
    }

    #[test]
    fn tampered_payload_fails_checksum() {
        let encoded = token().encode().expect("encode");
        let text = String::from_utf8(BASE64.decode(encoded).expect("base64")).expect("utf8");
        let forged = BASE64.encode(text.replace("3h", "9h"));

        let error = AccessToken::decode(&forged).expect_err("forged token");
        assert!(matches!(error, GuardError::TokenChecksum { .. }));
    }

    #[test]
    fn wrong_version_is_rejected() {
        let payload = "tester@example.com|2026-10-19|14:30|3h";
        let forged = BASE64.encode(format!("2:{payload}:{}", rolling_checksum(payload)));
        assert!(matches!(
            AccessToken::decode(&forged),
            Err(GuardError::TokenVersion { found }) if found == "2"
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            AccessToken::decode("not base64!"),
            Err(GuardError::TokenEncoding { .. })
        ));
        assert!(matches!(
            AccessToken::decode(&BASE64.encode("no separators")),
            Err(GuardError::TokenFormat { .. })
        ));
    }

    #[test]
    fn empty_fields_cannot_be_encoded() {
        let token = AccessToken::new("", "2026-10-19", "14:30", "3h");
        assert!(matches!(
            token.encode(),
            Err(GuardError::TokenField { field: "email" })
        ));
    }

    #[test]
    fn link_carries_the_token() {
        let link = access_link("https://qa.example.com/", &token()).expect("link");
        let encoded = link
            .strip_prefix("https://qa.example.com/?token=")
            .expect("prefix");
        assert_eq!(AccessToken::decode(encoded).expect("decode"), token());
    }
}
