//! Ceremony Query Parameters
//!
//! Multi-step ceremony state survives client-side navigations as query
//! parameters: `email` (URL-safe encoded), `purpose`, `token` (reset step
//! only) and `from` (post-login return path, login step only).
//!
//! Whenever an email address crosses a navigation it is carried in a
//! reversible, URL-safe text encoding; the receiving step decodes it. A
//! decode failure falls back to treating the raw parameter as the email so
//! that downstream validation catches it instead of the page crashing.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use base64ct::{Base64UrlUnpadded, Encoding};

/// Purpose of an in-flight ceremony, carried between steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CeremonyPurpose {
    /// Account registration (signup → code confirmation → complete)
    Registration,
    /// Password reset (request → code confirmation → new password)
    PasswordReset,
    /// Plain login
    Login,
}

impl fmt::Display for CeremonyPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Registration => "registration",
            Self::PasswordReset => "passwordReset",
            Self::Login => "login",
        };
        f.write_str(s)
    }
}

impl FromStr for CeremonyPurpose {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(Self::Registration),
            "passwordReset" => Ok(Self::PasswordReset),
            "login" => Ok(Self::Login),
            _ => Err(()),
        }
    }
}

/// Encode an email address for transport in a query parameter
pub fn encode_email_param(email: &str) -> String {
    Base64UrlUnpadded::encode_string(email.as_bytes())
}

/// Decode an email parameter produced by [`encode_email_param`]
///
/// Falls back to the raw parameter when it does not decode; downstream
/// validation is responsible for rejecting a nonsense address.
pub fn decode_email_param(param: &str) -> String {
    match Base64UrlUnpadded::decode_vec(param) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(email) => email,
            Err(_) => param.to_string(),
        },
        Err(_) => param.to_string(),
    }
}

/// Assemble a query string from key/value pairs, percent-encoding values
pub fn build_query(pairs: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Parse a query string (without the leading `?`) into a map
///
/// Later duplicates win; ceremony pages never rely on repeated keys.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}
