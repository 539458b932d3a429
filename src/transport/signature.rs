use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use chrono::{Local, NaiveDateTime};
use md5::{Digest, Md5};

use crate::domain::{AccountSid, AuthToken};

/// Query parameter carrying [`Signature::sig`].
pub const SIG_PARAM: &str = "sig";

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Per-call credentials derived from the account, token, and a timestamp.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature {
    /// `Authorization` header value: URL-safe base64 of `accountSid:timestamp`.
    pub authorization: String,
    /// Uppercase hex MD5 of `accountSid + authToken + timestamp`.
    pub sig: String,
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signature").finish_non_exhaustive()
    }
}

/// Sign with the current local time. The result is only valid for a short window.
pub fn sign(account: &AccountSid, token: &AuthToken) -> Signature {
    sign_at(account, token, Local::now().naive_local())
}

/// Sign with an explicit local timestamp (second precision).
pub fn sign_at(account: &AccountSid, token: &AuthToken, at: NaiveDateTime) -> Signature {
    let timestamp = at.format(TIMESTAMP_FORMAT).to_string();

    let mut hasher = Md5::new();
    hasher.update(account.as_str());
    hasher.update(token.as_str());
    hasher.update(&timestamp);
    let sig = hex::encode_upper(hasher.finalize());

    let authorization = URL_SAFE.encode(format!("{}:{timestamp}", account.as_str()));

    Signature { authorization, sig }
}
