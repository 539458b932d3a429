//! Transport layer: request signing and wire-format details (serialization/deserialization).

mod send_sms;
mod signature;

pub use send_sms::{decode_send_response, encode_send_body};
pub use signature::{SIG_PARAM, Signature, sign, sign_at};
