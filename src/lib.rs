//! Typed Rust client for the Cloopen (Ronglian) SMS HTTP API.
//!
//! The crate is split into a domain layer of strong types (routing and
//! validation live here), a transport layer for wire-format details (request
//! signing, JSON/XML bodies) and a small client layer orchestrating requests.
//!
//! ```rust,no_run
//! use cloopen::{CloopenClient, ContentType, SendRequest, TemplateData};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), cloopen::CloopenError> {
//!     let client = CloopenClient::builder("account-sid", "auth-token")?
//!         .content_type(ContentType::Json)
//!         .build()?;
//!     let request = SendRequest::template("app-id", "0086138000000000", "1")
//!         .with_datas(TemplateData::positional(["123456", "5"]));
//!     let response = client.send_sms(&request).await?;
//!     println!("{} {}", response.status_code, response.is_success());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{CloopenClient, CloopenClientBuilder, CloopenError, Config, PreparedRequest};
pub use domain::{
    AccountSid, AuthToken, ContentType, Route, SendRequest, SendResponse, StatusCode,
    TemplateData, TemplateSms, ValidationError,
};
pub use transport::{Signature, sign, sign_at};
