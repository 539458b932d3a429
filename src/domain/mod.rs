//! Domain layer: strong types, routing, and validation (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{DOMESTIC_COUNTRY_CODE, Route, SendRequest, route_for};
pub use response::{SendResponse, TemplateSms};
pub use validation::ValidationError;
pub use value::{AccountSid, AuthToken, ContentType, StatusCode, TemplateData};
