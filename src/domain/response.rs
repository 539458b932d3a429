use crate::domain::value::StatusCode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendResponse {
    pub status_code: StatusCode,
    /// Empty when the provider omits `statusMsg`.
    pub status_msg: String,
    /// Present only when the message was created.
    pub template_sms: Option<TemplateSms>,
}

impl SendResponse {
    /// Returns `true` if the provider accepted the request.
    ///
    /// A decoded response with another status code is an application-level rejection,
    /// not a decoding failure.
    pub fn is_success(&self) -> bool {
        self.status_code.is_success()
    }

    pub fn message_sid(&self) -> Option<&str> {
        self.template_sms
            .as_ref()
            .map(|created| created.sms_message_sid.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TemplateSms {
    pub sms_message_sid: String,
    pub date_created: String,
}
