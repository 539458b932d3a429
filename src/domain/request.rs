use crate::domain::validation::ValidationError;
use crate::domain::value::{AccountSid, TemplateData};

/// Country code that marks a `00`-prefixed destination as domestic.
pub const DOMESTIC_COUNTRY_CODE: &str = "86";

const INTERNATIONAL_PREFIX: &str = "00";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Which Cloopen API a request is sent through.
pub enum Route {
    /// Templated SMS through `/2013-12-26/Accounts/{accountSid}/SMS/TemplateSMS`.
    Domestic,
    /// Free-text SMS through `/v2/account/{accountSid}/international/send`.
    International,
}

impl Route {
    /// Endpoint path for this route.
    pub fn path(self, account: &AccountSid) -> String {
        match self {
            Self::Domestic => format!("/2013-12-26/Accounts/{}/SMS/TemplateSMS", account.as_str()),
            Self::International => format!("/v2/account/{}/international/send", account.as_str()),
        }
    }

    pub fn is_international(self) -> bool {
        self == Self::International
    }
}

/// Classify a comma-joined destination list by its first entry.
///
/// A `00` prefix is an explicit international dialing prefix: the destination is
/// domestic only when the country code that follows is `86`. Destinations without
/// that prefix get `fallback`.
pub fn route_for(to: &str, fallback: Route) -> Route {
    let first = to.split(',').next().unwrap_or_default();
    match first.strip_prefix(INTERNATIONAL_PREFIX) {
        Some(rest) if rest.starts_with(DOMESTIC_COUNTRY_CODE) => Route::Domestic,
        Some(_) => Route::International,
        None => fallback,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A single send request.
///
/// Fields are checked when the request is sent, not when it is built; see
/// [`SendRequest::validate`].
pub struct SendRequest {
    /// Application id (`appId`).
    pub app_id: String,
    /// One or more comma-separated destinations (`to`). The first one decides the route.
    pub to: String,
    /// Template id (`templateId`), required for domestic sends.
    pub template_id: String,
    /// Free text with `{{key}}` placeholders, used for international sends.
    pub template: String,
    /// Template variables (`datas`).
    pub datas: TemplateData,
}

impl SendRequest {
    pub const APP_ID_FIELD: &'static str = "appId";
    pub const TO_FIELD: &'static str = "to";
    pub const TEMPLATE_ID_FIELD: &'static str = "templateId";

    /// Request for a provider-side template.
    pub fn template(
        app_id: impl Into<String>,
        to: impl Into<String>,
        template_id: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            to: to.into(),
            template_id: template_id.into(),
            ..Default::default()
        }
    }

    /// Request with client-side text, substituted from `datas` before sending.
    pub fn text(
        app_id: impl Into<String>,
        to: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            to: to.into(),
            template: template.into(),
            ..Default::default()
        }
    }

    pub fn with_datas(mut self, datas: TemplateData) -> Self {
        self.datas = datas;
        self
    }

    pub fn with_template_id(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = template_id.into();
        self
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Route for this request, recomputed from `to` on every call.
    pub fn route(&self, fallback: Route) -> Route {
        route_for(&self.to, fallback)
    }

    /// Check required fields in order: `appId`, `to`, then `templateId` for domestic sends.
    pub fn validate(&self, route: Route) -> Result<(), ValidationError> {
        if self.app_id.is_empty() {
            return Err(ValidationError::MissingParameter {
                field: Self::APP_ID_FIELD,
            });
        }
        if self.to.is_empty() {
            return Err(ValidationError::MissingParameter {
                field: Self::TO_FIELD,
            });
        }
        if route == Route::Domestic && self.template_id.is_empty() {
            return Err(ValidationError::MissingParameter {
                field: Self::TEMPLATE_ID_FIELD,
            });
        }
        Ok(())
    }

    /// Message text for international sends.
    ///
    /// Each key replaces only the first `{{key}}` occurrence, in `datas` order.
    pub fn render_content(&self) -> String {
        self.datas
            .iter()
            .fold(self.template.clone(), |content, (key, value)| {
                content.replacen(&format!("{{{{{key}}}}}"), value, 1)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_zero_prefix_routes_by_country_code() {
        assert_eq!(
            route_for("0044700900000", Route::Domestic),
            Route::International
        );
        assert_eq!(
            route_for("008613800000000", Route::International),
            Route::Domestic
        );
    }

    #[test]
    fn only_first_destination_is_inspected() {
        assert_eq!(
            route_for("0044700900000,008613800000000", Route::Domestic),
            Route::International
        );
        assert_eq!(
            route_for("008613800000000,0044700900000", Route::International),
            Route::Domestic
        );
    }

    #[test]
    fn unprefixed_destination_uses_fallback() {
        assert_eq!(
            route_for("13800000000", Route::International),
            Route::International
        );
        assert_eq!(route_for("13800000000", Route::Domestic), Route::Domestic);
        assert_eq!(route_for("", Route::International), Route::International);
    }

    #[test]
    fn route_paths_embed_account() {
        let account = AccountSid::new("A1").unwrap();
        assert_eq!(
            Route::International.path(&account),
            "/v2/account/A1/international/send"
        );
        assert_eq!(
            Route::Domestic.path(&account),
            "/2013-12-26/Accounts/A1/SMS/TemplateSMS"
        );
    }

    #[test]
    fn validate_rejects_empty_app_id_first() {
        let request = SendRequest::template("", "", "");
        assert_eq!(
            request.validate(Route::Domestic),
            Err(ValidationError::MissingParameter { field: "appId" })
        );

        let request = SendRequest::template("", "008613800000000", "1");
        assert_eq!(
            request.validate(Route::Domestic),
            Err(ValidationError::MissingParameter { field: "appId" })
        );
    }

    #[test]
    fn validate_rejects_empty_to() {
        let request = SendRequest::template("app", "", "1");
        assert_eq!(
            request.validate(Route::Domestic),
            Err(ValidationError::MissingParameter { field: "to" })
        );
    }

    #[test]
    fn template_id_is_required_only_for_domestic() {
        let request = SendRequest::text("app", "0044700900000", "hi");
        assert_eq!(
            request.validate(Route::Domestic),
            Err(ValidationError::MissingParameter {
                field: "templateId"
            })
        );
        assert_eq!(request.validate(Route::International), Ok(()));
    }

    #[test]
    fn render_content_substitutes_placeholders() {
        let request = SendRequest::text("A1", "008613800000000", "Hello {{name}}")
            .with_datas([("name", "Bob")].into_iter().collect());
        assert_eq!(request.render_content(), "Hello Bob");
    }

    #[test]
    fn render_content_replaces_first_occurrence_only() {
        let request = SendRequest::text("A1", "0044", "{{code}} and {{code}}, {{missing}}")
            .with_datas([("code", "42")].into_iter().collect());
        assert_eq!(request.render_content(), "42 and {{code}}, {{missing}}");
    }
}
