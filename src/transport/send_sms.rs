use serde::{Deserialize, Serialize};

use crate::domain::{ContentType, Route, SendRequest, SendResponse, StatusCode, TemplateSms};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("XML encoding failed: {0}")]
    XmlEncode(#[source] quick_xml::DeError),

    #[error("invalid XML response: {0}")]
    XmlDecode(#[source] quick_xml::DeError),

    #[error("response body is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("response body is empty")]
    EmptyBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "TemplateSMS", rename_all = "camelCase")]
struct TemplateSmsJsonBody {
    app_id: String,
    template_id: String,
    datas: Vec<String>,
    to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "TemplateSMS", rename_all = "camelCase")]
struct TemplateSmsXmlBody {
    app_id: String,
    template_id: String,
    datas: XmlDatas,
    to: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
struct XmlDatas {
    #[serde(default)]
    data: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "InternationalSMS", rename_all = "camelCase")]
struct InternationalSmsBody {
    app_id: String,
    content: String,
    mobile: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendResponseWire {
    status_code: String,
    #[serde(default)]
    status_msg: Option<String>,
    #[serde(default, rename = "TemplateSMS", alias = "templateSMS")]
    template_sms: Option<TemplateSmsWire>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateSmsWire {
    #[serde(default)]
    sms_message_sid: String,
    #[serde(default)]
    date_created: String,
}

pub fn encode_send_body(
    request: &SendRequest,
    route: Route,
    content_type: ContentType,
) -> Result<Vec<u8>, TransportError> {
    match (route, content_type) {
        (Route::International, content_type) => {
            let body = InternationalSmsBody {
                app_id: request.app_id.clone(),
                content: request.render_content(),
                mobile: request.to.clone(),
            };
            match content_type {
                ContentType::Json => Ok(serde_json::to_vec(&body)?),
                ContentType::Xml => to_xml(&body),
            }
        }
        (Route::Domestic, ContentType::Json) => {
            let body = TemplateSmsJsonBody {
                app_id: request.app_id.clone(),
                template_id: request.template_id.clone(),
                datas: positional_datas(request),
                to: request.to.clone(),
            };
            Ok(serde_json::to_vec(&body)?)
        }
        (Route::Domestic, ContentType::Xml) => {
            let body = TemplateSmsXmlBody {
                app_id: request.app_id.clone(),
                template_id: request.template_id.clone(),
                datas: XmlDatas {
                    data: positional_datas(request),
                },
                to: request.to.clone(),
            };
            to_xml(&body)
        }
    }
}

fn positional_datas(request: &SendRequest) -> Vec<String> {
    request.datas.values().map(str::to_owned).collect()
}

fn to_xml<T: Serialize>(body: &T) -> Result<Vec<u8>, TransportError> {
    let xml = quick_xml::se::to_string(body).map_err(TransportError::XmlEncode)?;
    Ok(format!("{XML_DECLARATION}{xml}").into_bytes())
}

pub fn decode_send_response(
    content_type: ContentType,
    body: &[u8],
) -> Result<SendResponse, TransportError> {
    let text = std::str::from_utf8(body)?;
    if text.trim().is_empty() {
        return Err(TransportError::EmptyBody);
    }

    let parsed: SendResponseWire = match content_type {
        ContentType::Json => serde_json::from_str(text)?,
        ContentType::Xml => quick_xml::de::from_str(text).map_err(TransportError::XmlDecode)?,
    };

    Ok(SendResponse {
        status_code: StatusCode::new(parsed.status_code.trim()),
        status_msg: parsed.status_msg.unwrap_or_default(),
        template_sms: parsed
            .template_sms
            .filter(|created| !created.sms_message_sid.trim().is_empty())
            .map(|created| TemplateSms {
                sms_message_sid: created.sms_message_sid,
                date_created: created.date_created,
            }),
    })
}
