use std::io;

use cloopen::{CloopenClient, ContentType, SendRequest, TemplateData};
use tracing_subscriber::EnvFilter;

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let account = required_env("CLOOPEN_ACCOUNT_SID")?;
    let token = required_env("CLOOPEN_AUTH_TOKEN")?;
    let app_id = required_env("CLOOPEN_APP_ID")?;
    let to = required_env("CLOOPEN_TO")?;
    let template_id = std::env::var("CLOOPEN_TEMPLATE_ID").unwrap_or_else(|_| "1".to_owned());
    let content_type = match std::env::var("CLOOPEN_FORMAT").as_deref() {
        Ok("xml") => ContentType::Xml,
        _ => ContentType::Json,
    };

    let mut builder = CloopenClient::builder(account, token)?.content_type(content_type);
    if let Ok(host) = std::env::var("CLOOPEN_HOST") {
        builder = builder.host(host)?;
    }
    let client = builder.build()?;

    let request = SendRequest::template(app_id, to, template_id)
        .with_template("Your code is {{code}}, valid for {{minutes}} minutes.")
        .with_datas(TemplateData::from_iter([("code", "123456"), ("minutes", "5")]));

    let response = client.send_sms(&request).await?;
    println!(
        "status_code: {}, status_msg: {:?}, message_sid: {:?}",
        response.status_code,
        response.status_msg,
        response.message_sid()
    );

    Ok(())
}
