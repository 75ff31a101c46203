use crate::domain_port::*;
use crate::logger::*;
use reqwest::cookie::Jar;
use std::sync::Arc;

/// Production transport. Ambient credentials (cookies) ride along on every
/// request via the shared jar; no timeout beyond reqwest's own defaults.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(jar: Arc<Jar>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().cookie_provider(jar).build()?;
        Ok(ReqwestTransport { client })
    }
}

fn classify(error: reqwest::Error) -> TransportError {
    if error.is_connect() {
        TransportError::Unreachable(error.to_string())
    } else {
        TransportError::Connection(error.to_string())
    }
}

fn build_form(form: MultipartForm) -> reqwest::multipart::Form {
    let mut out = reqwest::multipart::Form::new();
    for (name, value) in form.fields {
        out = out.text(name, value);
    }
    for file in form.files {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone());
        let part = match part.mime_str(&file.mime) {
            Ok(part) => part,
            Err(error) => {
                warn!(mime = %file.mime, %error, "invalid mime for upload part, sending untyped");
                reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name)
            }
        };
        out = out.part(file.name, part);
    }
    out
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        builder = match request.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(&body),
            Payload::Multipart(form) => builder.multipart(build_form(form)),
        };

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await.map_err(classify)?;
        let body = if text.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
        };
        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
