use serde::Deserialize;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, FormData, Request, RequestInit, Response};

use crate::config::ControllerConfig;
use crate::draft::ResumeDraft;
use crate::error::ControllerError;

/// Multipart field carrying the serialized draft.
pub const DATA_FIELD: &str = "data";
/// Multipart field carrying the mode marker (`"true"` for preview).
pub const MODE_FIELD: &str = "preview";

/// Remote services the controllers talk to.
#[allow(async_fn_in_trait)]
pub trait ResumeService {
    type Artifact;

    /// Render the draft as an HTML fragment.
    async fn render_preview(&self, draft: &ResumeDraft) -> Result<String, ControllerError>;

    /// Ask the builder to generate the document.
    async fn build_document(&self, draft: &ResumeDraft) -> Result<DownloadTicket, ControllerError>;

    /// Fetch a generated document.
    async fn fetch_document(&self, ticket: &DownloadTicket) -> Result<Self::Artifact, ControllerError>;
}

// -- Reply shapes --

#[derive(Debug, Deserialize)]
struct PreviewReply {
    #[serde(default)]
    preview: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BuilderReply {
    #[serde(default)]
    download: Option<DownloadTicket>,
    #[serde(default)]
    error: Option<String>,
}

/// What the builder hands back once the document is ready.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DownloadTicket {
    /// Fetch from `/download/{token}`.
    Token(String),
    /// Fetch from the fixed `/download/pdf` route.
    Ready(bool),
}

impl DownloadTicket {
    pub fn is_ready(&self) -> bool {
        match self {
            DownloadTicket::Token(token) => !token.trim().is_empty(),
            DownloadTicket::Ready(ready) => *ready,
        }
    }

    pub fn download_url(&self, base: &str) -> String {
        let base = base.trim_end_matches('/');
        match self {
            DownloadTicket::Token(token) => format!("{}/{}", base, urlencoding::encode(token.trim())),
            DownloadTicket::Ready(_) => format!("{}/pdf", base),
        }
    }
}

pub fn decode_preview_reply(body: &str) -> Result<String, ControllerError> {
    let reply: PreviewReply =
        serde_json::from_str(body).map_err(|e| ControllerError::Decode(e.to_string()))?;

    if let Some(err) = reply.error {
        return Err(ControllerError::Server(err));
    }
    match reply.preview {
        Some(html) if !html.trim().is_empty() => Ok(html),
        _ => Err(ControllerError::NoOutcome),
    }
}

pub fn decode_builder_reply(body: &str) -> Result<DownloadTicket, ControllerError> {
    let reply: BuilderReply =
        serde_json::from_str(body).map_err(|e| ControllerError::Decode(e.to_string()))?;

    if let Some(err) = reply.error {
        return Err(ControllerError::Server(err));
    }
    match reply.download {
        Some(ticket) if ticket.is_ready() => Ok(ticket),
        _ => Err(ControllerError::NoOutcome),
    }
}

/// Fold the HTTP status into a decoded reply. Error statuses keep a
/// server-provided message when the body has one; anything else about them
/// is a transport failure.
pub fn settle<T>(status: u16, decoded: Result<T, ControllerError>) -> Result<T, ControllerError> {
    if (200..300).contains(&status) {
        return decoded;
    }
    match decoded {
        Err(ControllerError::Server(message)) => Err(ControllerError::Server(message)),
        _ => Err(ControllerError::Transport(format!("HTTP {}", status))),
    }
}

// -- HTTP implementation --

#[derive(Debug, Clone)]
pub struct HttpResumeService {
    preview_endpoint: String,
    builder_endpoint: String,
    download_base: String,
}

impl HttpResumeService {
    pub fn new(config: &ControllerConfig) -> Self {
        Self {
            preview_endpoint: config.preview_endpoint.clone(),
            builder_endpoint: config.builder_endpoint.clone(),
            download_base: config.download_base.clone(),
        }
    }

    async fn post_draft(
        &self,
        url: &str,
        draft: &ResumeDraft,
        preview: bool,
    ) -> Result<(u16, String), ControllerError> {
        let payload = FormData::new().map_err(ControllerError::from_js)?;
        payload
            .append_with_str(DATA_FIELD, &draft.to_payload()?)
            .map_err(ControllerError::from_js)?;
        payload
            .append_with_str(MODE_FIELD, if preview { "true" } else { "false" })
            .map_err(ControllerError::from_js)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&payload);

        let response = send(url, &init).await?;
        let text = JsFuture::from(response.text().map_err(ControllerError::from_js)?)
            .await
            .map_err(ControllerError::transport_from_js)?;

        Ok((response.status(), text.as_string().unwrap_or_default()))
    }
}

impl ResumeService for HttpResumeService {
    type Artifact = Blob;

    async fn render_preview(&self, draft: &ResumeDraft) -> Result<String, ControllerError> {
        let (status, body) = self.post_draft(&self.preview_endpoint, draft, true).await?;
        settle(status, decode_preview_reply(&body))
    }

    async fn build_document(&self, draft: &ResumeDraft) -> Result<DownloadTicket, ControllerError> {
        let (status, body) = self.post_draft(&self.builder_endpoint, draft, false).await?;
        settle(status, decode_builder_reply(&body))
    }

    async fn fetch_document(&self, ticket: &DownloadTicket) -> Result<Blob, ControllerError> {
        let init = RequestInit::new();
        init.set_method("GET");

        let response = send(&ticket.download_url(&self.download_base), &init).await?;
        if !response.ok() {
            return Err(ControllerError::Transport(format!("HTTP {}", response.status())));
        }

        let blob = JsFuture::from(response.blob().map_err(ControllerError::from_js)?)
            .await
            .map_err(ControllerError::transport_from_js)?;
        blob.dyn_into::<Blob>().map_err(ControllerError::from_js)
    }
}

async fn send(url: &str, init: &RequestInit) -> Result<Response, ControllerError> {
    let window = web_sys::window()
        .ok_or_else(|| ControllerError::Browser("no window available".to_string()))?;
    let request = Request::new_with_str_and_init(url, init).map_err(ControllerError::from_js)?;

    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(ControllerError::transport_from_js)?;
    value.dyn_into::<Response>().map_err(ControllerError::from_js)
}
