use std::time::Duration;

use leptos::logging::warn;
use serde::Deserialize;

use crate::error::ControllerError;

/// Id of the optional `<script type="application/json">` element holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "resume-maker-config";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub preview_endpoint: String,
    pub builder_endpoint: String,
    pub download_base: String,
    pub quiet_period_ms: u32,
    pub initial_preview_delay_ms: u32,
    pub notice_ttl_ms: u32,
    pub artifact_filename: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            preview_endpoint: "/preview_html".to_string(),
            builder_endpoint: "/builder".to_string(),
            download_base: "/download".to_string(),
            quiet_period_ms: 800,
            initial_preview_delay_ms: 500,
            notice_ttl_ms: 5000,
            artifact_filename: "resume.pdf".to_string(),
        }
    }
}

impl ControllerConfig {
    pub fn from_json(raw: &str) -> Result<Self, ControllerError> {
        serde_json::from_str(raw).map_err(|e| ControllerError::Decode(e.to_string()))
    }

    /// Read overrides from the host page, falling back to defaults.
    pub fn load() -> Self {
        let raw = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
            .and_then(|el| el.text_content());

        match raw {
            Some(raw) if !raw.trim().is_empty() => Self::from_json(&raw).unwrap_or_else(|e| {
                warn!("Ignoring malformed controller config: {}", e);
                Self::default()
            }),
            _ => Self::default(),
        }
    }

    pub fn quiet_period(&self) -> Duration {
        Duration::from_millis(self.quiet_period_ms.into())
    }

    pub fn initial_preview_delay(&self) -> Duration {
        Duration::from_millis(self.initial_preview_delay_ms.into())
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_millis(self.notice_ttl_ms.into())
    }
}
