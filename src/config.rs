//! Site configuration: selectors, class names, timings, and channel settings.
//!
//! Every field defaults to the value the site templates are rendered with, so
//! a page without overrides needs no configuration at all. Pages may override
//! individual keys by placing a JSON object in the `data-site-config`
//! attribute of `<body>`; unknown keys are ignored and missing keys keep their
//! defaults.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::SiteError;

/// Name of the `<body>` attribute carrying a JSON configuration override.
pub const CONFIG_ATTRIBUTE: &str = "data-site-config";

/// Runtime configuration for every page component.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteConfig {
    pub carousel: CarouselConfig,
    pub stats: StatConfig,
    pub summary: SummaryConfig,
    pub consent: ConsentConfig,
    pub channel: ChannelConfig,
    pub typing: TypingConfig,
    pub query_form: QueryFormConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    /// Outer carousel element; one widget is created per match.
    pub selector: String,
    /// Slide container inside the outer element.
    pub slides_selector: String,
    pub left_arrow_selector: String,
    pub right_arrow_selector: String,
    pub active_class: String,
    pub dummy_class: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatConfig {
    pub selector: String,
    /// Total wall-clock time of one count-up, independent of the target.
    pub duration_ms: f64,
}

/// Live summary container and the document links rendered inside it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SummaryConfig {
    pub container_id: String,
    /// `data-*` attribute holding the room identifier.
    pub room_attribute: String,
    pub document_path_prefix: String,
    /// Absolute origins under which document links are also recognized.
    pub document_origins: Vec<String>,
    /// Class prefix tagging elements that belong to a document.
    pub document_class_prefix: String,
    pub highlight_class: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConsentConfig {
    pub storage_key: String,
    pub banner_selector: String,
    pub accept_selector: String,
    pub reject_selector: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChannelConfig {
    /// Path of the socket endpoint on the page's own host.
    pub path: String,
    pub join_event: String,
    pub message_event: String,
    pub reconnect_delay_ms: u32,
    pub reconnect_delay_max_ms: u32,
    pub randomization_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TypingConfig {
    pub selector: String,
    #[serde(rename = "loop")]
    pub looped: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryFormConfig {
    pub form_selector: String,
    pub query_input_selector: String,
    pub hint_selector: String,
    pub hint_target_selector: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            selector: ".carousel".to_owned(),
            slides_selector: ".documents".to_owned(),
            left_arrow_selector: ".carousel-shadow.left".to_owned(),
            right_arrow_selector: ".carousel-shadow.right".to_owned(),
            active_class: "active".to_owned(),
            dummy_class: "carousel-dummy".to_owned(),
        }
    }
}

impl Default for StatConfig {
    fn default() -> Self {
        Self { selector: ".stat .n".to_owned(), duration_ms: 1000.0 }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            container_id: "theme-summary-container".to_owned(),
            room_attribute: "data-query-task-id".to_owned(),
            document_path_prefix: "/documents/".to_owned(),
            document_origins: vec!["https://learn.distributeddesign.eu".to_owned()],
            document_class_prefix: "document-".to_owned(),
            highlight_class: "focused".to_owned(),
        }
    }
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            storage_key: "cookie_consent".to_owned(),
            banner_selector: ".cookie-banner".to_owned(),
            accept_selector: ".accept".to_owned(),
            reject_selector: ".reject".to_owned(),
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            path: "/socket.io/".to_owned(),
            join_event: "join_room".to_owned(),
            message_event: "msg".to_owned(),
            reconnect_delay_ms: 1000,
            reconnect_delay_max_ms: 5000,
            randomization_factor: 0.5,
        }
    }
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self { selector: ".type-it".to_owned(), looped: true }
    }
}

impl Default for QueryFormConfig {
    fn default() -> Self {
        Self {
            form_selector: ".query-form".to_owned(),
            query_input_selector: "input[name=\"query\"]".to_owned(),
            hint_selector: ".search-hint".to_owned(),
            hint_target_selector: ".query-form input[type='text']".to_owned(),
        }
    }
}

impl SiteConfig {
    /// Parse a JSON override on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Config`] if `raw` is not a JSON object matching
    /// the configuration shape.
    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(trimmed)?)
    }

    /// Resolve the configuration from an optional override, falling back to
    /// defaults when the override is malformed.
    #[must_use]
    pub fn resolve(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring {CONFIG_ATTRIBUTE}: {e}");
                Self::default()
            }
        }
    }
}
