//! # Blink Action Types
//!
//! Wire shapes for the Solana Actions ("blinks") surface: the item
//! payload wallets render, the templated purchase link with its buyer
//! input parameters, and the uniform error body.

use crate::error::{BlinkError, BlinkResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// True when `value` is a well-formed http(s) URL
pub fn is_http_url(value: &str) -> bool {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = URL_REGEX
        .get_or_init(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").expect("invalid URL regex"));
    regex.is_match(value)
}

/// A buyer input the wallet must collect before following an action link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionParameter {
    /// Template placeholder name (e.g. `buyerName`)
    pub name: String,
    /// Input label shown to the buyer
    pub label: String,
    /// Whether the wallet must refuse to submit without it
    pub required: bool,
}

impl ActionParameter {
    pub fn required(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            required: true,
        }
    }
}

/// A templated action link offered by a blink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedAction {
    /// Href template with `{placeholder}` segments, one per parameter
    pub href: String,
    /// Button text
    pub label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ActionParameter>,
}

/// Action links attached to a blink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLinks {
    pub actions: Vec<LinkedAction>,
}

/// The item payload served for a purchasable ClickCrate.
///
/// Wallets render `icon`, `title` and `description`, then walk
/// `links.actions` to offer the purchase button.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blink {
    /// Display image, must be a well-formed http(s) URL
    pub icon: String,
    pub label: String,
    pub title: String,
    pub description: String,
    pub disabled: bool,
    pub links: ActionLinks,
}

impl Blink {
    /// Validate an assembled payload before it goes on the wire.
    ///
    /// An invalid payload is a server-side defect, so failures surface as
    /// [`BlinkError::SchemaViolation`] rather than a client error.
    pub fn validate(&self) -> BlinkResult<()> {
        if !is_http_url(&self.icon) {
            return Err(BlinkError::SchemaViolation(format!(
                "icon is not a valid URL: {}",
                self.icon
            )));
        }
        if self.label.is_empty() {
            return Err(BlinkError::SchemaViolation("label is empty".to_string()));
        }
        if self.title.is_empty() {
            return Err(BlinkError::SchemaViolation("title is empty".to_string()));
        }
        if self.links.actions.is_empty() {
            return Err(BlinkError::SchemaViolation(
                "links.actions is empty".to_string(),
            ));
        }
        for action in &self.links.actions {
            if action.href.is_empty() {
                return Err(BlinkError::SchemaViolation(
                    "action href is empty".to_string(),
                ));
            }
            for parameter in &action.parameters {
                if parameter.name.is_empty() {
                    return Err(BlinkError::SchemaViolation(
                        "action parameter name is empty".to_string(),
                    ));
                }
                if !action.href.contains(&format!("{{{}}}", parameter.name)) {
                    return Err(BlinkError::SchemaViolation(format!(
                        "href has no placeholder for parameter: {}",
                        parameter.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Uniform error body for every failure on the action surface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionError {
    pub message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
