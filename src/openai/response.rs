//! Responses API envelope and the generated message it carries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::RequestError;

use super::json::find_json_object;

/// Top level of a Responses API reply. Only the fields we read are modelled.
#[derive(Debug, Deserialize)]
pub struct ResponsesEnvelope {
    #[serde(default)]
    pub output: Vec<OutputItem>,
}

/// One element of `output`.
#[derive(Debug, Deserialize)]
pub struct OutputItem {
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

/// One element of an output item's `content`.
#[derive(Debug, Deserialize)]
pub struct ContentPart {
    pub text: Option<String>,
}

impl ResponsesEnvelope {
    /// Text of the first content part of the first output item.
    pub fn first_text(&self) -> Result<&str, RequestError> {
        let item = self
            .output
            .first()
            .ok_or_else(|| RequestError::UnexpectedShape("`output` is empty".to_string()))?;

        let part = item.content.first().ok_or_else(|| {
            RequestError::UnexpectedShape("`output[0].content` is empty".to_string())
        })?;

        part.text.as_deref().ok_or_else(|| {
            RequestError::UnexpectedShape("`output[0].content[0].text` is missing".to_string())
        })
    }
}

/// The model's JSON answer, plus a `length` field counting its `items`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GeneratedMessage(Map<String, Value>);

impl GeneratedMessage {
    /// Parse the model's text into a message and append `length`.
    ///
    /// The text should be a JSON object with an `items` array. When it does
    /// not parse as-is, an object wrapped in a markdown fence or prose is
    /// accepted too.
    pub fn from_model_text(text: &str) -> Result<Self, RequestError> {
        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(direct) => {
                let candidate = find_json_object(text).ok_or_else(|| {
                    RequestError::InvalidJson(format!("{}. Content: {}", direct, preview(text)))
                })?;
                serde_json::from_str(candidate).map_err(|e| {
                    RequestError::InvalidJson(format!("{}. Content: {}", e, preview(text)))
                })?
            }
        };

        let Value::Object(mut fields) = value else {
            return Err(RequestError::UnexpectedShape(
                "model output is not a JSON object".to_string(),
            ));
        };

        let count = match fields.get("items") {
            Some(Value::Array(items)) => items.len(),
            Some(_) => {
                return Err(RequestError::UnexpectedShape(
                    "`items` is not an array".to_string(),
                ));
            }
            None => {
                return Err(RequestError::UnexpectedShape(
                    "model output has no `items` field".to_string(),
                ));
            }
        };

        fields.insert("length".to_string(), Value::from(count));
        Ok(Self(fields))
    }

    pub fn items(&self) -> &[Value] {
        self.0
            .get("items")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn length(&self) -> usize {
        self.items().len()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Single-line JSON with non-ASCII text left as-is.
    pub fn to_json_line(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}

fn preview(text: &str) -> String {
    text.chars().take(200).collect()
}
