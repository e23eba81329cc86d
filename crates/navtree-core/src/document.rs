//! Input documents.
//!
//! A [`Document`] is one entry of a host collection: a URL plus the optional
//! fields that control how the entry appears in navigation. Hosts either build
//! documents directly or pass loose JSON records through
//! [`Document::from_value`], which applies the same defaults and rejects
//! records the tree cannot place.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TreeError;

/// Document tagged with a URL path.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// URL path (e.g., "/guide/", "/blog/post-1/index.html").
    pub url: String,
    /// Navigation label, preferred over `title`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<String>,
    /// Page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Sort key among siblings, ascending.
    #[serde(default)]
    pub order: f64,
    /// Excludes the document and everything below it from navigation.
    #[serde(default)]
    pub hidden: bool,
}

impl Document {
    /// Create a document with the given URL and default fields.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the navigation label.
    #[must_use]
    pub fn with_menu(mut self, menu: impl Into<String>) -> Self {
        self.menu = Some(menu.into());
        self
    }

    /// Set the sort order.
    #[must_use]
    pub fn with_order(mut self, order: f64) -> Self {
        self.order = order;
        self
    }

    /// Mark the document as hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Label shown in navigation: `menu` unless it is empty, else `title`.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self.menu.as_deref() {
            Some(menu) if !menu.is_empty() => Some(menu),
            _ => self.title.as_deref(),
        }
    }

    /// Validate a loose record and convert it into a document.
    ///
    /// `index` is the record's position in its collection and is reported in
    /// errors. Unknown fields are ignored.
    ///
    /// # Defaults
    ///
    /// - `order`: absent, `null`, `false` or `""` become `0`; numeric strings
    ///   are parsed.
    /// - `hidden`: absent or `null` become `false`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::InvalidDocument`] if the record is not an object,
    /// `url` is missing or not a string, or another field has a type that
    /// cannot be coerced. Non-finite orders are rejected so sibling sorting
    /// stays well defined.
    pub fn from_value(index: usize, value: &Value) -> Result<Self, TreeError> {
        let invalid = move |reason: String| TreeError::invalid_document(index, reason);

        let Value::Object(record) = value else {
            return Err(invalid(format!(
                "expected an object, got {}",
                type_name(value)
            )));
        };
        let url = record_url(record).map_err(invalid)?.to_owned();
        let menu = optional_string(record, "menu").map_err(invalid)?;
        let title = optional_string(record, "title").map_err(invalid)?;
        let order = parse_order(record.get("order")).map_err(invalid)?;
        let hidden = parse_hidden(record.get("hidden")).map_err(invalid)?;

        Ok(Self {
            url,
            menu,
            title,
            order,
            hidden,
        })
    }
}

fn optional_string(record: &Map<String, Value>, field: &str) -> Result<Option<String>, String> {
    match record.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(format!(
            "{field} must be a string, got {}",
            type_name(other)
        )),
    }
}

/// The string `url` of a record, or why there is none.
pub(crate) fn record_url(record: &Map<String, Value>) -> Result<&str, String> {
    match record.get("url") {
        Some(Value::String(url)) => Ok(url),
        Some(other) => Err(format!("url must be a string, got {}", type_name(other))),
        None => Err("url is missing".to_owned()),
    }
}

fn parse_order(value: Option<&Value>) -> Result<f64, String> {
    let order = match value {
        None | Some(Value::Null | Value::Bool(false)) => return Ok(0.0),
        Some(Value::String(text)) if text.is_empty() => return Ok(0.0),
        Some(Value::Number(number)) => number
            .as_f64()
            .ok_or_else(|| format!("order {number} is not representable as a float"))?,
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("order {text:?} is not a number"))?,
        Some(other) => return Err(format!("order must be a number, got {}", type_name(other))),
    };

    if order.is_finite() {
        Ok(order)
    } else {
        Err(format!("order {order} is not finite"))
    }
}

fn parse_hidden(value: Option<&Value>) -> Result<bool, String> {
    match value {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(hidden)) => Ok(*hidden),
        Some(other) => Err(format!(
            "hidden must be a boolean, got {}",
            type_name(other)
        )),
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
