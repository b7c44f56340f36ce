//! Wire types of the Contentful delivery API.
//!
//! These never leave the crate's adapter layer: callers only see the flat
//! records in [`crate::domain::model`].

use crate::utils::error::{ContentError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sys {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(rename = "linkType", default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkType {
    Entry,
    Asset,
}

/// `{"sys": {"type": "Link", "linkType": "Entry", "id": "..."}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub sys: Sys,
}

impl Link {
    pub fn id(&self) -> &str {
        &self.sys.id
    }

    fn is_link(&self) -> bool {
        self.sys.kind == "Link"
    }

    pub fn link_type(&self) -> Option<LinkType> {
        match self.sys.link_type.as_deref() {
            Some("Entry") => Some(LinkType::Entry),
            Some("Asset") => Some(LinkType::Asset),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub sys: Sys,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Entry {
    pub fn id(&self) -> &str {
        &self.sys.id
    }

    fn missing(&self, field: &str) -> ContentError {
        ContentError::MissingField {
            entry_id: self.sys.id.clone(),
            field: field.to_string(),
        }
    }

    /// Required text field.
    pub fn text(&self, field: &str) -> Result<String> {
        self.opt_text(field).ok_or_else(|| self.missing(field))
    }

    pub fn opt_text(&self, field: &str) -> Option<String> {
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    pub fn opt_bool(&self, field: &str) -> Option<bool> {
        self.fields.get(field).and_then(Value::as_bool)
    }

    /// Short-text lists; a single text value is read as a one-element list.
    pub fn opt_text_list(&self, field: &str) -> Option<Vec<String>> {
        match self.fields.get(field)? {
            Value::Array(values) => Some(
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            Value::String(value) => Some(vec![value.clone()]),
            _ => None,
        }
    }

    /// The link stored in a reference field, if the field holds one.
    pub fn link(&self, field: &str) -> Option<Link> {
        self.fields
            .get(field)
            .and_then(|value| serde_json::from_value::<Link>(value.clone()).ok())
            .filter(Link::is_link)
    }

    /// Links stored in a multi-reference field, in authoring order.
    pub fn links(&self, field: &str) -> Vec<Link> {
        self.fields
            .get(field)
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|value| serde_json::from_value::<Link>(value.clone()).ok())
                    .filter(Link::is_link)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetFile {
    pub url: String,
    #[serde(rename = "contentType", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(rename = "fileName", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<AssetFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub sys: Sys,
    #[serde(default)]
    pub fields: AssetFields,
}

impl Asset {
    pub fn url(&self) -> Option<&str> {
        self.fields.file.as_ref().map(|file| file.url.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Includes {
    #[serde(rename = "Entry", default)]
    pub entries: Vec<Entry>,
    #[serde(rename = "Asset", default)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntryCollection {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub skip: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub items: Vec<Entry>,
    #[serde(default)]
    pub includes: Includes,
}

/// Query against the `entries` endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryQuery {
    pub content_type: String,
    pub order: Option<String>,
    pub limit: Option<u32>,
    pub include: Option<u8>,
    pub locale: Option<String>,
}

impl EntryQuery {
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            order: None,
            limit: None,
            include: None,
            locale: None,
        }
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Depth of linked entries/assets returned in `includes` (API max is 10).
    pub fn include(mut self, depth: u8) -> Self {
        self.include = Some(depth.min(10));
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("content_type".to_string(), self.content_type.clone())];
        if let Some(order) = &self.order {
            params.push(("order".to_string(), order.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(include) = self.include {
            params.push(("include".to_string(), include.to_string()));
        }
        if let Some(locale) = &self.locale {
            params.push(("locale".to_string(), locale.clone()));
        }
        params
    }
}
