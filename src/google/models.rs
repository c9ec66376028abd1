//! Custom Search JSON API response types
//!
//! Every field is optional on the wire; missing or `null` values decode to
//! their defaults so a partially populated response still yields a result.

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level search response envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(deserialize_with = "nullable")]
    pub search_information: SearchInformation,
    #[serde(deserialize_with = "nullable")]
    pub items: Vec<SearchItem>,
}

/// Search metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchInformation {
    /// Sent by the API as a decimal string
    #[serde(deserialize_with = "int_or_string")]
    pub total_results: i64,
}

/// A single search result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchItem {
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub html_title: String,
    /// Remote image URL
    #[serde(deserialize_with = "nullable")]
    pub link: String,
    #[serde(deserialize_with = "nullable")]
    pub display_link: String,
    #[serde(deserialize_with = "nullable")]
    pub snippet: String,
    #[serde(deserialize_with = "nullable")]
    pub html_snippet: String,
    #[serde(deserialize_with = "nullable")]
    pub mime: String,
    #[serde(deserialize_with = "nullable")]
    pub file_format: String,
    #[serde(deserialize_with = "nullable")]
    pub image: ImageDescriptor,
}

/// Image details attached to a result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageDescriptor {
    #[serde(deserialize_with = "nullable")]
    pub context_link: String,
    #[serde(deserialize_with = "nullable")]
    pub height: f64,
    #[serde(deserialize_with = "nullable")]
    pub width: f64,
    #[serde(deserialize_with = "nullable")]
    pub byte_size: i64,
    #[serde(deserialize_with = "nullable")]
    pub thumbnail_link: String,
    #[serde(deserialize_with = "nullable")]
    pub thumbnail_height: f64,
    #[serde(deserialize_with = "nullable")]
    pub thumbnail_width: f64,
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn int_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Raw::Int(n)) => Ok(n),
        Some(Raw::Str(s)) if s.is_empty() => Ok(0),
        Some(Raw::Str(s)) => s.parse().map_err(serde::de::Error::custom),
    }
}
