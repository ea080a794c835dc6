//! Database models
//!
//! Rust structs representing stored records and the filter used to list them.
//! All models use serde with camelCase field names on the wire.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

/// A computer record in the `Computers` collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Computer {
    pub id: String,
    pub name: String,
    pub year: i32,
    /// Id of the attached image blob, if any
    pub image_id: Option<String>,
}

impl Computer {
    /// Whether the record references an image blob.
    ///
    /// An empty or whitespace-only reference counts as "no image".
    pub fn has_image(&self) -> bool {
        self.image_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty())
    }
}

/// Create computer request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComputerRequest {
    pub name: String,
    pub year: i32,
}

/// Constraints narrowing a list query. Absent fields mean "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ComputerFilter {
    /// Drop a blank name pattern so it is treated as absent.
    pub fn normalized(self) -> Self {
        Self {
            year: self.year,
            name: self.name.filter(|name| !name.trim().is_empty()),
        }
    }
}

/// Records returned by a list query, paired with the filter that produced them
#[derive(Debug, Clone, Serialize)]
pub struct ComputerList {
    pub computers: Vec<Computer>,
    pub filter: ComputerFilter,
}

/// Form submissions send `year=` for an empty field; read that as `None`.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(i32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(year)) => Ok(Some(year)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid year: {:?}", text))),
    }
}
