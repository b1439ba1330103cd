//! Response and request bodies of the v1 API

use crate::error::CraasError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistryStatus {
    Creating,
    Active,
    Deleting,
    Error,
    /// Any status this client does not know about yet
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registry {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub status: RegistryStatus,
    /// Storage usage in bytes
    pub size: i64,
    /// Storage limit in bytes
    pub size_limit: i64,
    /// Storage usage in percent
    pub used: f32,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateRegistryOpts<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub name: String,
    pub updated_at: DateTime<Utc>,
    /// Size of the repository layers in bytes
    pub size: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub digest: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub size: i64,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    pub digest: String,
    pub size: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartGcOpts {
    /// Also remove images that have no tags
    pub delete_untagged: bool,
}

/// Garbage left in a registry, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarbageSize {
    /// Layers not referenced by any repository digest
    #[serde(rename = "sizeNonReferenced")]
    pub size_non_referenced: i64,
    /// Layers of images without tags
    #[serde(rename = "sizeUntagged")]
    pub size_untagged: i64,
    #[serde(rename = "sizeSummary")]
    pub size_summary: i64,
}

/// Lifetime of a v1 token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ttl {
    #[default]
    TwelveHours,
    OneYear,
}

impl Ttl {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ttl::TwelveHours => "12h",
            Ttl::OneYear => "1y",
        }
    }
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ttl {
    type Err = CraasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "12h" => Ok(Ttl::TwelveHours),
            "1y" => Ok(Ttl::OneYear),
            other => Err(CraasError::InvalidTokenTtl(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CreateTokenOpts {
    pub ttl: Ttl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(default)]
    pub token: String,
    /// Unix timestamp of expiry
    #[serde(rename = "expireAt")]
    pub expires_at: i64,
    /// Seconds until expiry
    #[serde(rename = "expireIn")]
    pub expires_in: i64,
}
