//! Token bodies of the v2 API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenV2 {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub expiration: Expiration,
    #[serde(default)]
    pub scope: Scope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Secret value; only returned on creation and regeneration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<DateTime<Utc>>,
}

/// Which registries a token may access and how
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scope {
    /// Read-write when true, read-only otherwise
    #[serde(rename = "modeRW")]
    pub mode_rw: bool,
    pub all_registries: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub registry_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expiration {
    pub is_set: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Expiration {
    pub fn at(expires_at: DateTime<Utc>) -> Self {
        Self {
            is_set: true,
            expires_at: Some(expires_at),
        }
    }

    pub fn never() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenList {
    #[serde(default)]
    pub tokens: Vec<TokenV2>,
    pub total_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct PatchTokenOpts<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    pub scope: &'a Scope,
}

/// Filters and paging for [`crate::v2::TokenOperations::list`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOpts {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub sort_field: Option<String>,
    pub sort_type: Option<String>,
    pub search: Option<String>,
    pub scope_mode: Option<String>,
}

impl ListOpts {
    /// Form-encoded query with keys in sorted order, empty when nothing is set
    pub fn query_string(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(limit) = self.limit {
            query.append_pair("limit", &limit.to_string());
        }
        if let Some(offset) = self.offset {
            query.append_pair("offset", &offset.to_string());
        }
        let text_params = [
            ("scope_mode", &self.scope_mode),
            ("search", &self.search),
            ("sort_field", &self.sort_field),
            ("sort_type", &self.sort_type),
        ];
        for (key, value) in text_params {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                query.append_pair(key, value);
            }
        }
        query.finish()
    }
}
