//! Supabase backend
//!
//! Talks to a hosted Supabase project over HTTP:
//! - `query` - PostgREST request builder (`/rest/v1/{table}`)
//! - `repository` - `CatalogRepository` over the four catalog tables
//! - `auth` - `AuthProvider` over GoTrue (`/auth/v1`)

mod auth;
mod query;
mod repository;

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};

use crate::core::config::SupabaseConfig;
use crate::core::constants::{SUPABASE_AUTH_PATH, SUPABASE_REST_PATH};
use crate::data::error::DataError;

pub(crate) use query::TableQuery;

/// HTTP client bound to one Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseService {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseService {
    pub fn new(config: &SupabaseConfig) -> Result<Self, DataError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&config.anon_key)
                .map_err(|e| DataError::Config(format!("invalid anon key: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| DataError::Config(format!("failed to build HTTP client: {}", e)))?;

        tracing::debug!(
            url = %config.url,
            timeout_secs = config.timeout_secs,
            "Supabase client initialized"
        );

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        })
    }

    /// Start a PostgREST request against `table`
    pub(crate) fn from_table<'a>(&'a self, table: &'static str) -> TableQuery<'a> {
        TableQuery::new(self, table)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, SUPABASE_REST_PATH, table)
    }

    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/{}/{}", self.base_url, SUPABASE_AUTH_PATH, endpoint)
    }

    /// Bearer credential: the user's access token, or the anon key for public reads
    fn bearer<'a>(&'a self, token: Option<&'a str>) -> &'a str {
        token.unwrap_or(&self.anon_key)
    }
}

#[cfg(test)]
pub(crate) fn test_service(base_url: &str) -> SupabaseService {
    SupabaseService::new(&SupabaseConfig {
        url: base_url.to_string(),
        anon_key: "anon-key".to_string(),
        jwt_secret: None,
        timeout_secs: 5,
    })
    .unwrap()
}
