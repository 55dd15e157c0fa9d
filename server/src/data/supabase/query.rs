//! PostgREST request builder
//!
//! Mirrors the subset of the PostgREST query language the catalog needs:
//! `select=`, `col=eq.v`, `col=in.(a,b)`, `order=col.dir`, single-object reads,
//! and `Prefer` headers for insert/upsert/delete representations.

use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::SupabaseService;
use crate::core::constants::PGRST_NO_ROWS;
use crate::data::error::DataError;

const BACKEND: &str = "postgrest";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
pub(crate) const PREFER_REPRESENTATION: &str = "return=representation";
pub(crate) const PREFER_UPSERT: &str = "resolution=merge-duplicates,return=representation";

/// Error body returned by PostgREST
#[derive(Debug, Default, serde::Deserialize)]
struct PostgrestErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<String>,
}

pub(crate) struct TableQuery<'a> {
    service: &'a SupabaseService,
    table: &'static str,
    method: Method,
    params: Vec<(String, String)>,
    token: Option<&'a str>,
    prefer: Option<&'static str>,
    single: bool,
    body: Option<serde_json::Value>,
}

impl<'a> TableQuery<'a> {
    pub(super) fn new(service: &'a SupabaseService, table: &'static str) -> Self {
        Self {
            service,
            table,
            method: Method::GET,
            params: Vec::new(),
            token: None,
            prefer: None,
            single: false,
            body: None,
        }
    }

    /// Authenticate as the signed-in user instead of the anon role
    pub fn auth(mut self, token: Option<&'a str>) -> Self {
        self.token = token;
        self
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.params
            .push((column.to_string(), format!("eq.{}", value.to_string())));
        self
    }

    pub fn in_list(mut self, column: &str, values: &[i64]) -> Self {
        let joined = values
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.params
            .push((column.to_string(), format!("in.({})", joined)));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let dir = if ascending { "asc" } else { "desc" };
        self.params
            .push(("order".to_string(), format!("{}.{}", column, dir)));
        self
    }

    /// Request exactly one row; zero rows surface as `PGRST116`
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    pub fn insert<T: Serialize>(self, row: &T) -> Result<Self, DataError> {
        self.with_body(Method::POST, PREFER_REPRESENTATION, row)
    }

    /// Insert, merging duplicates on the primary key
    pub fn upsert<T: Serialize>(self, row: &T) -> Result<Self, DataError> {
        self.with_body(Method::POST, PREFER_UPSERT, row)
    }

    pub fn delete(mut self) -> Self {
        self.method = Method::DELETE;
        self.prefer = Some(PREFER_REPRESENTATION);
        self
    }

    fn with_body<T: Serialize>(
        mut self,
        method: Method,
        prefer: &'static str,
        row: &T,
    ) -> Result<Self, DataError> {
        let body = serde_json::to_value(row).map_err(|e| DataError::Decode {
            table: self.table,
            message: e.to_string(),
        })?;
        self.method = method;
        self.prefer = Some(prefer);
        self.body = Some(body);
        Ok(self)
    }

    fn url(&self) -> Result<Url, DataError> {
        let mut url = Url::parse(&self.service.rest_url(self.table))
            .map_err(|e| DataError::Config(format!("invalid Supabase URL: {}", e)))?;
        if !self.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Send the request and decode the response body into `T`
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<T, DataError> {
        let table = self.table;
        let url = self.url()?;
        tracing::trace!(method = %self.method, url = %url, "PostgREST request");

        let mut request = self
            .service
            .client
            .request(self.method.clone(), url)
            .bearer_auth(self.service.bearer(self.token));
        if let Some(prefer) = self.prefer {
            request = request.header("Prefer", prefer);
        }
        if self.single {
            request = request.header(ACCEPT, HeaderValue::from_static(SINGLE_OBJECT));
        }
        if let Some(body) = &self.body {
            request = request.json(body);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if !status.is_success() {
            let body: PostgrestErrorBody = serde_json::from_slice(&bytes).unwrap_or_default();
            let message = match (body.message, body.details) {
                (Some(m), Some(d)) => format!("{} ({})", m, d),
                (Some(m), None) => m,
                (None, _) => String::from_utf8_lossy(&bytes).into_owned(),
            };
            return Err(DataError::Remote {
                backend: BACKEND,
                status: status.as_u16(),
                code: body.code,
                message,
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| DataError::Decode {
            table,
            message: e.to_string(),
        })
    }

    /// Like `fetch` for a `single()` read, mapping "no rows" to `None`
    pub async fn fetch_optional<T: DeserializeOwned>(self) -> Result<Option<T>, DataError> {
        match self.single().fetch::<T>().await {
            Ok(row) => Ok(Some(row)),
            Err(e) if e.remote_code() == Some(PGRST_NO_ROWS) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Send a write with `return=representation` and take the first returned row
    pub async fn fetch_first<T: DeserializeOwned>(self) -> Result<T, DataError> {
        let table = self.table;
        self.fetch::<Vec<T>>()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DataError::Decode {
                table,
                message: "write returned no rows".to_string(),
            })
    }
}
