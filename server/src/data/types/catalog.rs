use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Null or missing text columns read as empty strings
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Repo types
// ============================================================================

/// Where a starter template is hosted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum RepoKind {
    GitHub,
    Replit,
}

impl RepoKind {
    pub const ALL: [RepoKind; 2] = [RepoKind::GitHub, RepoKind::Replit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GitHub => "GitHub",
            Self::Replit => "Replit",
        }
    }
}

impl fmt::Display for RepoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepoKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GitHub" => Ok(Self::GitHub),
            "Replit" => Ok(Self::Replit),
            other => Err(format!("unknown repo type '{}'", other)),
        }
    }
}

/// Row from `repos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RepoRow {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    /// Icon image URL
    #[serde(default, deserialize_with = "nullable_string")]
    pub icon: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(rename = "type")]
    pub kind: RepoKind,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "nullable_string")]
    pub url: String,
}

/// Repo columns embedded in a `list_repos` read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RepoSummary {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub description: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub url: String,
}

impl From<&RepoRow> for RepoSummary {
    fn from(row: &RepoRow) -> Self {
        Self {
            id: row.id,
            name: row.name.clone(),
            description: row.description.clone(),
            url: row.url.clone(),
        }
    }
}

// ============================================================================
// List types
// ============================================================================

/// Row from `lists`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListRow {
    pub id: i64,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Insert payload for `lists`
#[derive(Debug, Clone, Serialize)]
pub struct NewList {
    pub name: String,
    pub description: Option<String>,
    pub user_id: String,
}

/// Row from `list_repos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRepoRow {
    pub id: i64,
    pub list_id: Option<i64>,
    pub repo_id: i64,
}

/// Insert/upsert payload for `list_repos`
#[derive(Debug, Clone, Serialize)]
pub struct NewListRepo {
    pub repo_id: i64,
    pub list_id: i64,
}

/// `list_repos` row joined with its repo
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavedRepoRow {
    pub id: i64,
    #[serde(default)]
    pub list_id: Option<i64>,
    /// Null when the referenced repo no longer exists
    #[serde(default)]
    pub repos: Option<RepoSummary>,
}

// ============================================================================
// Review types
// ============================================================================

/// Row from `reviews`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReviewRow {
    pub id: i64,
    pub user_id: String,
    pub repo_id: i64,
    pub rating: i32,
    #[serde(default, deserialize_with = "nullable_string")]
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `reviews`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewReview {
    pub repo_id: i64,
    pub user_id: String,
    pub rating: i32,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_row_from_postgrest_json() {
        let json = r#"{
            "id": 7,
            "name": "Next.js Starter",
            "description": null,
            "icon": "https://cdn.example.com/next.png",
            "tags": ["react", "ssr"],
            "upvotes": 42,
            "type": "GitHub",
            "rating": 4.5,
            "url": "https://github.com/vercel/next.js"
        }"#;
        let row: RepoRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.id, 7);
        assert_eq!(row.description, "");
        assert_eq!(row.kind, RepoKind::GitHub);
        assert_eq!(row.tags.as_deref().map(<[String]>::len), Some(2));
        assert_eq!(row.rating, Some(4.5));
    }

    #[test]
    fn test_repo_row_optional_columns() {
        let json = r#"{ "id": 1, "name": "Flask", "type": "Replit", "tags": null, "rating": null }"#;
        let row: RepoRow = serde_json::from_str(json).unwrap();
        assert!(row.tags.is_none());
        assert!(row.rating.is_none());
        assert_eq!(row.upvotes, 0);
        assert_eq!(row.url, "");
    }

    #[test]
    fn test_repo_row_serializes_type_column() {
        let row = RepoRow {
            id: 1,
            name: "n".into(),
            description: String::new(),
            icon: String::new(),
            tags: None,
            upvotes: 0,
            kind: RepoKind::Replit,
            rating: None,
            url: String::new(),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["type"], "Replit");
    }

    #[test]
    fn test_repo_kind_from_str() {
        assert_eq!("GitHub".parse::<RepoKind>().unwrap(), RepoKind::GitHub);
        assert_eq!("Replit".parse::<RepoKind>().unwrap(), RepoKind::Replit);
        assert!("github".parse::<RepoKind>().is_err());
    }

    #[test]
    fn test_saved_repo_row_with_embedded_repo() {
        let json = r#"{
            "id": 3,
            "list_id": 9,
            "repos": { "id": 7, "name": "Next.js Starter", "description": "SSR", "url": "https://x" }
        }"#;
        let row: SavedRepoRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.list_id, Some(9));
        assert_eq!(row.repos.unwrap().name, "Next.js Starter");
    }

    #[test]
    fn test_review_row_timestamp() {
        let json = r#"{
            "id": 1, "user_id": "u1", "repo_id": 7, "rating": 4,
            "content": "Great", "created_at": "2024-05-01T12:30:00.123456+00:00"
        }"#;
        let row: ReviewRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.rating, 4);
        assert_eq!(row.created_at.to_rfc3339(), "2024-05-01T12:30:00.123456+00:00");
    }
}
