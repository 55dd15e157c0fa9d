// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display)
pub const APP_NAME: &str = "ReplRepo";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "replrepo";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".replrepo";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name
pub const CONFIG_FILE_NAME: &str = "replrepo.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "REPLREPO_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for debug mode
pub const ENV_DEBUG: &str = "REPLREPO_DEBUG";

/// Environment variable for server host
pub const ENV_HOST: &str = "REPLREPO_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "REPLREPO_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "REPLREPO_LOG";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 5390;

// =============================================================================
// Environment Variables - Backend
// =============================================================================

/// Environment variable for the data backend (supabase or memory)
pub const ENV_BACKEND: &str = "REPLREPO_BACKEND";

/// Environment variable for the Supabase project URL
pub const ENV_SUPABASE_URL: &str = "REPLREPO_SUPABASE_URL";

/// Environment variable for the Supabase anon (public) key
pub const ENV_SUPABASE_KEY: &str = "REPLREPO_SUPABASE_KEY";

/// Environment variable for the Supabase JWT secret (enables local token checks)
pub const ENV_SUPABASE_JWT_SECRET: &str = "REPLREPO_SUPABASE_JWT_SECRET";

/// Fallback environment variables used by Supabase tooling
pub const ENV_SUPABASE_URL_FALLBACK: &str = "SUPABASE_URL";
pub const ENV_SUPABASE_KEY_FALLBACK: &str = "SUPABASE_ANON_KEY";

/// Environment variable for secure (HTTPS-only) session cookies
pub const ENV_SECURE_COOKIES: &str = "REPLREPO_SECURE_COOKIES";

// =============================================================================
// Supabase
// =============================================================================

/// Default request timeout for Supabase calls in seconds
pub const DEFAULT_SUPABASE_TIMEOUT_SECS: u64 = 30;

/// PostgREST path prefix
pub const SUPABASE_REST_PATH: &str = "rest/v1";

/// GoTrue path prefix
pub const SUPABASE_AUTH_PATH: &str = "auth/v1";

/// PostgREST error code for "no rows" on single-object reads
pub const PGRST_NO_ROWS: &str = "PGRST116";

// =============================================================================
// Tables
// =============================================================================

pub const TABLE_REPOS: &str = "repos";
pub const TABLE_LISTS: &str = "lists";
pub const TABLE_LIST_REPOS: &str = "list_repos";
pub const TABLE_REVIEWS: &str = "reviews";

/// Name of the list a repo lands in when saved from the listing screen
pub const SAVED_LIST_NAME: &str = "Saved";

// =============================================================================
// Authentication
// =============================================================================

/// Cookie name for session token
pub const SESSION_COOKIE_NAME: &str = "replrepo_session";

/// Session cookie lifetime used when the auth service reports no expiry (1 hour)
pub const DEFAULT_SESSION_TTL_SECS: i64 = 3600;

/// Cookie name for the refresh token
pub const REFRESH_COOKIE_NAME: &str = "replrepo_refresh";

/// Refresh cookie lifetime (30 days)
pub const REFRESH_COOKIE_TTL_SECS: i64 = 30 * 24 * 3600;

// =============================================================================
// Request Body Limits
// =============================================================================

/// Default body limit for general API requests (1 MB)
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Body limit for auth endpoints (64 KB)
pub const AUTH_BODY_LIMIT: usize = 64 * 1024;

// =============================================================================
// Reviews
// =============================================================================

/// Number of star slots in every rating display
pub const MAX_STARS: u8 = 5;

/// Maximum review text length (characters)
pub const MAX_REVIEW_LENGTH: u64 = 5000;

// =============================================================================
// Shutdown
// =============================================================================

/// Graceful shutdown timeout in seconds
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;
