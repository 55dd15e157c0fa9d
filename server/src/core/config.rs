use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SUPABASE_TIMEOUT_SECS,
};

// =============================================================================
// Backend Enum
// =============================================================================

/// Data backend serving catalog rows and sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Hosted Supabase project (PostgREST + GoTrue)
    Supabase,
    /// In-process tables seeded with a demo catalog
    #[default]
    Memory,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Supabase => "supabase",
            BackendKind::Memory => "memory",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Server configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ServerFileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Supabase configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SupabaseFileConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub jwt_secret: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Session cookie configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct AuthFileConfig {
    pub secure_cookies: Option<bool>,
}

/// In-memory backend configuration section
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MemoryFileConfig {
    pub seed: Option<bool>,
    pub auto_confirm: Option<bool>,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub server: Option<ServerFileConfig>,
    pub backend: Option<BackendKind>,
    pub supabase: Option<SupabaseFileConfig>,
    pub auth: Option<AuthFileConfig>,
    pub memory: Option<MemoryFileConfig>,
    pub debug: Option<bool>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        if let serde_json::Value::Object(map) = &self.extra
            && !map.is_empty()
        {
            let keys_str: String = map
                .keys()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(
                fields = %keys_str,
                "Unknown fields in config file (possible typos)"
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(server) = other.server {
            let current = self.server.get_or_insert_with(ServerFileConfig::default);
            if server.host.is_some() {
                tracing::trace!(host = ?server.host, "Merging server.host");
                current.host = server.host;
            }
            if server.port.is_some() {
                tracing::trace!(port = ?server.port, "Merging server.port");
                current.port = server.port;
            }
        }

        if other.backend.is_some() {
            tracing::trace!(backend = ?other.backend, "Merging backend");
            self.backend = other.backend;
        }

        if let Some(supabase) = other.supabase {
            let current = self
                .supabase
                .get_or_insert_with(SupabaseFileConfig::default);
            if supabase.url.is_some() {
                tracing::trace!(url = ?supabase.url, "Merging supabase.url");
                current.url = supabase.url;
            }
            if supabase.anon_key.is_some() {
                tracing::trace!(anon_key = "***", "Merging supabase.anon_key");
                current.anon_key = supabase.anon_key;
            }
            if supabase.jwt_secret.is_some() {
                tracing::trace!(jwt_secret = "***", "Merging supabase.jwt_secret");
                current.jwt_secret = supabase.jwt_secret;
            }
            if supabase.timeout_secs.is_some() {
                tracing::trace!(timeout_secs = ?supabase.timeout_secs, "Merging supabase.timeout_secs");
                current.timeout_secs = supabase.timeout_secs;
            }
        }

        if let Some(auth) = other.auth {
            let current = self.auth.get_or_insert_with(AuthFileConfig::default);
            if auth.secure_cookies.is_some() {
                tracing::trace!(secure_cookies = ?auth.secure_cookies, "Merging auth.secure_cookies");
                current.secure_cookies = auth.secure_cookies;
            }
        }

        if let Some(memory) = other.memory {
            let current = self.memory.get_or_insert_with(MemoryFileConfig::default);
            if memory.seed.is_some() {
                current.seed = memory.seed;
            }
            if memory.auto_confirm.is_some() {
                current.auto_confirm = memory.auto_confirm;
            }
        }

        if other.debug.is_some() {
            tracing::trace!(debug = ?other.debug, "Merging debug");
            self.debug = other.debug;
        }
    }
}

// =============================================================================
// Runtime Config Structs (final merged configuration)
// =============================================================================

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Supabase connection settings
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub jwt_secret: Option<String>,
    pub timeout_secs: u64,
}

/// Session cookie settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secure_cookies: bool,
}

/// In-memory backend settings
#[derive(Debug, Clone)]
pub struct MemoryConfig {
    /// Seed the demo catalog on startup
    pub seed: bool,
    /// Treat new sign-ups as confirmed
    pub auto_confirm: bool,
}

/// Final merged application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendKind,
    pub supabase: SupabaseConfig,
    pub auth: AuthConfig,
    pub memory: MemoryConfig,
    pub debug: bool,
}

impl AppConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Defaults
    /// 2. Profile directory config (~/.replrepo/replrepo.json)
    /// 3. Local directory config OR CLI-specified config path
    /// 4. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self> {
        tracing::debug!("Loading application configuration");

        let mut file_config = FileConfig::default();
        let mut found_configs: Vec<String> = Vec::new();

        if let Some(profile_path) = get_profile_config_path()
            && profile_path.exists()
        {
            let profile_config = FileConfig::load_from_file(&profile_path)?;
            profile_config.warn_unknown_fields();
            file_config.merge(profile_config);
            found_configs.push(profile_path.display().to_string());
        }

        let overlay_path = if let Some(ref path) = cli.config {
            let expanded = expand_path(&path.to_string_lossy());
            if !expanded.exists() {
                anyhow::bail!("Config file not found: {}", expanded.display());
            }
            Some(expanded)
        } else {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            if local.exists() { Some(local) } else { None }
        };

        if let Some(path) = overlay_path {
            let overlay_config = FileConfig::load_from_file(&path)?;
            overlay_config.warn_unknown_fields();
            file_config.merge(overlay_config);
            found_configs.push(path.display().to_string());
        }

        tracing::debug!(configs = ?found_configs, "Config files loaded");

        let file_server = file_config.server.unwrap_or_default();
        let file_supabase = file_config.supabase.unwrap_or_default();
        let file_auth = file_config.auth.unwrap_or_default();
        let file_memory = file_config.memory.unwrap_or_default();

        let host = cli
            .host
            .clone()
            .or(file_server.host)
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = cli.port.or(file_server.port).unwrap_or(DEFAULT_PORT);

        let backend = cli.backend.or(file_config.backend).unwrap_or_default();

        let supabase = SupabaseConfig {
            url: cli
                .supabase_url
                .clone()
                .or(file_supabase.url)
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
            anon_key: cli
                .supabase_key
                .clone()
                .or(file_supabase.anon_key)
                .unwrap_or_default(),
            jwt_secret: cli
                .supabase_jwt_secret
                .clone()
                .or(file_supabase.jwt_secret)
                .filter(|s| !s.is_empty()),
            timeout_secs: file_supabase
                .timeout_secs
                .unwrap_or(DEFAULT_SUPABASE_TIMEOUT_SECS),
        };

        let auth = AuthConfig {
            secure_cookies: cli
                .secure_cookies
                .or(file_auth.secure_cookies)
                .unwrap_or(false),
        };

        let memory = MemoryConfig {
            seed: file_memory.seed.unwrap_or(true),
            auto_confirm: file_memory.auto_confirm.unwrap_or(true),
        };

        let debug = cli.debug || file_config.debug.unwrap_or(false);

        let config = Self {
            server: ServerConfig { host, port },
            backend,
            supabase,
            auth,
            memory,
            debug,
        };

        config.validate()?;
        tracing::debug!(
            host = %config.server.host,
            port = config.server.port,
            backend = %config.backend,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            anyhow::bail!("Configuration error: server.host must not be empty");
        }

        if self.server.port == 0 {
            anyhow::bail!("Configuration error: server.port must be greater than 0");
        }

        if self.backend == BackendKind::Supabase {
            if self.supabase.url.is_empty() {
                anyhow::bail!(
                    "Configuration error: supabase.url is required when backend is 'supabase'. \
                     Set via REPLREPO_SUPABASE_URL env var or supabase.url in config file."
                );
            }
            if !self.supabase.url.starts_with("http://")
                && !self.supabase.url.starts_with("https://")
            {
                anyhow::bail!(
                    "Configuration error: supabase.url must start with http:// or https://"
                );
            }
            if self.supabase.anon_key.is_empty() {
                anyhow::bail!(
                    "Configuration error: supabase.anon_key is required when backend is 'supabase'. \
                     Set via REPLREPO_SUPABASE_KEY env var or supabase.anon_key in config file."
                );
            }
            if self.supabase.timeout_secs == 0 {
                anyhow::bail!("Configuration error: supabase.timeout_secs must be greater than 0");
            }
        }

        if self.backend == BackendKind::Memory && is_all_interfaces(&self.server.host) {
            tracing::warn!(
                host = %self.server.host,
                "In-memory backend is bound to all network interfaces. \
                 Data is not persisted and is lost on restart."
            );
        }

        Ok(())
    }
}

/// Get the profile config path (~/.replrepo/replrepo.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}

/// Check if host binds to all network interfaces
pub(crate) fn is_all_interfaces(host: &str) -> bool {
    matches!(host, "0.0.0.0" | "::" | "[::]")
}
