use clap::Parser;

use std::path::PathBuf;

use super::config::BackendKind;
use super::constants::{
    ENV_BACKEND, ENV_CONFIG, ENV_DEBUG, ENV_HOST, ENV_PORT, ENV_SECURE_COOKIES,
    ENV_SUPABASE_JWT_SECRET, ENV_SUPABASE_KEY, ENV_SUPABASE_KEY_FALLBACK, ENV_SUPABASE_URL,
    ENV_SUPABASE_URL_FALLBACK,
};

#[derive(Parser)]
#[command(name = "replrepo")]
#[command(version, about = "Starter template catalog", long_about = None)]
pub struct Cli {
    /// Server host address
    #[arg(long, short = 'H', env = ENV_HOST)]
    pub host: Option<String>,

    /// Server port
    #[arg(long, short = 'p', env = ENV_PORT)]
    pub port: Option<u16>,

    /// Enable debug mode (verbose request logging)
    #[arg(long, env = ENV_DEBUG)]
    pub debug: bool,

    /// Path to config file
    #[arg(long, short = 'c', env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Data backend (supabase or memory)
    #[arg(long, env = ENV_BACKEND, value_parser = parse_backend)]
    pub backend: Option<BackendKind>,

    /// Supabase project URL (e.g. https://xyz.supabase.co)
    #[arg(long, env = ENV_SUPABASE_URL)]
    pub supabase_url: Option<String>,

    /// Supabase anon key
    #[arg(long, env = ENV_SUPABASE_KEY)]
    pub supabase_key: Option<String>,

    /// Supabase JWT secret; when set, session tokens are verified locally
    #[arg(long, env = ENV_SUPABASE_JWT_SECRET)]
    pub supabase_jwt_secret: Option<String>,

    /// Mark the session cookie Secure (serve over HTTPS)
    #[arg(long, env = ENV_SECURE_COOKIES)]
    pub secure_cookies: Option<bool>,
}

/// Parse data backend from CLI/env string
fn parse_backend(s: &str) -> Result<BackendKind, String> {
    match s.to_lowercase().as_str() {
        "supabase" => Ok(BackendKind::Supabase),
        "memory" => Ok(BackendKind::Memory),
        _ => Err(format!(
            "Invalid backend '{}'. Valid options: supabase, memory",
            s
        )),
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub debug: bool,
    pub config: Option<PathBuf>,
    pub backend: Option<BackendKind>,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub supabase_jwt_secret: Option<String>,
    pub secure_cookies: Option<bool>,
}

/// Parse CLI arguments into config
pub fn parse() -> CliConfig {
    let cli = Cli::parse();
    CliConfig {
        host: cli.host,
        port: cli.port,
        debug: cli.debug,
        config: cli.config,
        backend: cli.backend,
        supabase_url: cli
            .supabase_url
            .or_else(|| std::env::var(ENV_SUPABASE_URL_FALLBACK).ok()),
        supabase_key: cli
            .supabase_key
            .or_else(|| std::env::var(ENV_SUPABASE_KEY_FALLBACK).ok()),
        supabase_jwt_secret: cli.supabase_jwt_secret,
        secure_cookies: cli.secure_cookies,
    }
}
