//! Core application

use anyhow::Result;

use crate::api::ApiServer;
use crate::core::banner;
use crate::core::cli::{self, CliConfig};
use crate::core::config::AppConfig;
use crate::core::constants::{APP_NAME_LOWER, ENV_LOG};
use crate::core::shutdown::ShutdownService;
use crate::data::BackendService;

pub struct CoreApp {
    pub shutdown: ShutdownService,
    pub config: AppConfig,
    pub backend: BackendService,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub async fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        let cli_config = cli::parse();
        Self::init_logging(cli_config.debug);

        tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Application starting");
        let app = Self::init(&cli_config)?;
        Self::start_server(app).await
    }

    fn init(cli: &CliConfig) -> Result<Self> {
        let config = AppConfig::load(cli)?;
        if config.debug {
            tracing::debug!(
                host = %config.server.host,
                port = config.server.port,
                backend = %config.backend,
                local_jwt = config.supabase.jwt_secret.is_some(),
                secure_cookies = config.auth.secure_cookies,
                "Resolved configuration"
            );
        }

        let backend = BackendService::init(&config).map_err(|e| {
            anyhow::anyhow!("Failed to initialize {} backend: {}", config.backend, e)
        })?;
        tracing::debug!(backend = %backend.kind(), "Backend initialized");

        Ok(Self {
            shutdown: ShutdownService::new(),
            config,
            backend,
        })
    }

    /// `REPLREPO_LOG` wins over `RUST_LOG`; `--debug` only changes the default
    fn init_logging(debug: bool) {
        let default_filter = if debug {
            format!("info,{APP_NAME_LOWER}=debug,tower_http=debug")
        } else {
            format!("info,{APP_NAME_LOWER}=info")
        };
        let filter = [ENV_LOG, "RUST_LOG"]
            .into_iter()
            .find_map(|key| std::env::var(key).ok())
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_target(debug)
            .with_ansi(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    async fn start_server(app: Self) -> Result<()> {
        // Signal handlers go in before the listener binds
        app.shutdown.install_signal_handlers();

        banner::print_banner(
            &app.config.server.host,
            app.config.server.port,
            app.config.backend,
            &app.config.supabase.url,
        );

        let server = ApiServer::new(app);
        let app = server.start().await?;
        tracing::info!(triggered = app.shutdown.is_triggered(), "Server stopped");

        Ok(())
    }
}
