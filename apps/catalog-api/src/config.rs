//! Configuration for Catalog API

use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_files::UploadConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub uploads: UploadConfig,
    /// `ADMIN_ROUTES_ENABLED`, mounts `/api/admin`
    pub admin_enabled: bool,
    /// `RUN_MIGRATIONS`, applies pending migrations before serving
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // Required - will fail if not set
        let server = ServerConfig::from_env()?;
        let uploads = UploadConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            environment,
            uploads,
            admin_enabled: env_parse("ADMIN_ROUTES_ENABLED", "false")?,
            run_migrations: env_parse("RUN_MIGRATIONS", "true")?,
        })
    }
}
