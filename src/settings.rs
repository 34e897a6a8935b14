use miette::{IntoDiagnostic, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    pub server: Server,
    pub catalog: Catalog,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
    /// Deployment environment label reported by the health endpoint.
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Path to the resource catalog JSON. If the file does not exist the
    /// embedded default catalog is used.
    pub path: PathBuf,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "production".to_string(),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/catalog.json"),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("server.host", Server::default().host)
            .into_diagnostic()?
            .set_default("server.port", Server::default().port)
            .into_diagnostic()?
            .set_default("server.environment", Server::default().environment)
            .into_diagnostic()?
            .set_default(
                "catalog.path",
                Catalog::default().path.to_string_lossy().to_string(),
            )
            .into_diagnostic()?;

        // Optional file
        if Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
        }

        // Environment overrides: PALISADE__SERVER__PORT=9090, etc.
        builder = builder.add_source(config::Environment::with_prefix("PALISADE").separator("__"));

        let cfg = builder.build().into_diagnostic()?;
        let mut s: Settings = cfg.try_deserialize().into_diagnostic()?;

        // Normalize catalog path to be relative to current dir
        if s.catalog.path.is_relative() {
            s.catalog.path = std::env::current_dir()
                .into_diagnostic()?
                .join(&s.catalog.path);
        }

        Ok(s)
    }
}
