//! Environment-driven configuration

use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Settings for the upstream completion API
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: [u8; 4],
    pub port: u16,
    /// Directory holding the database file and logs
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub ai: AiConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("GROQ_API_KEY")
            .map_err(|_| anyhow::anyhow!("GROQ_API_KEY not set in environment"))?;

        let port = match std::env::var("PORT") {
            Ok(p) => p
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT is not a valid port number: {}", p))?,
            Err(_) => DEFAULT_PORT,
        };

        let data_dir = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("roadmap-scout");

        let db_path = std::env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("roadmap-scout.db"));

        let timeout_secs = std::env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Self {
            host: [0, 0, 0, 0],
            port,
            data_dir,
            db_path,
            ai: AiConfig {
                api_key,
                api_url: std::env::var("GROQ_API_URL")
                    .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
                model: std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
                timeout_secs,
            },
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}
