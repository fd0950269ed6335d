use anyhow::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(AppConfig {
            host,
            port,
            environment,
            log_level,
        })
    }

    /// Log level for the tracing subscriber; unparseable values fall back
    /// to info.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_level(level: &str) -> AppConfig {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
            environment: "development".to_string(),
            log_level: level.to_string(),
        }
    }

    #[test]
    fn tracing_level_parses_known_levels() {
        assert_eq!(config_with_level("debug").tracing_level(), tracing::Level::DEBUG);
        assert_eq!(config_with_level("WARN").tracing_level(), tracing::Level::WARN);
    }

    #[test]
    fn tracing_level_falls_back_to_info() {
        assert_eq!(config_with_level("verbose").tracing_level(), tracing::Level::INFO);
        assert_eq!(config_with_level("").tracing_level(), tracing::Level::INFO);
    }
}
