use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }

    pub fn is_prod(&self) -> bool {
        matches!(self, Self::Prod)
    }
}

/// Log line format, `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Compact,
    Json,
}

impl LogFormat {
    /// Unknown or missing values fall back to JSON in production and
    /// pretty output elsewhere.
    pub fn parse(raw: Option<&str>, env: &Environment) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("json") => Self::Json,
            Some("compact") => Self::Compact,
            Some("pretty") => Self::Pretty,
            _ if env.is_prod() => Self::Json,
            _ => Self::Pretty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,
    pub log_format: LogFormat,

    // Database
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub database_max_connections: u32,

    // File storage
    pub storage_dir: PathBuf,
    pub max_upload_bytes: usize,

    // CORS
    pub cors_allow_origins: Vec<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", raw))?,
            Err(_) => 8000,
        };
        let server_addr = format!("{}:{}", host, port);
        let log_format = LogFormat::parse(env::var("LOG_FORMAT").ok().as_deref(), &env);

        // Database (optional: the diagnostic endpoint reports its absence)
        let database_url = non_empty_var("DATABASE_URL");
        let database_name = non_empty_var("DATABASE_NAME");
        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        // File storage
        let storage_dir = PathBuf::from(
            env::var("STORAGE_DIR").unwrap_or_else(|_| "./uploads".to_string()),
        );
        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100 * 1024 * 1024); // 100 MiB

        // CORS
        let cors_allow_origins = env::var("CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Settings {
            env,
            server_addr,
            log_format,
            database_url,
            database_name,
            database_max_connections,
            storage_dir,
            max_upload_bytes,
            cors_allow_origins,
        })
    }

    /// Settings for an in-process instance backed by the memory store.
    pub fn for_tests(storage_dir: impl Into<PathBuf>) -> Self {
        Settings {
            env: Environment::Dev,
            server_addr: "127.0.0.1:0".to_string(),
            log_format: LogFormat::Compact,
            database_url: Some("memory://".to_string()),
            database_name: Some("test".to_string()),
            database_max_connections: 1,
            storage_dir: storage_dir.into(),
            max_upload_bytes: 10 * 1024 * 1024,
            cors_allow_origins: vec!["*".to_string()],
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_allow_origins.iter().any(|o| o == "*")
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parsing_is_lenient() {
        assert_eq!(Environment::from_str("PRODUCTION"), Environment::Prod);
        assert_eq!(Environment::from_str("staging"), Environment::Staging);
        assert_eq!(Environment::from_str("whatever"), Environment::Dev);
    }

    #[test]
    fn log_format_defaults_follow_environment() {
        assert_eq!(LogFormat::parse(None, &Environment::Prod), LogFormat::Json);
        assert_eq!(LogFormat::parse(None, &Environment::Dev), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(Some(" Compact "), &Environment::Prod), LogFormat::Compact);
        assert_eq!(LogFormat::parse(Some("json"), &Environment::Dev), LogFormat::Json);
        assert_eq!(LogFormat::parse(Some("xml"), &Environment::Staging), LogFormat::Pretty);
    }

    #[test]
    fn wildcard_origin_detection() {
        let mut settings = Settings::for_tests("/tmp");
        assert!(settings.allows_any_origin());

        settings.cors_allow_origins = vec!["http://localhost:3000".to_string()];
        assert!(!settings.allows_any_origin());
    }
}
