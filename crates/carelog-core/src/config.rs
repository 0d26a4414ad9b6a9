//! Configuration module
//!
//! Env-driven configuration for the API. Loaded once at startup by the
//! composition root; validated by the api crate's setup before anything
//! else runs.

use std::env;

const DEFAULT_PORT: u16 = 3000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,

    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,

    pub jwt_secret: String,

    /// Root directory for stored uploads (served at `upload_base_url`).
    pub upload_dir: String,
    /// Public URL prefix matching `upload_dir` (e.g. "http://localhost:3000/uploads").
    pub upload_base_url: String,
    pub max_upload_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,

    /// Credential for the external generative-language service.
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Override for the Gemini endpoint; used by tests to point at a local mock.
    pub gemini_base_url: Option<String>,

    pub ocr_language: String,

    /// When true, extraction/analysis failures reject the upload (422)
    /// instead of degrading to a fallback record.
    pub intake_strict_mode: bool,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_list(key: &str, default: &str) -> Vec<String> {
    env_or(key, default)
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET must be set"))?;
        let gemini_api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY must be set"))?;

        let server_port = env_parse("PORT", DEFAULT_PORT);
        let upload_base_url = env_or(
            "UPLOAD_BASE_URL",
            &format!("http://localhost:{}/uploads", server_port),
        );

        Ok(Config {
            server_port,
            cors_origins: env_list("CORS_ORIGINS", "*"),
            environment: env_or("ENVIRONMENT", "development"),
            database_url,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", MAX_CONNECTIONS),
            db_timeout_seconds: env_parse("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS),
            jwt_secret,
            upload_dir: env_or("UPLOAD_DIR", "uploads"),
            upload_base_url,
            max_upload_size_bytes: env_parse("MAX_UPLOAD_SIZE_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            allowed_extensions: env_list("ALLOWED_EXTENSIONS", "pdf,png,jpg,jpeg,webp"),
            allowed_content_types: env_list(
                "ALLOWED_CONTENT_TYPES",
                "application/pdf,image/png,image/jpeg,image/webp",
            ),
            gemini_api_key,
            gemini_model: env_or("GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            gemini_base_url: env::var("GEMINI_BASE_URL").ok(),
            ocr_language: env_or("OCR_LANGUAGE", DEFAULT_OCR_LANGUAGE),
            intake_strict_mode: env_bool("INTAKE_STRICT_MODE", false),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_production() {
        let mut config = test_config();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
        config.environment = "prod".to_string();
        assert!(config.is_production());
    }

    #[test]
    fn test_env_bool_parsing() {
        assert!(!env_bool("CARELOG_TEST_UNSET_FLAG", false));
        assert!(env_bool("CARELOG_TEST_UNSET_FLAG", true));
    }

    fn test_config() -> Config {
        Config {
            server_port: 3000,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            database_url: "postgres://localhost/carelog_test".to_string(),
            db_max_connections: 5,
            db_timeout_seconds: 5,
            jwt_secret: "test-secret".to_string(),
            upload_dir: "uploads".to_string(),
            upload_base_url: "http://localhost:3000/uploads".to_string(),
            max_upload_size_bytes: 1024,
            allowed_extensions: vec!["pdf".to_string()],
            allowed_content_types: vec!["application/pdf".to_string()],
            gemini_api_key: "test-key".to_string(),
            gemini_model: "gemini-2.5-flash".to_string(),
            gemini_base_url: None,
            ocr_language: "eng".to_string(),
            intake_strict_mode: false,
        }
    }
}
