//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use carelog_core::Config;

/// Validate critical configuration values
///
/// Checks that critical configuration is set correctly and fails fast on
/// values that would cause security problems or runtime errors.
pub fn validate_config(config: &Config) -> Result<()> {
    // Validate CORS configuration in production
    if config.is_production() && config.cors_origins.contains(&"*".to_string()) {
        return Err(anyhow::anyhow!(
            "CORS configured to allow all origins (*) in production - this is a security risk. \
            Please set specific allowed origins via CORS_ORIGINS environment variable."
        ));
    }

    // Validate database connection settings
    if config.db_max_connections == 0 {
        return Err(anyhow::anyhow!("Database max connections cannot be 0"));
    }

    if config.db_timeout_seconds == 0 {
        return Err(anyhow::anyhow!("Database timeout cannot be 0"));
    }

    // Validate upload limits and allowlists
    if config.max_upload_size_bytes == 0 {
        return Err(anyhow::anyhow!("Max upload size cannot be 0"));
    }

    if config.allowed_extensions.is_empty() {
        return Err(anyhow::anyhow!("Allowed extensions list cannot be empty"));
    }

    if config.allowed_content_types.is_empty() {
        return Err(anyhow::anyhow!("Allowed content types list cannot be empty"));
    }

    if config.upload_dir.trim().is_empty() {
        return Err(anyhow::anyhow!("Upload directory cannot be empty"));
    }

    // Validate JWT secret is set
    if config.jwt_secret.is_empty() {
        return Err(anyhow::anyhow!(
            "JWT secret cannot be empty - set JWT_SECRET environment variable"
        ));
    }

    // Warn about weak JWT secrets in production
    if config.is_production() && config.jwt_secret.len() < 32 {
        tracing::warn!(
            "JWT secret is shorter than 32 characters - consider using a longer, more secure secret"
        );
    }

    Ok(())
}
