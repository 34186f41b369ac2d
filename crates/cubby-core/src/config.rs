//! Configuration module
//!
//! Environment-driven configuration for the gateway. All values are read once
//! at process start; the S3 client is constructed from them immediately after.

use std::env;

use crate::constants::{
    DEFAULT_EXISTENCE_CACHE_CAPACITY, DEFAULT_MAX_UPLOAD_SIZE_BYTES, DEFAULT_PRESIGN_EXPIRY_SECS,
};

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    /// AWS region (or region identifier for S3-compatible providers).
    pub aws_region: String,
    /// Static credentials; when absent the SDK's default provider chain applies.
    pub s3_access_key_id: Option<String>,
    pub s3_secret_access_key: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, Spaces, ...).
    pub s3_endpoint: Option<String>,
    pub presign_expiry_secs: u64,
    pub existence_cache_capacity: usize,
    pub max_upload_size_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        Ok(Config {
            server_port: env::var("PORT")
                .or_else(|_| env::var("SERVER_PORT"))
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            environment,
            aws_region: env::var("AWS_REGION")
                .or_else(|_| env::var("S3_REGION"))
                .unwrap_or_else(|_| "us-east-1".to_string()),
            s3_access_key_id: env::var("S3_ACCESS_KEY").ok(),
            s3_secret_access_key: env::var("S3_SECRET_KEY").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            presign_expiry_secs: env::var("PRESIGN_EXPIRY_SECS")
                .unwrap_or_else(|_| DEFAULT_PRESIGN_EXPIRY_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_PRESIGN_EXPIRY_SECS),
            existence_cache_capacity: env::var("EXISTENCE_CACHE_CAPACITY")
                .unwrap_or_else(|_| DEFAULT_EXISTENCE_CACHE_CAPACITY.to_string())
                .parse()
                .unwrap_or(DEFAULT_EXISTENCE_CACHE_CAPACITY),
            max_upload_size_bytes: env::var("MAX_UPLOAD_SIZE_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_SIZE_BYTES.to_string())
                .parse()
                .unwrap_or(DEFAULT_MAX_UPLOAD_SIZE_BYTES),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_port: 3000,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            aws_region: "us-east-1".to_string(),
            s3_access_key_id: None,
            s3_secret_access_key: None,
            s3_endpoint: None,
            presign_expiry_secs: DEFAULT_PRESIGN_EXPIRY_SECS,
            existence_cache_capacity: DEFAULT_EXISTENCE_CACHE_CAPACITY,
            max_upload_size_bytes: DEFAULT_MAX_UPLOAD_SIZE_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_production() {
        let mut config = Config::default();
        assert!(!config.is_production());
        config.environment = "Production".to_string();
        assert!(config.is_production());
        config.environment = "prod".to_string();
        assert!(config.is_production());
    }

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.presign_expiry_secs, DEFAULT_PRESIGN_EXPIRY_SECS);
        assert_eq!(
            config.existence_cache_capacity,
            DEFAULT_EXISTENCE_CACHE_CAPACITY
        );
        assert_eq!(config.cors_origins, vec!["*".to_string()]);
    }
}
