//! Application configuration management

use std::env;

use anyhow::{Context, Result};
use url::Url;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host (for generating URLs)
    pub host: Option<String>,

    /// Server port
    pub port: u16,

    /// Directory holding course definition files (one YAML file per course)
    pub content_path: String,

    /// Database URL (SQLite)
    /// Use DATABASE_PATH or DATABASE_URL with sqlite:// prefix
    pub database_url: String,

    /// Absolute base URL used when building lesson navigation links
    pub base_url: Url,

    /// JWT secret for token verification
    pub jwt_secret: String,

    /// Site title exposed through the explorer extension
    pub site_title: String,

    /// Optional site logo URL exposed through the explorer extension
    pub site_logo_url: Option<String>,

    /// Production mode flips request-level GraphQL error logging from
    /// full-detail to message-only
    pub production_mode: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Prefer DATABASE_PATH, fall back to DATABASE_URL
        let database_url = env::var("DATABASE_PATH")
            .or_else(|_| env::var("DATABASE_URL"))
            .unwrap_or_else(|_| "sqlite://./data/syllabus.db?mode=rwc".to_string());

        let base_url = env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3001/".to_string());
        let base_url = Url::parse(&base_url).context("Invalid BASE_URL")?;

        // JWT_SECRET is always required - generate a random one if not provided in dev
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            // In production, this should be set explicitly
            use std::collections::hash_map::DefaultHasher;
            use std::hash::{Hash, Hasher};
            let mut hasher = DefaultHasher::new();
            std::time::SystemTime::now().hash(&mut hasher);
            format!("dev-secret-{}", hasher.finish())
        });

        Ok(Self {
            host: env::var("HOST").ok(),

            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .context("Invalid PORT")?,

            content_path: env::var("CONTENT_PATH").unwrap_or_else(|_| "./data/courses".to_string()),

            database_url,

            base_url,

            jwt_secret,

            site_title: env::var("SITE_TITLE").unwrap_or_else(|_| "Course Explorer".to_string()),

            site_logo_url: env::var("SITE_LOGO_URL").ok(),

            production_mode: env::var("PRODUCTION")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }
}
