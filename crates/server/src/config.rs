use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub openings_file: PathBuf,
    pub progress_file: PathBuf,
    /// Allowed browser origin; any origin when unset.
    pub cors_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1600),
            openings_file: env::var("OPENINGS_FILE")
                .unwrap_or_else(|_| "openings.json".to_string())
                .into(),
            progress_file: env::var("PROGRESS_FILE")
                .unwrap_or_else(|_| "progress.json".to_string())
                .into(),
            cors_origin: env::var("CORS_ORIGIN").ok().filter(|v| !v.is_empty()),
        }
    }
}
