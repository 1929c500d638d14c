use std::env;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct TrainerConfig {
    /// Base URL of the opening data service.
    pub api_url: String,
    pub request_timeout: Duration,
}

impl TrainerConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("CHESSWIZ_API_URL")
                .unwrap_or_else(|_| "http://localhost:1600".to_string()),
            request_timeout: Duration::from_secs(
                env::var("CHESSWIZ_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}
