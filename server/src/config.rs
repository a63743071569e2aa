use anyhow::Result;

/// Runtime configuration read from the environment.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Page size for time-entry listings.
    pub page_size: u64,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let page_size = std::env::var("PAGE_SIZE")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(25);

        let cors_allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        Ok(Self {
            page_size,
            cors_allowed_origins,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            page_size: 25,
            cors_allowed_origins: Vec::new(),
        }
    }
}
