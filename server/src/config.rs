use std::path::PathBuf;

use anyhow::{Result, bail};

const DEFAULT_SEED_PATH: &str = "data/employee_database.json";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub seed_path: PathBuf,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let seed_path = match std::env::var("HR_SEED_PATH") {
            Ok(raw) if raw.trim().is_empty() => bail!("HR_SEED_PATH is set but empty"),
            Ok(raw) => PathBuf::from(raw.trim()),
            Err(_) => PathBuf::from(DEFAULT_SEED_PATH),
        };

        let cors_allowed_origins = parse_origins(
            &std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.into()),
        );

        Ok(Self {
            seed_path,
            cors_allowed_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}
