use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Port the relay listens on unless `APP__PORT` says otherwise.
pub const DEFAULT_PORT: u16 = 5000;

/// Origins allowed to call the relay from a browser.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5174";

/// Default Gemini API base URL.
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Missing keys are tolerated at startup; every provider call then fails.
    pub api_key: Option<Secret<String>>,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub text_model: String,
}

#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl RelayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load(DEFAULT_PORT)?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        let api_key = env::var("GOOGLE_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|key| !key.is_empty());

        if api_key.is_none() {
            if is_prod {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "GOOGLE_API_KEY is required in production but not set"
                )));
            }
            tracing::warn!("GOOGLE_API_KEY is not set; every generation request will fail");
        }

        Ok(RelayConfig {
            common: common_config,
            google: GoogleConfig {
                api_key: api_key.map(Secret::new),
                api_base: get_env("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
            },
            models: ModelConfig {
                text_model: get_env("GENAI_TEXT_MODEL", "gemini-1.0-pro"),
            },
            cors: CorsConfig {
                allowed_origins: parse_origins(&get_env(
                    "CORS_ALLOWED_ORIGINS",
                    DEFAULT_ALLOWED_ORIGINS,
                )),
            },
        })
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_origins_are_the_two_local_dev_servers() {
        assert_eq!(
            parse_origins(DEFAULT_ALLOWED_ORIGINS),
            vec!["http://localhost:3000", "http://localhost:5174"]
        );
    }

    #[test]
    fn origin_list_ignores_blanks_and_trailing_slashes() {
        assert_eq!(
            parse_origins(" https://a.example/ ,, https://b.example"),
            vec!["https://a.example", "https://b.example"]
        );
    }
}
