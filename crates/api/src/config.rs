//! Process configuration read from the environment at startup.

use std::str::FromStr;

use boom_core::media::DEFAULT_MAX_ATTACHMENT_BYTES;

use crate::auth::jwt::JwtConfig;

/// Room for multipart framing and the text fields of an upload.
const FORM_OVERHEAD_BYTES: usize = 1 << 20;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    /// Also bounds media-store uploads, which run inside the request.
    pub request_timeout_secs: u64,
    /// Ceiling for each of `videoFile` and `videoThumbnail`.
    pub max_attachment_bytes: usize,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `5000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                   |
    /// | `MAX_ATTACHMENT_BYTES` | `10485760`              |
    ///
    /// plus the JWT variables documented on [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// When a variable is set but does not parse.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 5000),
            cors_origins: split_origins(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
            ),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 120),
            max_attachment_bytes: env_or("MAX_ATTACHMENT_BYTES", DEFAULT_MAX_ATTACHMENT_BYTES),
            jwt: JwtConfig::from_env(),
        }
    }

    /// Largest request body accepted: two attachments and the form fields.
    pub fn body_limit_bytes(&self) -> usize {
        self.max_attachment_bytes
            .saturating_mul(2)
            .saturating_add(FORM_OVERHEAD_BYTES)
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key}={raw:?} is invalid: {e}")),
        Err(_) => default,
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origins_are_trimmed_and_blank_entries_dropped() {
        assert_eq!(
            split_origins(" http://a.test ,,http://b.test,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    }

    #[test]
    fn body_limit_covers_two_attachments() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            cors_origins: vec![],
            request_timeout_secs: 1,
            max_attachment_bytes: 100,
            jwt: JwtConfig {
                secret: "s".into(),
                access_token_expiry_mins: 1,
            },
        };
        assert_eq!(config.body_limit_bytes(), 200 + FORM_OVERHEAD_BYTES);
    }
}
