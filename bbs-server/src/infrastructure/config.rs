use crate::application::proxy_service::ProxyPolicy;
use anyhow::{anyhow, bail, Context, Result};

pub const DEFAULT_HTTP_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://localhost:8000/";

#[derive(Debug, Clone, PartialEq)]
pub enum Backend {
    Store {
        url: String,
        key: String,
        bcrypt_cost: u32,
    },
    Proxy {
        base_url: String,
        policy: ProxyPolicy,
    },
}

/// Resolved once at startup, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub http_port: u16,
    pub backend: Backend,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let http_port = match var("HTTP_PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("HTTP_PORT is not a valid port: {}", port))?,
            None => DEFAULT_HTTP_PORT,
        };

        let backend = match var("BBS_BACKEND").as_deref().map(str::trim) {
            None | Some("store") => {
                let url = var("SUPABASE_URL").ok_or_else(|| anyhow!("SUPABASE_URL must be set"))?;
                let key = var("SUPABASE_KEY").ok_or_else(|| anyhow!("SUPABASE_KEY must be set"))?;
                let bcrypt_cost = match var("BCRYPT_COST") {
                    Some(cost) => cost
                        .trim()
                        .parse()
                        .with_context(|| format!("BCRYPT_COST is not a number: {}", cost))?,
                    None => bcrypt::DEFAULT_COST,
                };
                Backend::Store {
                    url,
                    key,
                    bcrypt_cost,
                }
            }
            Some("proxy") => {
                let require_post_credentials = match var("POST_REQUIRES_CREDENTIALS") {
                    Some(flag) => parse_flag(&flag).with_context(|| {
                        format!("POST_REQUIRES_CREDENTIALS is not a boolean: {}", flag)
                    })?,
                    None => false,
                };
                Backend::Proxy {
                    base_url: var("UPSTREAM_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string()),
                    policy: ProxyPolicy {
                        require_post_credentials,
                    },
                }
            }
            Some(other) => bail!("BBS_BACKEND must be `store` or `proxy`, got `{}`", other),
        };

        Ok(Self { http_port, backend })
    }

    pub fn http_addr(&self) -> String {
        format!("0.0.0.0:{}", self.http_port)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("expected true/false"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn store_backend_is_the_default() {
        let config = config_from(&[
            ("SUPABASE_URL", "https://db.example.test"),
            ("SUPABASE_KEY", "secret"),
        ])
        .unwrap();

        assert_eq!(config.http_port, DEFAULT_HTTP_PORT);
        assert_eq!(
            config.backend,
            Backend::Store {
                url: "https://db.example.test".into(),
                key: "secret".into(),
                bcrypt_cost: bcrypt::DEFAULT_COST,
            }
        );
    }

    #[test]
    fn store_backend_fails_fast_without_credentials() {
        let err = config_from(&[("SUPABASE_URL", "https://db.example.test")]).unwrap_err();
        assert!(err.to_string().contains("SUPABASE_KEY"));

        let err = config_from(&[("SUPABASE_KEY", "secret"), ("SUPABASE_URL", "  ")]).unwrap_err();
        assert!(err.to_string().contains("SUPABASE_URL"));
    }

    #[test]
    fn proxy_backend_uses_builtin_upstream_by_default() {
        let config = config_from(&[("BBS_BACKEND", "proxy"), ("HTTP_PORT", "8081")]).unwrap();

        assert_eq!(config.http_addr(), "0.0.0.0:8081");
        assert_eq!(
            config.backend,
            Backend::Proxy {
                base_url: DEFAULT_UPSTREAM_BASE_URL.into(),
                policy: ProxyPolicy::default(),
            }
        );
    }

    #[test]
    fn proxy_policy_flag_is_parsed() {
        let config = config_from(&[
            ("BBS_BACKEND", "proxy"),
            ("UPSTREAM_BASE_URL", "http://upstream.test"),
            ("POST_REQUIRES_CREDENTIALS", "Yes"),
        ])
        .unwrap();

        match config.backend {
            Backend::Proxy { base_url, policy } => {
                assert_eq!(base_url, "http://upstream.test");
                assert!(policy.require_post_credentials);
            }
            other => panic!("expected proxy backend, got {:?}", other),
        }

        assert!(config_from(&[
            ("BBS_BACKEND", "proxy"),
            ("POST_REQUIRES_CREDENTIALS", "maybe")
        ])
        .is_err());
    }

    #[test]
    fn unknown_backend_and_bad_port_are_rejected() {
        assert!(config_from(&[("BBS_BACKEND", "sqlite")]).is_err());
        assert!(config_from(&[("BBS_BACKEND", "proxy"), ("HTTP_PORT", "http")]).is_err());
    }

    #[test]
    #[serial]
    fn reads_process_environment() {
        std::env::set_var("BBS_BACKEND", "proxy");
        std::env::set_var("UPSTREAM_BASE_URL", "http://from-env.test/");
        std::env::remove_var("HTTP_PORT");
        std::env::remove_var("POST_REQUIRES_CREDENTIALS");

        let config = Config::from_env();

        std::env::remove_var("BBS_BACKEND");
        std::env::remove_var("UPSTREAM_BASE_URL");

        let config = config.unwrap();
        assert_eq!(
            config.backend,
            Backend::Proxy {
                base_url: "http://from-env.test/".into(),
                policy: ProxyPolicy::default(),
            }
        );
    }
}
