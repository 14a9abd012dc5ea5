use std::num::NonZeroU32;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use axum_extra::extract::cookie::Key;

use crate::auth;

/// Minimum length of a cookie signing secret.
const MIN_SECRET_LEN: usize = 64;

/// Runtime configuration read from `LOCALEYES_*` environment variables.
#[derive(Debug)]
pub(crate) struct Config {
    pub(crate) port: u16,
    /// Optional JSON file with accounts on top of the demo accounts.
    pub(crate) accounts: Option<PathBuf>,
    /// PBKDF2 rounds for stored secrets.
    pub(crate) iterations: NonZeroU32,
    cookie_secret: Option<String>,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = lookup("LOCALEYES_PORT")
            .map(|port| port.parse::<u16>())
            .transpose()
            .context("LOCALEYES_PORT is not a port number")?
            .unwrap_or(8000);

        let accounts = lookup("LOCALEYES_ACCOUNTS")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        let iterations = lookup("LOCALEYES_PBKDF2_ITERATIONS")
            .map(|iterations| iterations.parse::<NonZeroU32>())
            .transpose()
            .context("LOCALEYES_PBKDF2_ITERATIONS is not a positive number")?
            .unwrap_or(auth::DEFAULT_ITERATIONS);

        let cookie_secret = lookup("LOCALEYES_COOKIE_SECRET").filter(|secret| !secret.is_empty());

        if let Some(secret) = &cookie_secret
            && secret.len() < MIN_SECRET_LEN
        {
            bail!("LOCALEYES_COOKIE_SECRET must be at least {MIN_SECRET_LEN} bytes");
        }

        Ok(Self {
            port,
            accounts,
            iterations,
            cookie_secret,
        })
    }

    /// Key for signing cookies, random unless a secret is configured.
    pub(crate) fn cookie_key(&self) -> Key {
        match &self.cookie_secret {
            Some(secret) => Key::from(secret.as_bytes()),
            None => {
                tracing::warn!("no cookie secret set, sessions end on restart");
                Key::generate()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.accounts, None);
        assert_eq!(config.iterations, auth::DEFAULT_ITERATIONS);
        assert!(config.cookie_secret.is_none());
    }

    #[test]
    fn test_iterations() {
        let configured = config(&[("LOCALEYES_PBKDF2_ITERATIONS", "310000")]).unwrap();
        assert_eq!(configured.iterations.get(), 310_000);

        let err = config(&[("LOCALEYES_PBKDF2_ITERATIONS", "0")]).unwrap_err();
        assert!(err.to_string().contains("LOCALEYES_PBKDF2_ITERATIONS"), "{err}");
    }

    #[test]
    fn test_port_and_accounts() {
        let config = config(&[
            ("LOCALEYES_PORT", "9090"),
            ("LOCALEYES_ACCOUNTS", "/etc/localeyes/accounts.json"),
        ])
        .unwrap();

        assert_eq!(config.port, 9090);
        assert_eq!(
            config.accounts,
            Some(PathBuf::from("/etc/localeyes/accounts.json"))
        );
    }

    #[test]
    fn test_bad_port() {
        let err = config(&[("LOCALEYES_PORT", "http")]).unwrap_err();
        assert!(err.to_string().contains("LOCALEYES_PORT"), "{err}");
    }

    #[test]
    fn test_short_cookie_secret() {
        let err = config(&[("LOCALEYES_COOKIE_SECRET", "tooshort")]).unwrap_err();
        assert!(err.to_string().contains("64 bytes"), "{err}");
    }

    #[test]
    fn test_cookie_secret_is_stable() {
        let secret = "k".repeat(64);
        let config = config(&[("LOCALEYES_COOKIE_SECRET", secret.as_str())]).unwrap();

        assert_eq!(config.cookie_key().master(), config.cookie_key().master());
    }
}
