//! Gemini credential lookup from the environment, `.env` files, and
//! configuration.
//!
//! Environment variables win over the configuration file so that a key never
//! has to be written to disk.

use crate::config::constants::env_vars;
use anyhow::Result;
use std::env;
use tracing::{debug, warn};

/// Where to look for the Gemini API key
#[derive(Debug, Clone)]
pub struct ApiKeySources {
    /// Environment variable checked first
    pub primary_env: String,
    /// Key from the configuration file
    pub config_value: Option<String>,
}

impl Default for ApiKeySources {
    fn default() -> Self {
        Self {
            primary_env: env_vars::GEMINI_API_KEY.to_string(),
            config_value: None,
        }
    }
}

impl ApiKeySources {
    pub fn new(primary_env: impl Into<String>, config_value: Option<String>) -> Self {
        Self {
            primary_env: primary_env.into(),
            config_value,
        }
    }

    fn env_candidates(&self) -> Vec<&str> {
        let mut names = vec![self.primary_env.as_str()];
        for fallback in [
            env_vars::GEMINI_API_KEY,
            env_vars::GOOGLE_API_KEY,
            env_vars::API_KEY,
        ] {
            if !names.contains(&fallback) {
                names.push(fallback);
            }
        }
        names
    }
}

/// Load environment variables from a `.env` file in the current directory.
///
/// A missing file is fine; a malformed one is logged and ignored.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded environment from .env");
            Ok(())
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            warn!(error = %e, "failed to load .env file");
            Ok(())
        }
    }
}

/// Resolve the Gemini API key.
///
/// Order: the configured variable, then `GEMINI_API_KEY`, `GOOGLE_API_KEY`
/// and `API_KEY`, then the configuration file value.
pub fn get_api_key(sources: &ApiKeySources) -> Result<String> {
    resolve_api_key(sources, |name| env::var(name).ok())
}

/// Key lookup against an arbitrary variable source. Empty values count as unset.
fn resolve_api_key<L>(sources: &ApiKeySources, lookup: L) -> Result<String>
where
    L: Fn(&str) -> Option<String>,
{
    for name in sources.env_candidates() {
        if let Some(key) = lookup(name).filter(|key| !key.is_empty()) {
            debug!(source = name, "using API key from environment");
            return Ok(key);
        }
    }

    if let Some(key) = sources.config_value.as_ref().filter(|key| !key.is_empty()) {
        debug!("using API key from configuration file");
        return Ok(key.clone());
    }

    Err(anyhow::anyhow!(
        "No API key found for Gemini. Set {} (or {}, {}), add it to a .env file, or configure model.api_key in pageforge.toml",
        sources.primary_env,
        env_vars::GOOGLE_API_KEY,
        env_vars::API_KEY
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_primary_env_is_preferred() {
        let sources = ApiKeySources::new("PAGEFORGE_KEY", Some("config-key".into()));
        let lookup = vars(&[("PAGEFORGE_KEY", "env-key"), ("GEMINI_API_KEY", "gemini-key")]);
        assert_eq!(resolve_api_key(&sources, lookup).unwrap(), "env-key");
    }

    #[test]
    fn test_empty_env_value_is_skipped() {
        let sources = ApiKeySources::new("PAGEFORGE_KEY", Some("config-key".into()));
        let lookup = vars(&[("PAGEFORGE_KEY", ""), ("GOOGLE_API_KEY", "")]);
        assert_eq!(resolve_api_key(&sources, lookup).unwrap(), "config-key");
    }

    #[test]
    fn test_fallbacks_apply_in_order() {
        let sources = ApiKeySources::new("PAGEFORGE_KEY", None);
        let lookup = vars(&[("API_KEY", "last"), ("GOOGLE_API_KEY", "google")]);
        assert_eq!(resolve_api_key(&sources, lookup).unwrap(), "google");
    }

    #[test]
    fn test_missing_key_names_the_variables() {
        let sources = ApiKeySources::new("PAGEFORGE_KEY", Some(String::new()));
        let err = resolve_api_key(&sources, vars(&[])).unwrap_err().to_string();
        assert!(err.contains("PAGEFORGE_KEY"));
        assert!(err.contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn test_fallback_names_are_not_duplicated() {
        let sources = ApiKeySources::default();
        assert_eq!(
            sources.env_candidates(),
            vec!["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY"]
        );

        let custom = ApiKeySources::new("MY_KEY", None);
        assert_eq!(custom.env_candidates()[0], "MY_KEY");
        assert_eq!(custom.env_candidates().len(), 4);
    }
}
