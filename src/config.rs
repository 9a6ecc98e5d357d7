use thiserror::Error;

/// Application-level constants
pub const SERVICE_NAME: &str = "CoverWatch";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Vendor-facing portal where renewed certificates are uploaded.
const DEFAULT_PORTAL_URL: &str = "https://coverwatch-portal.onrender.com";

/// Operator inbox that receives reminders for policies with no linked vendor.
const DEFAULT_FALLBACK_EMAIL: &str = "compliance-ops@coverwatch.dev";

/// Resend's shared onboarding sender, usable without a verified domain.
const DEFAULT_MAIL_FROM: &str = "onboarding@resend.dev";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Process-wide configuration, built once at startup and passed into each
/// component. Nothing below this layer reads the environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    /// Service-role key; used for both storage downloads and table access.
    pub supabase_key: String,
    pub gemini_api_key: String,
    /// Absent key puts the mailer in log-only mode.
    pub resend_api_key: Option<String>,
    pub mail_from: String,
    pub portal_url: String,
    pub fallback_email: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |key: &'static str| {
            get(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingVar(key))
        };

        Ok(Self {
            supabase_url: required("SUPABASE_URL")?,
            supabase_key: required("SUPABASE_KEY")?,
            gemini_api_key: required("GEMINI_API_KEY")?,
            resend_api_key: get("RESEND_API_KEY").filter(|value| !value.is_empty()),
            mail_from: get("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.into()),
            portal_url: get("PORTAL_URL").unwrap_or_else(|| DEFAULT_PORTAL_URL.into()),
            fallback_email: get("FALLBACK_EMAIL")
                .unwrap_or_else(|| DEFAULT_FALLBACK_EMAIL.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn base_env() -> HashMap<String, String> {
        env(&[
            ("SUPABASE_URL", "https://proj.supabase.co"),
            ("SUPABASE_KEY", "service-role-key"),
            ("GEMINI_API_KEY", "gemini-key"),
        ])
    }

    #[test]
    fn full_config_from_lookup() {
        let mut vars = base_env();
        vars.insert("RESEND_API_KEY".into(), "re_123".into());
        vars.insert("PORTAL_URL".into(), "https://portal.example".into());

        let config = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.supabase_url, "https://proj.supabase.co");
        assert_eq!(config.resend_api_key.as_deref(), Some("re_123"));
        assert_eq!(config.portal_url, "https://portal.example");
    }

    #[test]
    fn missing_required_var_names_it() {
        let mut vars = base_env();
        vars.remove("GEMINI_API_KEY");

        let err = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("GEMINI_API_KEY")));
    }

    #[test]
    fn empty_required_var_is_missing() {
        let mut vars = base_env();
        vars.insert("SUPABASE_KEY".into(), String::new());

        let err = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("SUPABASE_KEY")));
    }

    #[test]
    fn optional_vars_default() {
        let vars = base_env();
        let config = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert!(config.resend_api_key.is_none());
        assert_eq!(config.mail_from, DEFAULT_MAIL_FROM);
        assert_eq!(config.portal_url, DEFAULT_PORTAL_URL);
        assert_eq!(config.fallback_email, DEFAULT_FALLBACK_EMAIL);
    }

    #[test]
    fn empty_resend_key_means_mock_mode() {
        let mut vars = base_env();
        vars.insert("RESEND_API_KEY".into(), String::new());

        let config = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert!(config.resend_api_key.is_none());
    }
}
