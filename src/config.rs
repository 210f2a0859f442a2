use std::env;

use crate::errors::AppError;
use crate::models::HoursPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPersistence {
    /// A fresh session id on every start.
    Ephemeral,
    /// Session id kept in client-local storage under `session_id`.
    Persistent,
}

impl SessionPersistence {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPersistence::Ephemeral => "ephemeral",
            SessionPersistence::Persistent => "persistent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ephemeral" => Some(SessionPersistence::Ephemeral),
            "persistent" => Some(SessionPersistence::Persistent),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub backend_url: String,
    pub session_persistence: SessionPersistence,
    pub storage_path: String,
    pub request_timeout_secs: u64,
    pub hours_policy: HoursPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            session_persistence: SessionPersistence::Ephemeral,
            storage_path: "clinic_chat.db".to_string(),
            request_timeout_secs: 30,
            hours_policy: HoursPolicy::Enforced,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let session_persistence = match lookup("SESSION_PERSISTENCE") {
            Some(v) => SessionPersistence::parse(&v).ok_or_else(|| {
                AppError::Config(format!(
                    "SESSION_PERSISTENCE must be `ephemeral` or `persistent`, got `{v}`"
                ))
            })?,
            None => defaults.session_persistence,
        };

        let hours_policy = match lookup("ENFORCE_BUSINESS_HOURS") {
            Some(v) => match v.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" => HoursPolicy::Enforced,
                "false" | "0" | "no" => HoursPolicy::Unrestricted,
                _ => {
                    return Err(AppError::Config(format!(
                        "ENFORCE_BUSINESS_HOURS must be true or false, got `{v}`"
                    )))
                }
            },
            None => defaults.hours_policy,
        };

        let request_timeout_secs = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(AppError::Config(format!(
                        "REQUEST_TIMEOUT_SECS must be a positive number of seconds, got `{v}`"
                    )))
                }
            },
            None => defaults.request_timeout_secs,
        };

        Ok(Self {
            backend_url: lookup("CHAT_BACKEND_URL").unwrap_or(defaults.backend_url),
            session_persistence,
            storage_path: lookup("CLIENT_STORAGE_PATH").unwrap_or(defaults.storage_path),
            request_timeout_secs,
            hours_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.session_persistence, SessionPersistence::Ephemeral);
        assert_eq!(config.storage_path, "clinic_chat.db");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.hours_policy, HoursPolicy::Enforced);
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("CHAT_BACKEND_URL", "http://64.227.171.48:8000"),
            ("SESSION_PERSISTENCE", "Persistent"),
            ("CLIENT_STORAGE_PATH", "/tmp/chat.db"),
            ("REQUEST_TIMEOUT_SECS", "5"),
            ("ENFORCE_BUSINESS_HOURS", "false"),
        ]))
        .unwrap();
        assert_eq!(config.backend_url, "http://64.227.171.48:8000");
        assert_eq!(config.session_persistence, SessionPersistence::Persistent);
        assert_eq!(config.storage_path, "/tmp/chat.db");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.hours_policy, HoursPolicy::Unrestricted);
    }

    #[test]
    fn test_invalid_persistence_rejected() {
        let err = ClientConfig::from_lookup(lookup_from(&[("SESSION_PERSISTENCE", "cookie")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let err = ClientConfig::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = ClientConfig::from_lookup(lookup_from(&[("REQUEST_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_invalid_hours_flag_rejected() {
        let err = ClientConfig::from_lookup(lookup_from(&[("ENFORCE_BUSINESS_HOURS", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_persistence_round_trip_names() {
        for p in [SessionPersistence::Ephemeral, SessionPersistence::Persistent] {
            assert_eq!(SessionPersistence::parse(p.as_str()), Some(p));
        }
    }
}
