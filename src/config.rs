use crate::limits::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub max_duration_minutes: i64,
    pub notice_window_minutes: i64,
    pub output: OutputFormat,
    pub metrics_port: Option<u16>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_duration_minutes: DEFAULT_MAX_DURATION_MINUTES,
            notice_window_minutes: DEFAULT_NOTICE_WINDOW_MINUTES,
            output: OutputFormat::Text,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Read `SALAS_*` environment variables. Missing or unparseable values keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let max_duration_minutes = lookup("SALAS_MAX_DURATION_MINUTES")
            .and_then(|s| s.parse().ok())
            .filter(|m: &i64| *m > 0)
            .unwrap_or(defaults.max_duration_minutes);
        let notice_window_minutes = lookup("SALAS_NOTICE_WINDOW_MINUTES")
            .and_then(|s| s.parse().ok())
            .filter(|m: &i64| *m >= 0)
            .unwrap_or(defaults.notice_window_minutes);
        let output = match lookup("SALAS_OUTPUT").as_deref() {
            Some(s) if s.eq_ignore_ascii_case("json") => OutputFormat::Json,
            _ => OutputFormat::Text,
        };
        let metrics_port = lookup("SALAS_METRICS_PORT").and_then(|s| s.parse().ok());
        Self {
            max_duration_minutes,
            notice_window_minutes,
            output,
            metrics_port,
        }
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
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.max_duration_minutes, 120);
        assert_eq!(config.notice_window_minutes, 60);
    }

    #[test]
    fn overrides_from_env() {
        let config = Config::from_lookup(lookup_from(&[
            ("SALAS_MAX_DURATION_MINUTES", "90"),
            ("SALAS_NOTICE_WINDOW_MINUTES", "15"),
            ("SALAS_OUTPUT", "JSON"),
            ("SALAS_METRICS_PORT", "9100"),
        ]));
        assert_eq!(config.max_duration_minutes, 90);
        assert_eq!(config.notice_window_minutes, 15);
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.metrics_port, Some(9100));
    }

    #[test]
    fn garbage_falls_back_to_default() {
        let config = Config::from_lookup(lookup_from(&[
            ("SALAS_MAX_DURATION_MINUTES", "lots"),
            ("SALAS_NOTICE_WINDOW_MINUTES", "-5"),
            ("SALAS_METRICS_PORT", "99999"),
        ]));
        assert_eq!(config.max_duration_minutes, 120);
        assert_eq!(config.notice_window_minutes, 60);
        assert_eq!(config.metrics_port, None);
    }
}
