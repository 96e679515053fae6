use std::time::Duration;

use crate::cli::Cli;

pub const DEFAULT_UPSTREAM_URL: &str = "https://sports-proxy.gerrygugger.workers.dev/responses";

const PRODUCTION: &str = "production";

/// Process-wide settings, resolved once at startup and shared read-only by
/// every request.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub upstream_url: String,
    pub auth_token: Option<String>,
    pub environment: Option<String>,
    pub request_timeout: Duration,
}

impl ServerConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        let upstream_url = non_empty(Some(cli.upstream_url.clone()))
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string());
        Self {
            upstream_url,
            auth_token: non_empty(cli.auth_token.clone()),
            environment: non_empty(cli.environment.clone()),
            request_timeout: Duration::from_secs(cli.request_timeout_secs),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment.as_deref() == Some(PRODUCTION)
    }

    pub fn has_token(&self) -> bool {
        self.auth_token.is_some()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            auth_token: None,
            environment: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["sports-chat-server"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let cli = parse(&["--upstream-url", "", "--auth-token", "", "--environment", ""]);
        let cfg = ServerConfig::from_cli(&cli);
        assert_eq!(cfg.upstream_url, DEFAULT_UPSTREAM_URL);
        assert!(!cfg.has_token());
        assert!(!cfg.is_production());
    }

    #[test]
    fn explicit_values_are_kept() {
        let cli = parse(&[
            "--upstream-url",
            "http://localhost:9000/responses",
            "--auth-token",
            "abc",
            "--environment",
            "production",
            "--request-timeout-secs",
            "5",
        ]);
        let cfg = ServerConfig::from_cli(&cli);
        assert_eq!(cfg.upstream_url, "http://localhost:9000/responses");
        assert_eq!(cfg.auth_token.as_deref(), Some("abc"));
        assert!(cfg.is_production());
        assert_eq!(cfg.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn only_exact_production_marker_counts() {
        let cfg = ServerConfig {
            environment: Some("Production".to_string()),
            ..ServerConfig::default()
        };
        assert!(!cfg.is_production());
    }
}
