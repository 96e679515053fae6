use clap::Parser;

use crate::config::DEFAULT_UPSTREAM_URL;

#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Host interface to bind. Defaults to 127.0.0.1.
    #[arg(long = "host", env = "HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on. Defaults to 8788.
    #[arg(long = "port", short = 'p', env = "PORT", default_value_t = 8788)]
    pub port: u16,

    /// Sports-proxy endpoint that chat requests are forwarded to.
    #[arg(long = "upstream-url", env = "SPORTS_PROXY_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,

    /// Bearer token sent to the sports-proxy. Omitted from the request when unset.
    #[arg(long = "auth-token", env = "PROXY_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Deployment environment. Anything other than `production` enables the
    /// mock response when the sports-proxy rejects authentication.
    #[arg(long = "environment", env = "ENVIRONMENT")]
    pub environment: Option<String>,

    /// Seconds to wait for the sports-proxy to start responding.
    #[arg(long = "request-timeout-secs", env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,
}
