use anyhow::{bail, Result};
use clap::Parser;
use dotenvy::dotenv;
use serde::Deserialize;

/// Prefix for every environment variable the application reads
const ENV_PREFIX: &str = "INVOICE_DESK_";

/// Notifications live between one second and one hour
const MIN_TOAST_SECONDS: i64 = 1;
const MAX_TOAST_SECONDS: i64 = 3600;

/// Command line overrides
#[derive(Debug, Default, Parser)]
#[command(name = "invoice_desk", about = "Terminal invoice entry desk")]
pub struct Cli {
    /// Write logs to this file instead of the configured one
    #[arg(long)]
    pub log_file: Option<String>,

    /// How long notifications stay on screen
    #[arg(long, value_parser = clap::value_parser!(i64).range(MIN_TOAST_SECONDS..=MAX_TOAST_SECONDS))]
    pub toast_seconds: Option<i64>,
}

/// Configuration for the application
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Email accepted by the login screen
    #[serde(default = "default_login_email")]
    pub login_email: String,

    /// Password accepted by the login screen
    #[serde(default = "default_login_password")]
    pub login_password: String,

    /// Notification time-to-live in seconds
    #[serde(default = "default_toast_seconds")]
    pub toast_seconds: i64,

    /// Log file path; the terminal itself belongs to the UI
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// `tracing` filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_login_email() -> String {
    "admin@gmail.com".to_string()
}

fn default_login_password() -> String {
    "123456".to_string()
}

fn default_toast_seconds() -> i64 {
    3
}

fn default_log_file() -> String {
    "invoice_desk.log".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            login_email: default_login_email(),
            login_password: default_login_password(),
            toast_seconds: default_toast_seconds(),
            log_file: default_log_file(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Variables are read with the `INVOICE_DESK_` prefix, e.g.
    /// `INVOICE_DESK_LOGIN_EMAIL`. Anything missing falls back to its default.
    pub fn load() -> Result<Self> {
        let config = envy::prefixed(ENV_PREFIX).from_env::<Config>()?;

        Ok(config)
    }

    /// Reject values the UI cannot honor. Run after CLI overrides are merged.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_TOAST_SECONDS..=MAX_TOAST_SECONDS).contains(&self.toast_seconds) {
            bail!(
                "toast seconds must be between {} and {}, got {}",
                MIN_TOAST_SECONDS,
                MAX_TOAST_SECONDS,
                self.toast_seconds
            );
        }
        Ok(())
    }

    /// Apply command line overrides on top of the environment
    pub fn merge_cli(mut self, cli: Cli) -> Self {
        if let Some(log_file) = cli.log_file {
            self.log_file = log_file;
        }
        if let Some(seconds) = cli.toast_seconds {
            self.toast_seconds = seconds;
        }
        self
    }

    pub fn toast_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.toast_seconds.clamp(MIN_TOAST_SECONDS, MAX_TOAST_SECONDS))
    }
}

/// Initialize environment variables and load configuration
pub fn init() -> Result<Config> {
    // Ensure .env file is loaded
    dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load()?.merge_cli(cli);
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_built_in_login() {
        let config = Config::default();
        assert_eq!(config.login_email, "admin@gmail.com");
        assert_eq!(config.login_password, "123456");
        assert_eq!(config.toast_ttl(), chrono::Duration::seconds(3));
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let vars: Vec<(String, String)> = vec![
            ("INVOICE_DESK_TOAST_SECONDS".to_string(), "7".to_string()),
        ];
        let config: Config = envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .unwrap();

        assert_eq!(config.toast_seconds, 7);
        assert_eq!(config.login_email, "admin@gmail.com");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn cli_overrides_environment() {
        let cli = Cli::parse_from(["invoice_desk", "--log-file", "/tmp/desk.log", "--toast-seconds", "10"]);
        let config = Config::default().merge_cli(cli);

        assert_eq!(config.log_file, "/tmp/desk.log");
        assert_eq!(config.toast_ttl(), chrono::Duration::seconds(10));
    }

    #[test]
    fn out_of_range_toast_seconds_are_rejected() {
        for value in ["0", "3601", "9223372036854775807"] {
            assert!(Cli::try_parse_from(["invoice_desk", "--toast-seconds", value]).is_err());
        }

        let vars: Vec<(String, String)> = vec![(
            "INVOICE_DESK_TOAST_SECONDS".to_string(),
            i64::MAX.to_string(),
        )];
        let config: Config = envy::prefixed(ENV_PREFIX).from_iter(vars).unwrap();
        assert!(config.validate().is_err());
        // Even unchecked values never overflow the duration
        assert_eq!(config.toast_ttl(), chrono::Duration::seconds(3600));
    }
}
