use anyhow::{Context, Result};
use std::{path::PathBuf, str::FromStr};

use super::config_model::{Database, DotEnvyConfig, QrCode, Server};

pub const DEFAULT_QR_CODE_OUTPUT_DIR: &str = "./qrcodes";

pub fn load() -> Result<DotEnvyConfig> {
    dotenvy::dotenv().ok();

    from_lookup(|key| std::env::var(key).ok())
}

/// Builds the config from any key lookup, so tests need not touch the process env.
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<DotEnvyConfig> {
    let server = Server {
        port: parse_required(&lookup, "SERVER_PORT")?,
        body_limit: parse_required(&lookup, "SERVER_BODY_LIMIT")?,
        timeout: parse_required(&lookup, "SERVER_TIMEOUT")?,
    };

    let database = Database {
        url: required(&lookup, "DATABASE_URL")?,
    };

    let qr_code = QrCode {
        output_dir: lookup("QR_CODE_OUTPUT_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_QR_CODE_OUTPUT_DIR)),
    };

    Ok(DotEnvyConfig {
        server,
        database,
        qr_code,
    })
}

fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key).with_context(|| format!("{key} is invalid"))
}

fn parse_required<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    required(lookup, key)?
        .trim()
        .parse()
        .with_context(|| format!("{key} is invalid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn base_env() -> HashMap<String, String> {
        env(&[
            ("SERVER_PORT", "8080"),
            ("SERVER_BODY_LIMIT", "10"),
            ("SERVER_TIMEOUT", "30"),
            ("DATABASE_URL", "postgres://localhost/qrcode_registry"),
        ])
    }

    #[test]
    fn loads_required_values_and_default_output_dir() {
        let vars = base_env();
        let config = from_lookup(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.body_limit, 10);
        assert_eq!(config.server.timeout, 30);
        assert_eq!(config.database.url, "postgres://localhost/qrcode_registry");
        assert_eq!(
            config.qr_code.output_dir,
            PathBuf::from(DEFAULT_QR_CODE_OUTPUT_DIR)
        );
    }

    #[test]
    fn output_dir_can_be_overridden() {
        let mut vars = base_env();
        vars.insert("QR_CODE_OUTPUT_DIR".to_string(), "/var/lib/qrcodes".to_string());

        let config = from_lookup(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(config.qr_code.output_dir, PathBuf::from("/var/lib/qrcodes"));
    }

    #[test]
    fn missing_variable_is_named_in_the_error() {
        let mut vars = base_env();
        vars.remove("DATABASE_URL");

        let err = from_lookup(|key| vars.get(key).cloned()).unwrap_err();

        assert_eq!(err.to_string(), "DATABASE_URL is invalid");
    }

    #[test]
    fn unparsable_port_is_rejected() {
        let mut vars = base_env();
        vars.insert("SERVER_PORT".to_string(), "eighty".to_string());

        let err = from_lookup(|key| vars.get(key).cloned()).unwrap_err();

        assert_eq!(err.to_string(), "SERVER_PORT is invalid");
    }
}
