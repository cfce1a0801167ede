use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use nalssi::{HttpUpstream, NalssiConfig, telemetry, web};

#[derive(Parser, Debug)]
#[command(name = "nalssi", version, about = "Weather API gateway for Korean locations")]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, env = "NALSSI_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = NalssiConfig::load_from_path(cli.config)?;
    let _telemetry = telemetry::init(&config.logging)?;

    if config.edge.bearer_token.is_none() {
        tracing::warn!("No edge bearer token configured; edge calls are sent without authorization");
    }

    let upstream = HttpUpstream::new(Duration::from_secs(config.open_meteo.timeout_seconds.into()))?;
    web::run(config, Arc::new(upstream)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::try_parse_from(["nalssi", "--config", "nalssi.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("nalssi.toml")));

        let cli = Cli::try_parse_from(["nalssi", "--config=other.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("other.toml")));
    }

    #[test]
    fn test_config_from_environment() {
        // SAFETY: no other test in this binary reads NALSSI_CONFIG without a flag
        unsafe { std::env::set_var("NALSSI_CONFIG", "/etc/nalssi/config.toml") };
        let from_env = Cli::try_parse_from(["nalssi"]).unwrap();
        let from_flag = Cli::try_parse_from(["nalssi", "--config", "local.toml"]).unwrap();
        unsafe { std::env::remove_var("NALSSI_CONFIG") };

        assert_eq!(from_env.config, Some(PathBuf::from("/etc/nalssi/config.toml")));
        assert_eq!(from_flag.config, Some(PathBuf::from("local.toml")));
    }

    #[test]
    fn test_config_flag_without_value_is_rejected() {
        let err = Cli::try_parse_from(["nalssi", "--config"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = Cli::try_parse_from(["nalssi", "--conifg", "x.toml"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
