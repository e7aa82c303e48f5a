//! `npw config` — read and write configuration values.

use std::path::PathBuf;

use crate::{
    cli::{ConfigCommands, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    mut config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&format!("{key} = {value}"))?;
        }

        ConfigCommands::Set { key, value } => {
            set_config_value(&mut config, &key, &value)?;
            let path = global.config.clone().unwrap_or_else(AppConfig::config_path);
            config.save(&path).map_err(|e| CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            })?;
            output.success(&format!("{key} = {value}"))?;
        }

        ConfigCommands::List => {
            output.header("Current Configuration:")?;
            let serialised =
                serde_json::to_string_pretty(&config).map_err(|e| CliError::ConfigError {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.print(&serialised)?;
        }

        ConfigCommands::Path => {
            let path = global.config.unwrap_or_else(AppConfig::config_path);
            output.print(&path.display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "defaults.base_package" => Ok(config.defaults.base_package.clone()),
        "defaults.sdk_path" => Ok(display_path(config.defaults.sdk_path.as_ref())),
        "defaults.location" => Ok(display_path(config.defaults.location.as_ref())),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

fn set_config_value(config: &mut AppConfig, key: &str, value: &str) -> CliResult<()> {
    match key {
        "defaults.base_package" => config.defaults.base_package = value.to_owned(),
        "defaults.sdk_path" => config.defaults.sdk_path = Some(PathBuf::from(value)),
        "defaults.location" => config.defaults.location = Some(PathBuf::from(value)),
        "output.no_color" => {
            config.output.no_color = value.parse().map_err(|_| CliError::ConfigError {
                message: format!("'{value}' is not a boolean"),
                source: None,
            })?;
        }
        "output.format" => config.output.format = value.to_owned(),
        _ => {
            return Err(CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            });
        }
    }
    Ok(())
}

fn display_path(path: Option<&PathBuf>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(
            get_config_value(&cfg, "defaults.base_package").unwrap(),
            "com.example"
        );
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut cfg = AppConfig::default();
        set_config_value(&mut cfg, "defaults.base_package", "com.acme").unwrap();
        assert_eq!(
            get_config_value(&cfg, "defaults.base_package").unwrap(),
            "com.acme"
        );

        set_config_value(&mut cfg, "defaults.sdk_path", "/opt/flutter").unwrap();
        assert_eq!(
            get_config_value(&cfg, "defaults.sdk_path").unwrap(),
            "/opt/flutter"
        );
    }

    #[test]
    fn set_bad_boolean_is_error() {
        let mut cfg = AppConfig::default();
        assert!(set_config_value(&mut cfg, "output.no_color", "maybe").is_err());
        set_config_value(&mut cfg, "output.no_color", "true").unwrap();
        assert!(cfg.output.no_color);
    }
}
