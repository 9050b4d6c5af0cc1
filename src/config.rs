use crate::cli::{Cli, Command, PaletteFormat};
use crate::color::FALLBACK_HEX;
use crate::error::DevboxError;
use anyhow::Result;
use clap::{ArgMatches, parser::ValueSource};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_ENV: &str = "DEVBOX_CONFIG_PATH";
const NO_COLOR_ENV: &str = "DEVBOX_NO_COLOR";

fn arg_has_user_value(matches: &ArgMatches, id: &str) -> bool {
    matches
        .value_source(id)
        .map(|source| matches!(source, ValueSource::CommandLine | ValueSource::EnvVariable))
        .unwrap_or(false)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Display options
    pub no_colors: bool,

    // Markdown output
    pub standalone: bool,

    // Palette output
    pub palette_format: PaletteFormat,
    pub base_color: String,

    // File paths
    pub config_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_colors: false,
            standalone: false,
            palette_format: PaletteFormat::Table,
            base_color: FALLBACK_HEX.to_string(),
            config_file: None,
        }
    }
}

impl Config {
    pub fn from_cli(cli: &Cli, matches: &ArgMatches) -> Result<Self> {
        let mut config = Self::load_config_files(cli, matches)?;

        if let Some(no_colors) = devbox_no_color_override() {
            config.no_colors = no_colors;
        }

        if cli.no_colors {
            config.no_colors = true;
        }

        match &cli.command {
            Command::Markdown(args) => {
                if args.standalone {
                    config.standalone = true;
                }
            }
            Command::Palette(args) => {
                if let (Some(format), Some(sub_matches)) =
                    (args.format, matches.subcommand_matches("palette"))
                {
                    if arg_has_user_value(sub_matches, "format") {
                        config.palette_format = format;
                    }
                }
            }
            Command::Convert(_) => {}
        }

        log::debug!("resolved configuration: {:?}", config);
        Ok(config)
    }

    fn load_config_files(cli: &Cli, matches: &ArgMatches) -> Result<Self> {
        if cli.no_config {
            return Ok(Self::default());
        }

        let mut config = Self::default();

        for path in Self::get_config_paths(cli, matches) {
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(file_config) => {
                        config.merge_with(file_config);
                        config.config_file = Some(path.clone());
                        break;
                    }
                    Err(e) => {
                        log::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(config)
    }

    fn get_config_paths(cli: &Cli, matches: &ArgMatches) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(config_file) = &cli.config_file {
            if arg_has_user_value(matches, "config_file") {
                paths.push(config_file.clone());
            }
        }

        if let Some(env_path) = std::env::var_os(CONFIG_FILE_ENV) {
            if !env_path.is_empty() {
                paths.push(PathBuf::from(env_path));
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let devbox_dir = config_dir.join("devbox");
            paths.push(devbox_dir.join("config.yaml"));
            paths.push(devbox_dir.join("config.yml"));
        }

        paths
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str::<Self>(&content).map_err(|_| {
            anyhow::Error::from(DevboxError::ConfigParseError(format!(
                "Failed to parse YAML config file: {}",
                path.display()
            )))
        })
    }

    fn merge_with(&mut self, other: Self) {
        if other.no_colors {
            self.no_colors = true;
        }

        if other.standalone {
            self.standalone = true;
        }

        if other.palette_format != PaletteFormat::Table {
            self.palette_format = other.palette_format;
        }

        if other.base_color != FALLBACK_HEX {
            self.base_color = other.base_color;
        }
    }
}

pub(crate) fn devbox_no_color_override() -> Option<bool> {
    let raw_value = std::env::var_os(NO_COLOR_ENV)?;
    let value = raw_value.to_string_lossy();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized = trimmed.to_ascii_lowercase();
    match normalized.as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => {
            log::warn!(
                "Invalid value '{}' for environment variable {}. Use 'True' or 'False'.",
                trimmed,
                NO_COLOR_ENV
            );
            None
        }
    }
}
