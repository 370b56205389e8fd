use anyhow::{anyhow, bail, Context, Result};
use ini::Ini;
use log::LevelFilter;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const IMAGE_SECTION: &str = "image";
const LOG_SECTION: &str = "log";

/// Settings for the `gradient` binary.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientConfig {
    pub width: usize,
    pub height: usize,
    pub output: PathBuf,
    pub gamma: bool,
    pub log_level: LevelFilter,
}

impl Default for GradientConfig {
    fn default() -> GradientConfig {
        GradientConfig {
            width: 800,
            height: 640,
            output: PathBuf::from("main.png"),
            gamma: false,
            log_level: LevelFilter::Info,
        }
    }
}

impl GradientConfig {
    pub fn load<P>(config_path: P) -> Result<GradientConfig>
    where
        P: AsRef<Path>,
    {
        let config_path = config_path.as_ref();
        let config = Ini::load_from_file(config_path)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;
        GradientConfig::from_ini(&config)
    }

    pub fn from_ini(config: &Ini) -> Result<GradientConfig> {
        let defaults = GradientConfig::default();
        let result = GradientConfig {
            width: get_value(config, IMAGE_SECTION, "width", defaults.width)?,
            height: get_value(config, IMAGE_SECTION, "height", defaults.height)?,
            output: get_value(config, IMAGE_SECTION, "output", defaults.output)?,
            gamma: get_value(config, IMAGE_SECTION, "gamma", defaults.gamma)?,
            log_level: get_value(config, LOG_SECTION, "level", defaults.log_level)?,
        };

        if result.width == 0 || result.height == 0 {
            bail!("Image dimensions must be positive, got {}x{}", result.width, result.height);
        }
        Ok(result)
    }
}

fn get_value<T>(config: &Ini, section: &str, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match config.get_from(Some(section), name) {
        Some(value) => value.trim().parse().map_err(|err| {
            anyhow!(
                "Invalid value <{}> for property {} in section [{}]: {}",
                value,
                name,
                section,
                err
            )
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<GradientConfig> {
        GradientConfig::from_ini(&Ini::load_from_str(content).unwrap())
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse("").unwrap(), GradientConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            "[image]\nwidth = 16\nheight = 9\noutput = out/gradient.png\ngamma = true\n\n[log]\nlevel = debug\n",
        )
        .unwrap();

        assert_eq!(
            config,
            GradientConfig {
                width: 16,
                height: 9,
                output: PathBuf::from("out/gradient.png"),
                gamma: true,
                log_level: LevelFilter::Debug,
            }
        );
    }

    #[test]
    fn test_partial_config() {
        let config = parse("[image]\nheight = 2\n").unwrap();
        assert_eq!(config.height, 2);
        assert_eq!(config.width, GradientConfig::default().width);
    }

    #[test]
    fn test_invalid_values() {
        let err = parse("[image]\nwidth = wide\n").unwrap_err();
        assert!(err.to_string().contains("property width in section [image]"));

        assert!(parse("[image]\nheight = 0\n").is_err());
        assert!(parse("[image]\ngamma = maybe\n").is_err());
        assert!(parse("[log]\nlevel = loud\n").is_err());
    }
}
