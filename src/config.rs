use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use crate::types::SortKey;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub defaults: DefaultsConfig,
    pub formatting: FormattingConfig,
}

/// Analysis defaults applied when the matching CLI flags are absent.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DefaultsConfig {
    pub top_n: usize,
    pub sort: SortKey,
    pub min_duration_ms: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct FormattingConfig {
    pub number_comma: bool,
    pub number_human: bool,
    pub locale: String,
    pub decimal_places: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: DefaultsConfig {
                top_n: 5,
                sort: SortKey::Count,
                min_duration_ms: 0,
            },
            formatting: FormattingConfig {
                number_comma: false,
                number_human: false,
                locale: "en".to_string(),
                decimal_places: 1,
            },
        }
    }
}

thread_local! {
    static TEST_CONFIG_PATH: RefCell<Option<PathBuf>> = const { RefCell::new(None) };
}

#[cfg(test)]
pub fn set_test_config_path(path: PathBuf) {
    TEST_CONFIG_PATH.with(|p| *p.borrow_mut() = Some(path));
}

impl Config {
    pub fn config_path() -> Result<PathBuf> {
        #[cfg(test)]
        {
            if let Some(path) = TEST_CONFIG_PATH.with(|p| p.borrow().clone()) {
                return Ok(path);
            }
        }

        Ok(dirs::home_dir()
            .context("Could not find home directory")?
            .join(".rewind.toml"))
    }

    pub fn load() -> Result<Option<Config>> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        Ok(Some(config))
    }

    pub fn save(&self, silent: bool) -> Result<()> {
        let config_path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, content).context("Failed to write config file")?;

        if !silent {
            println!("✅ Configuration saved to: {}", config_path.display());
        }

        Ok(())
    }
}

// CLI helper functions
pub fn create_default_config(overwrite: bool) -> Result<()> {
    let config = Config::default();
    if !std::fs::exists(Config::config_path()?)? || overwrite {
        config.save(true)?;

        println!("📝 Created default configuration file at:");
        println!("   {}", Config::config_path()?.display());
    } else {
        println!("Configuration already exists.  Pass `--overwrite` to overwrite.");
    }

    Ok(())
}

pub fn show_config() -> Result<()> {
    match Config::load()? {
        Some(config) => {
            println!("🔧 Current configuration:");
            println!("   Top N: {}", config.defaults.top_n);
            println!("   Sort: {}", config.defaults.sort.label());
            println!("   Min Duration (ms): {}", config.defaults.min_duration_ms);
            println!("   Number Comma: {}", config.formatting.number_comma);
            println!("   Number Human: {}", config.formatting.number_human);
            println!("   Locale: {}", config.formatting.locale);
            println!("   Decimal Places: {}", config.formatting.decimal_places);
        }
        None => {
            println!("❌ No configuration file found.");
            println!("   Run 'rewind config init' to create one.");
        }
    }
    Ok(())
}

pub fn set_config_value(key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?.unwrap_or_default();

    match key {
        "top-n" => {
            let top_n = value.parse::<usize>().context("Invalid number value")?;
            config.defaults.top_n = top_n;
        }
        "sort" => {
            config.defaults.sort = match value {
                "count" => SortKey::Count,
                "ms-played" | "ms_played" | "time" => SortKey::MsPlayed,
                _ => anyhow::bail!("Invalid sort key. Use 'count' or 'ms-played'"),
            };
        }
        "min-duration-ms" => {
            let ms = value.parse::<u64>().context("Invalid number value")?;
            config.defaults.min_duration_ms = ms;
        }
        "number-comma" => {
            let enabled = value
                .parse::<bool>()
                .context("Invalid boolean value. Use 'true' or 'false'")?;
            config.formatting.number_comma = enabled;
        }
        "number-human" => {
            let enabled = value
                .parse::<bool>()
                .context("Invalid boolean value. Use 'true' or 'false'")?;
            config.formatting.number_human = enabled;
        }
        "locale" => {
            config.formatting.locale = value.to_string();
        }
        "decimal-places" => {
            let places = value.parse::<usize>().context("Invalid number value")?;
            config.formatting.decimal_places = places;
        }
        _ => anyhow::bail!("Unknown config key: {}", key),
    }

    config.save(false)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_config() -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("tempdir");
        let config_path = dir.path().join(".rewind.toml");
        set_test_config_path(config_path.clone());
        (dir, config_path)
    }

    #[test]
    fn default_config_round_trip() {
        let (_dir, _path) = setup_test_config();
        create_default_config(true).expect("create_default_config");

        let loaded = Config::load()
            .expect("load config")
            .expect("config should exist");

        assert_eq!(loaded.defaults.top_n, 5);
        assert_eq!(loaded.defaults.sort, SortKey::Count);
        assert_eq!(loaded.defaults.min_duration_ms, 0);
        assert_eq!(loaded.formatting.locale, "en");
    }

    #[test]
    fn set_config_value_behaviour() {
        let (_dir, _path) = setup_test_config();
        create_default_config(true).expect("create_default_config");

        set_config_value("top-n", "10").expect("set top-n");
        set_config_value("sort", "ms-played").expect("set sort");
        set_config_value("min-duration-ms", "30000").expect("set min-duration-ms");
        set_config_value("number-comma", "true").expect("set number-comma");
        set_config_value("locale", "de").expect("set locale");
        set_config_value("decimal-places", "3").expect("set decimal-places");

        let cfg = Config::load()
            .expect("load config")
            .expect("config should exist");

        assert_eq!(cfg.defaults.top_n, 10);
        assert_eq!(cfg.defaults.sort, SortKey::MsPlayed);
        assert_eq!(cfg.defaults.min_duration_ms, 30_000);
        assert!(cfg.formatting.number_comma);
        assert_eq!(cfg.formatting.locale, "de");
        assert_eq!(cfg.formatting.decimal_places, 3);

        let err = set_config_value("unknown-key", "value").unwrap_err();
        assert!(format!("{err}").contains("Unknown config key"));
        let err = set_config_value("sort", "alphabetical").unwrap_err();
        assert!(format!("{err}").contains("Invalid sort key"));
    }
}
