use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::utils::{ensure_dir, PathResolver};
use crate::errors::{FinanceError, Result};

const TMP_SUFFIX: &str = "tmp";

/// Number of years offered by the year selector when nothing is configured.
pub const DEFAULT_YEAR_SPAN: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub currency_symbol: String,
    pub year_span: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_user: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: "R$".into(),
            year_span: DEFAULT_YEAR_SPAN,
            data_dir: None,
            last_user: None,
        }
    }
}

impl Config {
    /// Formats an amount with the configured currency symbol and two decimals.
    pub fn format_money(&self, amount: f64) -> String {
        format!("{} {:.2}", self.currency_symbol, amount)
    }

    fn validate(&self) -> Result<()> {
        if self.year_span == 0 {
            return Err(FinanceError::Config("year_span must be at least 1".into()));
        }
        if self.currency_symbol.trim().is_empty() {
            return Err(FinanceError::Config(
                "currency_symbol must not be empty".into(),
            ));
        }
        Ok(())
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    /// Reads the config file, falling back to defaults when it does not exist.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| FinanceError::Config(format!("{}: {}", self.path.display(), err)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    /// Directory documents are stored under: the configured override, else
    /// the directory holding the config file.
    pub fn data_dir(&self, config: &Config) -> PathBuf {
        config.data_dir.clone().unwrap_or_else(|| self.base.clone())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager() -> (ConfigManager, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).expect("manager");
        (manager, temp)
    }

    #[test]
    fn missing_file_loads_defaults() {
        let (manager, _guard) = manager();
        let config = manager.load().expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.format_money(12.5), "R$ 12.50");
    }

    #[test]
    fn save_then_load_keeps_changes() {
        let (manager, guard) = manager();
        let config = Config {
            currency_symbol: "€".into(),
            year_span: 3,
            last_user: Some("u-1".into()),
            ..Config::default()
        };
        manager.save(&config).expect("save");
        assert_eq!(manager.load().expect("load"), config);
        assert_eq!(manager.data_dir(&config), guard.path());
        assert!(!tmp_path(manager.path()).exists());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let (manager, _guard) = manager();
        fs::write(manager.path(), r#"{"year_span": 2}"#).expect("seed");
        let config = manager.load().expect("load");
        assert_eq!(config.year_span, 2);
        assert_eq!(config.currency_symbol, "R$");
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let (manager, _guard) = manager();
        fs::write(manager.path(), r#"{"year_span": 0}"#).expect("seed");
        assert!(matches!(manager.load(), Err(FinanceError::Config(_))));
        fs::write(manager.path(), "not json").expect("seed");
        assert!(matches!(manager.load(), Err(FinanceError::Config(_))));
    }
}
