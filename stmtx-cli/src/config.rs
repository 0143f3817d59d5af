use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub service: ServiceSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSection {
    /// Base URL of the extraction service.
    pub base_url: String,
    /// Per-request timeout. Absent means no timeout, matching the service's
    /// reference client.
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceSection {
                base_url: "http://localhost:8080".to_string(),
                timeout_secs: None,
            },
        }
    }
}

pub fn stmtx_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".stmtx"))
}

pub fn ensure_stmtx_home() -> Result<PathBuf> {
    let dir = stmtx_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(stmtx_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(toml::from_str(&s).context("parse config.toml")?)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    ensure_stmtx_home()?;
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let cfg = Config::default();
        let s = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&s).unwrap();
        assert_eq!(back.service.base_url, "http://localhost:8080");
        assert_eq!(back.service.timeout_secs, None);
    }

    #[test]
    fn partial_config_fills_in_nothing_silently() {
        let cfg: Config = toml::from_str("[service]\nbase_url = \"http://stmt.local\"\n").unwrap();
        assert_eq!(cfg.service.base_url, "http://stmt.local");
        assert_eq!(cfg.service.timeout_secs, None);
    }
}
