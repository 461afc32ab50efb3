// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "DASHBOARD_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/dashboard.toml";
pub const DEFAULT_TABLE: &str = "competitor_updates";

fn default_table() -> String {
    DEFAULT_TABLE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub supabase_url: Option<String>,
    /// "ENV" means: read from SUPABASE_ANON_KEY.
    #[serde(default)]
    pub supabase_anon_key: Option<String>,
    #[serde(default = "default_table")]
    pub table: String,
    /// JSON file replacing the embedded sample set.
    #[serde(default)]
    pub fallback_path: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_anon_key: None,
            table: default_table(),
            fallback_path: None,
        }
    }
}

impl DashboardConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading dashboard config from {}", path.display()))?;
        let cfg: DashboardConfig = toml::from_str(&content)
            .with_context(|| format!("parsing dashboard config {}", path.display()))?;
        Ok(cfg)
    }

    /// File layer, then environment overrides:
    /// 1) $DASHBOARD_CONFIG_PATH (must exist when set)
    /// 2) config/dashboard.toml (optional)
    /// 3) SUPABASE_URL / SUPABASE_ANON_KEY / DASHBOARD_TABLE / DASHBOARD_FALLBACK_PATH
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from_file(&pb)?
        } else {
            let pb = PathBuf::from(DEFAULT_CONFIG_PATH);
            if pb.exists() {
                Self::load_from_file(&pb)?
            } else {
                Self::default()
            }
        };
        cfg.apply_env();
        cfg.resolve_key()?;
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Some(v) = non_empty_env("SUPABASE_URL") {
            self.supabase_url = Some(v);
        }
        if let Some(v) = non_empty_env("SUPABASE_ANON_KEY") {
            if !self.key_from_env() {
                self.supabase_anon_key = Some(v);
            }
        }
        if let Some(v) = non_empty_env("DASHBOARD_TABLE") {
            self.table = v;
        }
        if let Some(v) = non_empty_env("DASHBOARD_FALLBACK_PATH") {
            self.fallback_path = Some(PathBuf::from(v));
        }
    }

    fn key_from_env(&self) -> bool {
        self.supabase_anon_key
            .as_deref()
            .is_some_and(|k| k.trim().eq_ignore_ascii_case("env"))
    }

    fn resolve_key(&mut self) -> Result<()> {
        if self.key_from_env() {
            let key = non_empty_env("SUPABASE_ANON_KEY")
                .ok_or_else(|| anyhow!("Missing SUPABASE_ANON_KEY env var"))?;
            self.supabase_anon_key = Some(key);
        }
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_anon_key.is_some()
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    const VARS: [&str; 5] = [
        ENV_CONFIG_PATH,
        "SUPABASE_URL",
        "SUPABASE_ANON_KEY",
        "DASHBOARD_TABLE",
        "DASHBOARD_FALLBACK_PATH",
    ];

    fn clear_env() {
        for v in VARS {
            env::remove_var(v);
        }
    }

    #[test]
    fn table_defaults_when_missing() {
        let cfg: DashboardConfig = toml::from_str(r#"supabase_url = "https://x.supabase.co""#).unwrap();
        assert_eq!(cfg.table, DEFAULT_TABLE);
        assert!(!cfg.is_configured());
    }

    #[serial_test::serial]
    #[test]
    fn file_then_env_overrides() {
        clear_env();
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("dashboard.toml");
        fs::write(
            &p,
            r#"
supabase_url = "https://file.supabase.co"
supabase_anon_key = "file-key"
table = "from_file"
"#,
        )
        .unwrap();
        env::set_var(ENV_CONFIG_PATH, p.display().to_string());

        let cfg = DashboardConfig::load_default().unwrap();
        assert_eq!(cfg.supabase_url.as_deref(), Some("https://file.supabase.co"));
        assert_eq!(cfg.table, "from_file");

        env::set_var("SUPABASE_URL", "https://env.supabase.co");
        env::set_var("DASHBOARD_TABLE", "from_env");
        let cfg = DashboardConfig::load_default().unwrap();
        assert_eq!(cfg.supabase_url.as_deref(), Some("https://env.supabase.co"));
        assert_eq!(cfg.supabase_anon_key.as_deref(), Some("file-key"));
        assert_eq!(cfg.table, "from_env");
        assert!(cfg.is_configured());

        clear_env();
    }

    #[serial_test::serial]
    #[test]
    fn env_key_placeholder_requires_var() {
        clear_env();
        let tmp = tempfile::tempdir().unwrap();
        let p = tmp.path().join("dashboard.toml");
        fs::write(&p, r#"supabase_anon_key = "ENV""#).unwrap();
        env::set_var(ENV_CONFIG_PATH, p.display().to_string());

        assert!(DashboardConfig::load_default().is_err());

        env::set_var("SUPABASE_ANON_KEY", "secret");
        let cfg = DashboardConfig::load_default().unwrap();
        assert_eq!(cfg.supabase_anon_key.as_deref(), Some("secret"));

        clear_env();
    }

    #[serial_test::serial]
    #[test]
    fn missing_explicit_path_is_an_error() {
        clear_env();
        env::set_var(ENV_CONFIG_PATH, "/definitely/not/here.toml");
        assert!(DashboardConfig::load_default().is_err());
        clear_env();
    }
}
