use std::fs;
use std::path::{Path, PathBuf};

use crate::settings::types::Settings;
use crate::{Result, StatsError};

/// 设置文件加载器
pub struct SettingsLoader;

impl SettingsLoader {
    const SETTINGS_FILE: &'static str = "statspost.toml";
    const BASE_URL_ENV: &'static str = "STATSPOST_BASE_URL";

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Settings> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            StatsError::Config(format!(
                "Failed to read settings file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        toml::from_str(&content)
            .map_err(|e| StatsError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// 解析本次运行使用的设置
    ///
    /// 显式指定的路径必须存在。否则依次查找当前目录及其父目录、
    /// `~/.config/statspost/`，都没有时使用默认值。
    /// `STATSPOST_BASE_URL` 覆盖服务器地址
    pub fn resolve(explicit: Option<&Path>) -> Result<Settings> {
        let mut settings = match explicit {
            Some(path) => Self::load_from_path(path)?,
            None => match Self::find() {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "Using settings file");
                    Self::load_from_path(&path)?
                }
                None => Settings::default(),
            },
        };

        Self::apply_env(&mut settings, std::env::var(Self::BASE_URL_ENV).ok());
        Ok(settings)
    }

    fn find() -> Option<PathBuf> {
        Self::find_upwards().or_else(Self::find_in_user_dir)
    }

    fn find_upwards() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let candidate = current.join(Self::SETTINGS_FILE);
            if candidate.exists() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    fn find_in_user_dir() -> Option<PathBuf> {
        let candidate = dirs::home_dir()?
            .join(".config")
            .join("statspost")
            .join(Self::SETTINGS_FILE);
        candidate.exists().then_some(candidate)
    }

    fn apply_env(settings: &mut Settings, base_url: Option<String>) {
        if let Some(url) = base_url.filter(|u| !u.trim().is_empty()) {
            settings.server.base_url = url;
        }
    }
}
