//! 应用配置管理
//!
//! 提供配置的加载与更新功能，使用全局单例模式管理配置状态。

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::ClientError;

/// 获取默认配置文件路径
fn get_config_path() -> PathBuf {
    // 配置文件位于可执行文件同级目录
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.json")
}

/// 应用配置结构体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// API 基础 URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// 建立连接的超时（秒）
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// 请求日志目录，未设置时不记录
    #[serde(default)]
    pub request_log_dir: Option<PathBuf>,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_log_dir: None,
        }
    }
}

/// 全局配置单例
static CONFIG: Lazy<RwLock<AppConfig>> = Lazy::new(|| {
    RwLock::new(load_config_from_file().unwrap_or_default())
});

/// 从默认位置加载配置，文件缺失或无法解析时返回 None
fn load_config_from_file() -> Option<AppConfig> {
    let path = get_config_path();
    if !path.exists() {
        return None;
    }
    match load_config_from(&path) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Ignoring config file {}: {}", path.display(), e);
            None
        }
    }
}

/// 从指定文件加载配置
pub fn load_config_from(path: &Path) -> Result<AppConfig, ClientError> {
    let content = fs::read_to_string(path)
        .map_err(|e| ClientError::Config(format!("读取配置文件失败: {}", e)))?;
    let config: AppConfig = serde_json::from_str(&content)
        .map_err(|e| ClientError::Config(format!("解析配置文件失败: {}", e)))?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// 获取当前配置（克隆）
pub fn get_config() -> AppConfig {
    CONFIG.read().clone()
}

/// 更新配置
///
/// 接收一个闭包来修改配置，仅作用于当前进程
pub fn update_config<F>(updater: F) -> AppConfig
where
    F: FnOnce(&mut AppConfig),
{
    let mut config = CONFIG.write();
    updater(&mut config);
    config.clone()
}

/// 替换整个配置
pub fn set_config(new_config: AppConfig) {
    *CONFIG.write() = new_config;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.connect_timeout_secs, 30);
        assert!(config.request_log_dir.is_none());
    }

    #[test]
    fn test_load_partial_config_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"api_base_url": "http://10.0.0.2:5000/api"}}"#).unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.2:5000/api");
        assert_eq!(config.connect_timeout_secs, 30);
    }

    #[test]
    fn test_load_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_update_config() {
        let updated = update_config(|config| config.connect_timeout_secs = 5);
        assert_eq!(updated.connect_timeout_secs, 5);
        assert_eq!(get_config().connect_timeout_secs, 5);
        set_config(AppConfig::default());
    }
}
