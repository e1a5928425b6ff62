//! # Config 模块
//!
//! 运行时配置管理，集中管理所有配置项。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use std::fs;
use std::path::Path;

use propanim_runtime::Argb;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// 应用配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 星星配置
    #[serde(default)]
    pub star: StarConfig,

    /// 流星雨配置
    #[serde(default)]
    pub shower: ShowerConfig,

    /// 调试配置
    #[serde(default)]
    pub debug: DebugConfig,
}

/// 窗口配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 窗口宽度
    #[serde(default = "default_window_width")]
    pub width: u32,

    /// 窗口高度
    #[serde(default = "default_window_height")]
    pub height: u32,

    /// 窗口标题
    #[serde(default = "default_window_title")]
    pub title: String,
}

/// 星星配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarConfig {
    /// 星星边长（逻辑像素）
    #[serde(default = "default_star_size")]
    pub size: f32,

    /// 星星颜色（ARGB 整数，如 `4294951175` 即 `0xFFFFC107`）
    #[serde(default = "default_star_color")]
    pub color: Argb,
}

/// 流星雨配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ShowerConfig {
    /// 随机种子；不设置时每次启动都不同
    #[serde(default)]
    pub seed: Option<u64>,
}

/// 调试配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugConfig {
    /// 是否在画面左上角显示动画数量等信息
    ///
    /// debug build 默认开启，release build 默认关闭
    #[serde(default = "default_overlay")]
    pub overlay: bool,
}

// 默认值函数
fn default_window_width() -> u32 {
    480
}

fn default_window_height() -> u32 {
    800
}

fn default_window_title() -> String {
    "Property Animation".to_string()
}

fn default_star_size() -> f32 {
    96.0
}

fn default_star_color() -> Argb {
    Argb(0xFFFF_C107)
}

fn default_overlay() -> bool {
    cfg!(debug_assertions)
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            title: default_window_title(),
        }
    }
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            size: default_star_size(),
            color: default_star_color(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            overlay: default_overlay(),
        }
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并打印警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match Self::try_load(path) {
            Ok(config) => {
                info!(path = %path.display(), "配置文件加载成功");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "配置文件无效，使用默认配置");
                Self::default()
            }
        }
    }

    /// 加载并校验配置文件
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::ValidationFailed(
                "窗口宽高必须大于 0".to_string(),
            ));
        }

        if !self.star.size.is_finite() || self.star.size <= 0.0 {
            return Err(ConfigError::ValidationFailed(format!(
                "星星尺寸无效: {}",
                self.star.size
            )));
        }

        Ok(())
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(#[from] serde_json::Error),
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(#[from] std::io::Error),
    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 480);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.star.color, Argb(0xFFFF_C107));
        assert_eq!(config.shower.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let json = r#"{ "window": { "width": 640 }, "shower": { "seed": 9 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.window.width, 640);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.star.size, 96.0);
        assert_eq!(config.shower.seed, Some(9));
    }

    #[test]
    fn test_config_serialization() {
        let mut config = AppConfig::default();
        config.star.color = Argb::RED;

        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("4294901760"));

        let loaded: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.window.width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationFailed(_))));

        config.window.width = 480;
        config.star.size = -1.0;
        assert!(config.validate().is_err());

        config.star.size = f32::NAN;
        assert!(config.validate().is_err());
    }
}
