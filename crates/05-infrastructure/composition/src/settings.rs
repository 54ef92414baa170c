//! 互操作配置
//!
//! 配置按以下顺序合并，后者覆盖前者：
//!
//! 1. 内置默认值（主容器 `injector`，副容器 `dependency_injector`）
//! 2. 配置文件（TOML 或 JSON，按扩展名识别）
//! 3. 前缀为 `DI_INTEROP` 的环境变量，嵌套键用 `__` 分隔，例如
//!    `DI_INTEROP_PRIMARY_ENGINE`、`DI_INTEROP_LOGGING__LEVEL`

use crate::builder::LoggingConfig;
use config::{Config, Environment, File};
use di_impl::EngineKind;
use infrastructure_common::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "DI_INTEROP";

/// 嵌套键分隔符
pub const ENV_SEPARATOR: &str = "__";

/// 互操作配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteropSettings {
    /// 主容器引擎名称
    pub primary_engine: String,
    /// 副容器引擎名称
    pub secondary_engine: String,
    /// 日志配置
    pub logging: LoggingSettings,
}

impl Default for InteropSettings {
    fn default() -> Self {
        Self {
            primary_engine: EngineKind::Injector.as_str().to_string(),
            secondary_engine: EngineKind::DependencyInjector.as_str().to_string(),
            logging: LoggingSettings::default(),
        }
    }
}

impl InteropSettings {
    /// 只使用默认值和环境变量加载配置
    pub fn load() -> ConfigResult<Self> {
        SettingsLoader::new().load()
    }

    /// 从配置文件和环境变量加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        SettingsLoader::new().with_file(path).load()
    }

    /// 校验配置
    pub fn validate(&self) -> ConfigResult<()> {
        let primary = parse_engine("primary_engine", &self.primary_engine)?;
        let secondary = parse_engine("secondary_engine", &self.secondary_engine)?;
        if primary == secondary {
            return Err(ConfigError::validation(format!(
                "主容器和副容器不能使用同一个引擎: {primary}"
            )));
        }
        self.logging.to_logging_config()?;
        Ok(())
    }

    /// 主容器引擎
    pub fn primary_kind(&self) -> ConfigResult<EngineKind> {
        parse_engine("primary_engine", &self.primary_engine)
    }

    /// 副容器引擎
    pub fn secondary_kind(&self) -> ConfigResult<EngineKind> {
        parse_engine("secondary_engine", &self.secondary_engine)
    }
}

fn parse_engine(field: &str, name: &str) -> ConfigResult<EngineKind> {
    name.parse::<EngineKind>()
        .map_err(|e| ConfigError::validation(format!("{field}: {e}")))
}

/// 日志配置项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// 日志级别（trace / debug / info / warn / error）
    pub level: String,
    /// 是否输出 JSON 格式
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingSettings {
    /// 转换为日志初始化配置
    pub fn to_logging_config(&self) -> ConfigResult<LoggingConfig> {
        let level = self.level.parse::<tracing::Level>().map_err(|_| {
            ConfigError::validation(format!("logging.level: 无效的日志级别 {}", self.level))
        })?;
        Ok(LoggingConfig {
            level,
            json_format: self.json,
            ..LoggingConfig::default()
        })
    }
}

/// 配置加载器
#[derive(Debug, Clone, Default)]
pub struct SettingsLoader {
    file: Option<PathBuf>,
    env_source: Option<HashMap<String, String>>,
}

impl SettingsLoader {
    /// 创建新的加载器
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加配置文件，文件必须存在
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// 使用给定的变量表代替进程环境变量
    pub fn with_env_source(mut self, vars: HashMap<String, String>) -> Self {
        self.env_source = Some(vars);
        self
    }

    /// 加载并校验配置
    pub fn load(self) -> ConfigResult<InteropSettings> {
        let mut builder = Config::builder();

        if let Some(path) = &self.file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            info!("加载互操作配置文件: {}", path.display());
            builder = builder.add_source(File::from(path.as_path()).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(self.env_source),
        );

        let settings = builder
            .build()
            .and_then(|config| config.try_deserialize::<InteropSettings>())
            .map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            })?;

        settings.validate()?;
        debug!(
            "互操作配置: 主容器 {}, 副容器 {}",
            settings.primary_engine, settings.secondary_engine
        );
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = InteropSettings::default();
        assert_eq!(settings.primary_engine, "injector");
        assert_eq!(settings.secondary_engine, "dependency_injector");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_same_engine_on_both_sides() {
        let settings = InteropSettings {
            secondary_engine: "injector".to_string(),
            ..InteropSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_rejects_unknown_engine() {
        let settings = InteropSettings {
            primary_engine: "pinject".to_string(),
            ..InteropSettings::default()
        };
        let error = settings.validate().unwrap_err();
        assert!(error.to_string().contains("pinject"));
    }

    #[test]
    fn test_logging_level_conversion() {
        let logging = LoggingSettings {
            level: "debug".to_string(),
            json: true,
        };
        let config = logging.to_logging_config().unwrap();
        assert_eq!(config.level, tracing::Level::DEBUG);
        assert!(config.json_format);

        let invalid = LoggingSettings {
            level: "loud".to_string(),
            json: false,
        };
        assert!(invalid.to_logging_config().is_err());
    }
}
