//! 互操作桥接构建器

use crate::settings::{InteropSettings, SettingsLoader};
use di_impl::{DiAdapterFactory, InteropBridge};
use infrastructure_common::{InfrastructureError, InfrastructureResult};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 互操作桥接构建器
///
/// 使用建造者模式从配置创建 [`InteropBridge`]
#[derive(Debug, Default)]
pub struct InteropBuilder {
    /// 显式给出的配置，优先于配置文件
    settings: Option<InteropSettings>,
    /// 配置文件路径
    config_file: Option<PathBuf>,
    /// 显式指定的主容器引擎
    primary_engine: Option<String>,
    /// 显式指定的副容器引擎
    secondary_engine: Option<String>,
    /// 日志配置，设置后才初始化日志
    logging_config: Option<LoggingConfig>,
}

impl InteropBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 使用已加载的配置
    pub fn with_settings(mut self, settings: InteropSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// 添加配置文件
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// 指定主容器和副容器引擎，覆盖配置中的值
    pub fn with_engines<P: Into<String>, S: Into<String>>(mut self, primary: P, secondary: S) -> Self {
        self.primary_engine = Some(primary.into());
        self.secondary_engine = Some(secondary.into());
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = Some(config);
        self
    }

    /// 解析最终生效的配置
    pub fn resolve_settings(&self) -> InfrastructureResult<InteropSettings> {
        let mut settings = match (&self.settings, &self.config_file) {
            (Some(settings), _) => settings.clone(),
            (None, Some(path)) => SettingsLoader::new().with_file(path).load()?,
            (None, None) => InteropSettings::default(),
        };

        if let Some(primary) = &self.primary_engine {
            settings.primary_engine = primary.clone();
        }
        if let Some(secondary) = &self.secondary_engine {
            settings.secondary_engine = secondary.clone();
        }

        settings.validate()?;
        Ok(settings)
    }

    /// 构建互操作桥接
    pub fn build(self) -> InfrastructureResult<InteropBridge> {
        let settings = self.resolve_settings()?;

        // 只有在明确配置了日志时才初始化日志
        if let Some(logging_config) = &self.logging_config {
            initialize_logging(logging_config)?;
        }

        info!("开始构建互操作桥接");
        let primary = DiAdapterFactory::create_kind(settings.primary_kind()?);
        let secondary = DiAdapterFactory::create_kind(settings.secondary_kind()?);
        debug!("容器适配器已创建: {} / {}", primary.kind(), secondary.kind());

        let bridge = InteropBridge::with_adapters(primary, secondary);
        info!("互操作桥接构建完成");
        Ok(bridge)
    }
}

/// 初始化日志系统
///
/// 进程内只能成功一次，重复初始化返回 [`InfrastructureError::BootstrapFailed`]。
pub fn initialize_logging(config: &LoggingConfig) -> InfrastructureResult<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(config.level)
        .with_target(config.show_target)
        .with_thread_ids(config.show_thread_ids)
        .with_file(config.show_file)
        .with_line_number(config.show_line_number);

    if config.json_format {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    }
    .map_err(|e| InfrastructureError::BootstrapFailed {
        message: format!("日志初始化失败: {}", e),
    })?;

    info!("日志系统初始化完成");
    Ok(())
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: tracing::Level,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: tracing::Level::DEBUG,
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: tracing::Level::INFO,
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }
}
