//! 错误类型定义

use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

impl ConfigError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }
}

/// 依赖注入错误类型
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("组件未绑定: {key} (容器: {engine})")]
    NotBound { key: String, engine: String },

    #[error("组件无法解析: {key}, 已查询容器: {consulted}, 原因: {source}")]
    Unresolved {
        key: String,
        consulted: String,
        source: Box<DependencyError>,
    },

    #[error("不支持的依赖注入引擎: {name} (支持的引擎: {supported})")]
    UnsupportedEngine { name: String, supported: String },

    #[error("类型不匹配: {key}, 期望类型 {expected}")]
    TypeMismatch { key: String, expected: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("容器不可用: {engine}")]
    AdapterUnavailable { engine: String },
}

impl DependencyError {
    /// 创建未绑定错误
    pub fn not_bound(key: impl ToString, engine: impl Into<String>) -> Self {
        Self::NotBound {
            key: key.to_string(),
            engine: engine.into(),
        }
    }

    /// 创建组件创建失败错误
    pub fn creation_failed(
        type_name: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ComponentCreationFailed {
            type_name: type_name.into(),
            source: source.into(),
        }
    }

    /// 是否为未绑定错误（包括所有容器均未绑定的情况）
    pub fn is_not_bound(&self) -> bool {
        match self {
            Self::NotBound { .. } => true,
            Self::Unresolved { source, .. } => source.is_not_bound(),
            _ => false,
        }
    }
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
