//! # 基础设施组合层
//!
//! 负责从配置组装互操作桥接，并在需要时初始化日志系统。
//!
//! ## 主要功能
//!
//! - **互操作配置**: 默认值、配置文件和环境变量分层合并
//! - **桥接构建器**: 使用构建者模式按配置创建 [`InteropBridge`]
//! - **日志初始化**: 开发环境和生产环境两套预设
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use infrastructure_composition::{InteropBuilder, LoggingConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bridge = InteropBuilder::new()
//!         .with_config_file("interop.toml")
//!         .with_logging(LoggingConfig::development())
//!         .build()?;
//!
//!     println!("{:?}", bridge);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod settings;

#[cfg(test)]
mod tests;

pub use builder::{initialize_logging, InteropBuilder, LoggingConfig};
pub use settings::{InteropSettings, LoggingSettings, SettingsLoader};

// 重新导出常用类型
pub use di_impl::{InteropBridge, Side};
pub use infrastructure_common::InfrastructureError;
