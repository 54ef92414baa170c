//! # Infrastructure Common
//!
//! 这个 crate 提供了依赖注入互操作层共用的基础类型。
//!
//! ## 核心内容
//!
//! - [`Lifetime`] - 组件生命周期（单例 / 瞬时）
//! - [`TypeInfo`] - 基于 `TypeId` 的类型信息
//! - [`DependencyError`] / [`ConfigError`] / [`InfrastructureError`] - 错误类型
//!
//! ## 设计原则
//!
//! - 基于 Rust 类型系统的编译时安全
//! - 不持有任何进程级全局状态

pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
