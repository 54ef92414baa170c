//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义跨引擎互操作所需的核心接口。
//!
//! ## 核心接口
//!
//! - [`BindingKey`] - 绑定键（抽象类型 + 可选限定名）
//! - [`Provider`] - 组件提供者
//! - [`Registration`] - 组件注册信息
//! - [`ContainerAdapter`] - 容器适配器接口

pub mod container;
pub mod key;
pub mod provider;
pub mod registry;

pub use container::*;
pub use key::*;
pub use provider::*;
pub use registry::*;
