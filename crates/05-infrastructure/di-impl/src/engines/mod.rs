//! 底层注入引擎
//!
//! 两个引擎互相独立，各自维护绑定表和实例缓存，只通过适配器与互操作层交互。

pub mod container;
pub mod injector;

pub use container::{DynamicContainer, ServiceProvider};
pub use injector::{Binder, Injector, Module, Scope};
