//! # 依赖注入具体实现
//!
//! 提供两个底层注入引擎、对应的容器适配器、适配器工厂，以及把两个容器连接起来的
//! 互操作桥接。
//!
//! ## 基本使用
//!
//! ```rust
//! use di_abstractions::Provider;
//! use di_impl::InteropBridge;
//! use infrastructure_common::Lifetime;
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct English;
//!
//! impl Greeter for English {
//!     fn greet(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! let bridge = InteropBridge::new("injector", "dependency_injector")?;
//! bridge.bind(Provider::<dyn Greeter>::new(|| Arc::new(English)), Lifetime::Singleton, None)?;
//!
//! let greeter = bridge.get::<dyn Greeter>(None)?;
//! assert_eq!(greeter.greet(), "hello");
//! # Ok::<(), infrastructure_common::DependencyError>(())
//! ```

pub mod adapters;
pub mod bridge;
pub mod engines;
pub mod factory;
pub mod registry;

pub use adapters::{DependencyInjectorAdapter, InjectorAdapter};
pub use bridge::{InteropBridge, Side};
pub use factory::{DiAdapterFactory, EngineAdapter, EngineKind};
pub use registry::{RegistryEntry, SharedRegistry};
