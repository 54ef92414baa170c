//! 容器适配器实现

pub mod dependency_injector;
pub mod injector;

pub use dependency_injector::DependencyInjectorAdapter;
pub use injector::InjectorAdapter;
