//! 适配器工厂
//!
//! 根据引擎名称创建容器适配器。可识别的引擎是一个封闭集合，新增引擎时在
//! [`EngineKind`] 和 [`EngineAdapter`] 中各加一个变体。

use crate::adapters::{DependencyInjectorAdapter, InjectorAdapter};
use di_abstractions::{BindingKey, ContainerAdapter, Instance, Registration};
use infrastructure_common::DependencyError;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// 支持的注入引擎
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    /// 模块式注入引擎
    Injector,
    /// 动态提供者容器引擎
    DependencyInjector,
}

impl EngineKind {
    /// 所有支持的引擎
    pub const ALL: [EngineKind; 2] = [EngineKind::Injector, EngineKind::DependencyInjector];

    /// 引擎名称
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Injector => "injector",
            Self::DependencyInjector => "dependency_injector",
        }
    }

    /// 所有支持的引擎名称，逗号分隔
    pub fn supported_names() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = DependencyError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| DependencyError::UnsupportedEngine {
                name: name.to_string(),
                supported: Self::supported_names(),
            })
    }
}

/// 工厂创建的适配器
#[derive(Debug)]
pub enum EngineAdapter {
    /// 模块式注入引擎适配器
    Injector(InjectorAdapter),
    /// 动态提供者容器引擎适配器
    DependencyInjector(DependencyInjectorAdapter),
}

impl EngineAdapter {
    /// 适配器对应的引擎
    pub fn kind(&self) -> EngineKind {
        match self {
            Self::Injector(_) => EngineKind::Injector,
            Self::DependencyInjector(_) => EngineKind::DependencyInjector,
        }
    }

    fn inner(&self) -> &dyn ContainerAdapter {
        match self {
            Self::Injector(adapter) => adapter,
            Self::DependencyInjector(adapter) => adapter,
        }
    }
}

impl ContainerAdapter for EngineAdapter {
    fn engine_name(&self) -> &'static str {
        self.kind().as_str()
    }

    fn register(&self, registration: Registration) {
        self.inner().register(registration);
    }

    fn resolve_instance(&self, key: &BindingKey) -> Result<Instance, DependencyError> {
        self.inner().resolve_instance(key)
    }

    fn is_bound(&self, key: &BindingKey) -> bool {
        self.inner().is_bound(key)
    }

    fn registration(&self, key: &BindingKey) -> Option<Registration> {
        self.inner().registration(key)
    }

    fn registered_keys(&self) -> Vec<BindingKey> {
        self.inner().registered_keys()
    }
}

/// 适配器工厂
///
/// 无状态，每次调用都返回全新的适配器。
#[derive(Debug, Default, Clone, Copy)]
pub struct DiAdapterFactory;

impl DiAdapterFactory {
    /// 按引擎名称创建适配器
    pub fn create(engine_name: &str) -> Result<EngineAdapter, DependencyError> {
        let kind = engine_name.parse::<EngineKind>()?;
        Ok(Self::create_kind(kind))
    }

    /// 按引擎类型创建适配器
    pub fn create_kind(kind: EngineKind) -> EngineAdapter {
        debug!("创建容器适配器: {}", kind);
        match kind {
            EngineKind::Injector => EngineAdapter::Injector(InjectorAdapter::new()),
            EngineKind::DependencyInjector => {
                EngineAdapter::DependencyInjector(DependencyInjectorAdapter::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use di_abstractions::{ContainerAdapterExt, Provider};
    use infrastructure_common::Lifetime;
    use std::sync::Arc;

    #[test]
    fn test_create_known_engines() {
        for kind in EngineKind::ALL {
            let adapter = DiAdapterFactory::create(kind.as_str()).unwrap();
            assert_eq!(adapter.kind(), kind);
            assert_eq!(adapter.engine_name(), kind.as_str());
        }
    }

    #[test]
    fn test_unsupported_engine() {
        let error = DiAdapterFactory::create("pinject").unwrap_err();
        match error {
            DependencyError::UnsupportedEngine { name, supported } => {
                assert_eq!(name, "pinject");
                assert_eq!(supported, "injector, dependency_injector");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_each_call_yields_fresh_adapter() {
        let first = DiAdapterFactory::create("injector").unwrap();
        let second = DiAdapterFactory::create("injector").unwrap();

        first.bind(Provider::constant(Arc::new(7u32)), Lifetime::Singleton, None);
        assert!(first.resolve::<u32>(None).is_ok());
        assert!(second.resolve::<u32>(None).unwrap_err().is_not_bound());
    }
}
