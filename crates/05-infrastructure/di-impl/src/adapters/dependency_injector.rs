//! 动态提供者容器适配器

use crate::engines::{DynamicContainer, ServiceProvider};
use crate::factory::EngineKind;
use di_abstractions::{BindingKey, ContainerAdapter, Instance, Registration};
use infrastructure_common::{DependencyError, Lifetime};
use std::sync::Arc;
use tracing::{debug, info};

/// `dependency_injector` 引擎适配器
#[derive(Debug, Default)]
pub struct DependencyInjectorAdapter {
    container: DynamicContainer,
}

impl DependencyInjectorAdapter {
    /// 创建新的适配器，内部持有独立的动态容器
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContainerAdapter for DependencyInjectorAdapter {
    fn engine_name(&self) -> &'static str {
        EngineKind::DependencyInjector.as_str()
    }

    fn register(&self, registration: Registration) {
        let Registration {
            key,
            provider,
            lifetime,
        } = registration;

        let service_provider = match lifetime {
            Lifetime::Singleton => ServiceProvider::singleton(provider),
            Lifetime::Transient => ServiceProvider::factory(provider),
        };

        info!(
            "[{}] 绑定 {} (生命周期: {})",
            self.engine_name(),
            key,
            lifetime
        );
        if self.container.set_provider(key.clone(), service_provider).is_some() {
            debug!("[{}] 替换已有提供者: {}", self.engine_name(), key);
        }
    }

    fn resolve_instance(&self, key: &BindingKey) -> Result<Instance, DependencyError> {
        let provider = self
            .container
            .provider(key)
            .ok_or_else(|| DependencyError::not_bound(key, self.engine_name()))?;
        provider.call()
    }

    fn is_bound(&self, key: &BindingKey) -> bool {
        self.container.contains(key)
    }

    fn registration(&self, key: &BindingKey) -> Option<Registration> {
        self.container.provider(key).map(|provider| {
            Registration::new(
                key.clone(),
                Arc::clone(provider.factory_fn()),
                Lifetime::from(provider.is_singleton()),
            )
        })
    }

    fn registered_keys(&self) -> Vec<BindingKey> {
        self.container.keys()
    }
}
