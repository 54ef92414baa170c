//! 模块式注入引擎适配器

use crate::engines::{Binder, Injector, Module, Scope};
use crate::factory::EngineKind;
use di_abstractions::{BindingKey, ContainerAdapter, Instance, Registration};
use infrastructure_common::{DependencyError, Lifetime};
use std::sync::Arc;
use tracing::info;

/// 把单条注册信息包装成模块
struct RegistrationModule<'a> {
    registration: &'a Registration,
}

impl Module for RegistrationModule<'_> {
    fn configure(&self, binder: &mut Binder) {
        let scope = match self.registration.lifetime {
            Lifetime::Singleton => Scope::Singleton,
            Lifetime::Transient => Scope::NoScope,
        };
        binder.bind(
            self.registration.key.clone(),
            Arc::clone(&self.registration.provider),
            scope,
        );
    }
}

/// `injector` 引擎适配器
#[derive(Default)]
pub struct InjectorAdapter {
    injector: Injector,
}

impl InjectorAdapter {
    /// 创建新的适配器，内部持有独立的注入器
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContainerAdapter for InjectorAdapter {
    fn engine_name(&self) -> &'static str {
        EngineKind::Injector.as_str()
    }

    fn register(&self, registration: Registration) {
        self.injector.install(&RegistrationModule {
            registration: &registration,
        });
        info!(
            "[{}] 绑定 {} (生命周期: {})",
            self.engine_name(),
            registration.key,
            registration.lifetime
        );
    }

    fn resolve_instance(&self, key: &BindingKey) -> Result<Instance, DependencyError> {
        self.injector
            .get(key)?
            .ok_or_else(|| DependencyError::not_bound(key, self.engine_name()))
    }

    fn is_bound(&self, key: &BindingKey) -> bool {
        self.injector.contains(key)
    }

    fn registration(&self, key: &BindingKey) -> Option<Registration> {
        self.injector.binding(key).map(|(provider, scope)| {
            let lifetime = match scope {
                Scope::Singleton => Lifetime::Singleton,
                Scope::NoScope => Lifetime::Transient,
            };
            Registration::new(key.clone(), provider, lifetime)
        })
    }

    fn registered_keys(&self) -> Vec<BindingKey> {
        self.injector.keys()
    }
}

impl std::fmt::Debug for InjectorAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InjectorAdapter")
            .field("bindings", &self.injector.keys().len())
            .finish()
    }
}
