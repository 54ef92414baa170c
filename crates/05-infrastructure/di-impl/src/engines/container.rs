//! 动态提供者容器引擎
//!
//! 容器按绑定键保存提供者对象。单例提供者在自身内部缓存实例，工厂提供者每次都
//! 调用工厂函数；替换提供者即丢弃旧提供者及其缓存。

use di_abstractions::{BindingKey, ErasedProvider, Instance};
use infrastructure_common::DependencyError;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// 提供者对象
pub enum ServiceProvider {
    /// 单例提供者，首次调用后缓存实例
    Singleton {
        factory: ErasedProvider,
        instance: OnceCell<Instance>,
    },
    /// 工厂提供者，每次调用都创建新实例
    Factory { factory: ErasedProvider },
}

impl ServiceProvider {
    /// 创建单例提供者
    pub fn singleton(factory: ErasedProvider) -> Self {
        Self::Singleton {
            factory,
            instance: OnceCell::new(),
        }
    }

    /// 创建工厂提供者
    pub fn factory(factory: ErasedProvider) -> Self {
        Self::Factory { factory }
    }

    /// 调用提供者
    pub fn call(&self) -> Result<Instance, DependencyError> {
        match self {
            Self::Singleton { factory, instance } => {
                instance.get_or_try_init(|| factory()).cloned()
            }
            Self::Factory { factory } => factory(),
        }
    }

    /// 提供者包装的原始工厂函数
    pub fn factory_fn(&self) -> &ErasedProvider {
        match self {
            Self::Singleton { factory, .. } | Self::Factory { factory } => factory,
        }
    }

    /// 是否为单例提供者
    pub fn is_singleton(&self) -> bool {
        matches!(self, Self::Singleton { .. })
    }
}

impl std::fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Singleton { instance, .. } => f
                .debug_struct("Singleton")
                .field("initialized", &instance.get().is_some())
                .finish(),
            Self::Factory { .. } => f.debug_struct("Factory").finish(),
        }
    }
}

/// 动态容器
#[derive(Debug, Default)]
pub struct DynamicContainer {
    providers: RwLock<HashMap<BindingKey, Arc<ServiceProvider>>>,
}

impl DynamicContainer {
    /// 创建空容器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置提供者，返回被替换的旧提供者
    pub fn set_provider(
        &self,
        key: BindingKey,
        provider: ServiceProvider,
    ) -> Option<Arc<ServiceProvider>> {
        self.providers.write().insert(key, Arc::new(provider))
    }

    /// 获取提供者
    pub fn provider(&self, key: &BindingKey) -> Option<Arc<ServiceProvider>> {
        self.providers.read().get(key).cloned()
    }

    /// 检查提供者是否存在
    pub fn contains(&self, key: &BindingKey) -> bool {
        self.providers.read().contains_key(key)
    }

    /// 所有绑定键
    pub fn keys(&self) -> Vec<BindingKey> {
        self.providers.read().keys().cloned().collect()
    }

    /// 提供者数量
    pub fn len(&self) -> usize {
        self.providers.read().len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.providers.read().is_empty()
    }
}
