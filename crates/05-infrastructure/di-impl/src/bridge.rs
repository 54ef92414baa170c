//! 互操作桥接
//!
//! 桥接持有一个主容器适配器、一个副容器适配器和一个共享注册表：
//!
//! - `bind` 在两个适配器中注册同一个提供者，单例会立即从主容器解析并写入注册表
//! - `get` 先查注册表，再查主容器，主容器未绑定时回退到副容器
//! - `connect` 把一侧的组件绑定到另一侧
//! - `integrate` 分别从两侧解析实例并各自写入注册表

use crate::factory::DiAdapterFactory;
use crate::registry::SharedRegistry;
use di_abstractions::{
    downcast, BindingKey, ContainerAdapter, ErasedProvider, Instance, Provider, Registration,
};
use infrastructure_common::{DependencyError, Lifetime};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// 桥接的一侧
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// 主容器
    Primary,
    /// 副容器
    Secondary,
}

impl Side {
    /// 另一侧
    pub fn opposite(self) -> Self {
        match self {
            Self::Primary => Self::Secondary,
            Self::Secondary => Self::Primary,
        }
    }
}

/// 互操作桥接
pub struct InteropBridge {
    primary: Arc<dyn ContainerAdapter>,
    secondary: Arc<dyn ContainerAdapter>,
    registry: SharedRegistry,
}

impl InteropBridge {
    /// 按引擎名称创建桥接
    pub fn new(primary_engine: &str, secondary_engine: &str) -> Result<Self, DependencyError> {
        let primary = DiAdapterFactory::create(primary_engine)?;
        let secondary = DiAdapterFactory::create(secondary_engine)?;
        Ok(Self::with_adapters(primary, secondary))
    }

    /// 使用现成的适配器创建桥接
    pub fn with_adapters<P, S>(primary: P, secondary: S) -> Self
    where
        P: ContainerAdapter + 'static,
        S: ContainerAdapter + 'static,
    {
        info!(
            "创建互操作桥接: 主容器 {}, 副容器 {}",
            primary.engine_name(),
            secondary.engine_name()
        );
        Self {
            primary: Arc::new(primary),
            secondary: Arc::new(secondary),
            registry: SharedRegistry::new(),
        }
    }

    /// 主容器适配器
    pub fn primary(&self) -> &dyn ContainerAdapter {
        self.primary.as_ref()
    }

    /// 副容器适配器
    pub fn secondary(&self) -> &dyn ContainerAdapter {
        self.secondary.as_ref()
    }

    /// 指定一侧的适配器
    pub fn adapter(&self, side: Side) -> &dyn ContainerAdapter {
        self.side(side).as_ref()
    }

    /// 共享注册表
    pub fn registry(&self) -> &SharedRegistry {
        &self.registry
    }

    fn side(&self, side: Side) -> &Arc<dyn ContainerAdapter> {
        match side {
            Side::Primary => &self.primary,
            Side::Secondary => &self.secondary,
        }
    }

    /// 在两个容器中绑定同一个提供者
    pub fn bind<T>(
        &self,
        provider: Provider<T>,
        lifetime: Lifetime,
        qualifier: Option<&str>,
    ) -> Result<(), DependencyError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.bind_registration(Registration::of(provider, lifetime, qualifier))
    }

    /// 在两个容器中绑定具体类型，类型自身作为提供者
    pub fn bind_type<T>(&self, lifetime: Lifetime, qualifier: Option<&str>) -> Result<(), DependencyError>
    where
        T: Default + Send + Sync + 'static,
    {
        self.bind(Provider::<T>::constructor(), lifetime, qualifier)
    }

    /// 在两个容器中注册同一条注册信息
    ///
    /// 单例会立即从主容器解析。解析失败时返回错误，但两个容器中的注册保留，
    /// 注册表不写入任何条目；之后的 `get` 会再次调用提供者。
    pub fn bind_registration(&self, registration: Registration) -> Result<(), DependencyError> {
        let key = registration.key.clone();
        let lifetime = registration.lifetime;

        self.primary.register(registration.clone());
        self.secondary.register(registration);

        if lifetime.is_singleton() {
            let instance = self.primary.resolve_instance(&key)?;
            self.registry
                .share(key, instance, self.primary.engine_name());
        }
        Ok(())
    }

    /// 解析组件
    pub fn get<T>(&self, qualifier: Option<&str>) -> Result<Arc<T>, DependencyError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = BindingKey::of::<T>(qualifier);
        let instance = self.get_instance(&key)?;
        downcast(&instance, &key)
    }

    /// 按绑定键解析类型擦除的实例
    pub fn get_instance(&self, key: &BindingKey) -> Result<Instance, DependencyError> {
        if let Some(instance) = self.registry.get(key) {
            debug!("注册表命中: {}", key);
            return Ok(instance);
        }

        match self.primary.resolve_instance(key) {
            Err(error) if error.is_not_bound() => {
                debug!(
                    "主容器 {} 未绑定 {}，回退到副容器 {}",
                    self.primary.engine_name(),
                    key,
                    self.secondary.engine_name()
                );
                self.secondary
                    .resolve_instance(key)
                    .map_err(|source| DependencyError::Unresolved {
                        key: key.to_string(),
                        consulted: format!(
                            "{}, {}",
                            self.primary.engine_name(),
                            self.secondary.engine_name()
                        ),
                        source: Box::new(source),
                    })
            }
            result => result,
        }
    }

    /// 注册表或任一容器是否能提供该组件
    pub fn is_bound<T>(&self, qualifier: Option<&str>) -> bool
    where
        T: ?Sized + 'static,
    {
        let key = BindingKey::of::<T>(qualifier);
        self.registry.contains(&key) || self.primary.is_bound(&key) || self.secondary.is_bound(&key)
    }

    /// 把一侧解析出的组件绑定到另一侧
    ///
    /// 单例：另一侧绑定的提供者始终返回这次解析出的实例，并写入注册表。
    /// 瞬时：另一侧绑定来源容器中注册的原始提供者，每次解析都调用它创建新实例，
    /// 不写入注册表。
    ///
    /// 返回这次从来源容器解析出的实例（单例时为注册表中的权威实例）。
    pub fn connect<T>(
        &self,
        from: Side,
        qualifier: Option<&str>,
        lifetime: Lifetime,
    ) -> Result<Arc<T>, DependencyError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = BindingKey::of::<T>(qualifier);
        let instance = self.connect_instance(&key, from, lifetime)?;
        downcast(&instance, &key)
    }

    fn connect_instance(
        &self,
        key: &BindingKey,
        from: Side,
        lifetime: Lifetime,
    ) -> Result<Instance, DependencyError> {
        let source = self.side(from);
        let target = self.side(from.opposite());
        let instance = source.resolve_instance(key)?;

        let (instance, provider): (Instance, ErasedProvider) = match lifetime {
            Lifetime::Singleton => {
                let shared = self
                    .registry
                    .share(key.clone(), instance, source.engine_name());
                let captured = Arc::clone(&shared);
                let provider: ErasedProvider = Arc::new(move || Ok(Arc::clone(&captured)));
                (shared, provider)
            }
            Lifetime::Transient => {
                let registration = source
                    .registration(key)
                    .ok_or_else(|| DependencyError::not_bound(key, source.engine_name()))?;
                (instance, registration.provider)
            }
        };

        target.register(Registration::new(key.clone(), provider, lifetime));
        info!(
            "连接 {}: {} -> {} (生命周期: {})",
            key,
            source.engine_name(),
            target.engine_name(),
            lifetime
        );
        Ok(instance)
    }

    /// 分别从主容器和副容器解析组件，并各自写入注册表
    ///
    /// 返回注册表中两个绑定键对应的实例。两个类型相同时两个绑定键重合，返回的两个
    /// 实例是同一个。
    pub fn integrate<P, S>(
        &self,
        qualifier: Option<&str>,
    ) -> Result<(Arc<P>, Arc<S>), DependencyError>
    where
        P: ?Sized + Send + Sync + 'static,
        S: ?Sized + Send + Sync + 'static,
    {
        let primary_key = BindingKey::of::<P>(qualifier);
        let secondary_key = BindingKey::of::<S>(qualifier);

        let primary_instance = self.primary.resolve_instance(&primary_key)?;
        let secondary_instance = self.secondary.resolve_instance(&secondary_key)?;

        let primary_instance = self.registry.share(
            primary_key.clone(),
            primary_instance,
            self.primary.engine_name(),
        );
        let secondary_instance = self.registry.share(
            secondary_key.clone(),
            secondary_instance,
            self.secondary.engine_name(),
        );
        info!("整合依赖: {} / {}", primary_key, secondary_key);

        Ok((
            downcast(&primary_instance, &primary_key)?,
            downcast(&secondary_instance, &secondary_key)?,
        ))
    }
}

impl fmt::Debug for InteropBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteropBridge")
            .field("primary", &self.primary.engine_name())
            .field("secondary", &self.secondary.engine_name())
            .field("registry_entries", &self.registry.len())
            .finish()
    }
}
