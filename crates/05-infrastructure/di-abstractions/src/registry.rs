//! 组件注册信息

use crate::key::BindingKey;
use crate::provider::{ErasedProvider, Provider};
use infrastructure_common::Lifetime;

/// 组件注册信息
///
/// 由绑定键、提供者和生命周期组成，归属于注册它的容器适配器。
#[derive(Clone)]
pub struct Registration {
    /// 绑定键
    pub key: BindingKey,
    /// 类型擦除后的提供者
    pub provider: ErasedProvider,
    /// 生命周期
    pub lifetime: Lifetime,
}

impl Registration {
    /// 创建新的注册信息
    pub fn new(key: BindingKey, provider: ErasedProvider, lifetime: Lifetime) -> Self {
        Self {
            key,
            provider,
            lifetime,
        }
    }

    /// 从类型化提供者创建注册信息
    pub fn of<T>(provider: Provider<T>, lifetime: Lifetime, qualifier: Option<&str>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        Self::new(BindingKey::of::<T>(qualifier), provider.into_erased(), lifetime)
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("key", &self.key)
            .field("lifetime", &self.lifetime)
            .field("provider", &"<function>")
            .finish()
    }
}
