//! 依赖注入容器适配器抽象接口
//!
//! 把统一的 `bind` / `resolve` 调用翻译成具体注入引擎的原生注册和查找调用。

use crate::key::BindingKey;
use crate::provider::{downcast, Instance, Provider};
use crate::registry::Registration;
use infrastructure_common::{DependencyError, Lifetime};
use std::sync::Arc;

/// 容器适配器 trait
///
/// 每个底层注入引擎对应一个实现。该 trait 保持对象安全，类型化的操作由
/// [`ContainerAdapterExt`] 提供。
///
/// 实现必须满足：
/// - 同一个绑定键最多只有一条有效注册，重复注册时后者覆盖前者
/// - 单例注册最多构造一次，之后每次解析返回同一个实例
/// - 瞬时注册每次解析都构造新实例
/// - 没有注册时返回 [`DependencyError::NotBound`]
pub trait ContainerAdapter: Send + Sync {
    /// 底层引擎名称
    fn engine_name(&self) -> &'static str;

    /// 注册组件
    fn register(&self, registration: Registration);

    /// 按绑定键解析类型擦除的实例
    fn resolve_instance(&self, key: &BindingKey) -> Result<Instance, DependencyError>;

    /// 检查绑定键是否已注册
    fn is_bound(&self, key: &BindingKey) -> bool;

    /// 获取绑定键当前有效的注册信息
    ///
    /// 返回的提供者是注册时传入的原始提供者，不包含引擎内部的单例缓存。
    fn registration(&self, key: &BindingKey) -> Option<Registration>;

    /// 获取所有已注册的绑定键
    fn registered_keys(&self) -> Vec<BindingKey>;
}

/// 容器适配器的类型化扩展
pub trait ContainerAdapterExt: ContainerAdapter {
    /// 绑定提供者
    fn bind<T>(&self, provider: Provider<T>, lifetime: Lifetime, qualifier: Option<&str>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.register(Registration::of(provider, lifetime, qualifier));
    }

    /// 绑定具体类型，类型自身作为提供者
    fn bind_type<T>(&self, lifetime: Lifetime, qualifier: Option<&str>)
    where
        T: Default + Send + Sync + 'static,
    {
        self.bind(Provider::<T>::constructor(), lifetime, qualifier);
    }

    /// 解析组件
    fn resolve<T>(&self, qualifier: Option<&str>) -> Result<Arc<T>, DependencyError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = BindingKey::of::<T>(qualifier);
        let instance = self.resolve_instance(&key)?;
        downcast(&instance, &key)
    }
}

impl<A: ContainerAdapter + ?Sized> ContainerAdapterExt for A {}
