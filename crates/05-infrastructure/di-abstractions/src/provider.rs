//! 组件提供者
//!
//! 提供者是无参数的工厂，负责创建绑定类型的实例。容器内部只保存类型擦除后的
//! [`ErasedProvider`]，对外则通过泛型的 [`Provider<T>`] 保证类型安全。

use crate::key::BindingKey;
use infrastructure_common::DependencyError;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 类型擦除后的组件实例
///
/// 内部保存的是 `Arc<T>`，多次解析同一个实例时保持指针同一性。
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 类型擦除后的提供者函数
pub type ErasedProvider = Arc<dyn Fn() -> Result<Instance, DependencyError> + Send + Sync>;

type ProviderFn<T> = Arc<dyn Fn() -> Result<Arc<T>, DependencyError> + Send + Sync>;

/// 类型化的提供者
///
/// `T` 可以是具体类型，也可以是 `dyn Trait` 这样的抽象类型。
pub struct Provider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    factory: ProviderFn<T>,
}

impl<T> Provider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    /// 从工厂函数创建提供者
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(move || Ok(factory())),
        }
    }

    /// 从可能失败的工厂函数创建提供者
    pub fn try_new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<T>, DependencyError> + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
        }
    }

    /// 包装一个已经创建好的实例，每次都返回同一个实例
    pub fn constant(instance: Arc<T>) -> Self {
        Self::new(move || Arc::clone(&instance))
    }

    /// 创建实例
    pub fn provide(&self) -> Result<Arc<T>, DependencyError> {
        (self.factory)()
    }

    /// 转换为类型擦除的提供者
    pub fn into_erased(self) -> ErasedProvider {
        let factory = self.factory;
        Arc::new(move || factory().map(erase))
    }
}

impl<T> Provider<T>
where
    T: Default + Send + Sync + 'static,
{
    /// 使用具体类型自身作为提供者
    pub fn constructor() -> Self {
        Self::new(|| Arc::new(T::default()))
    }
}

impl<T> Clone for Provider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T> fmt::Debug for Provider<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("type", &std::any::type_name::<T>())
            .field("factory", &"<function>")
            .finish()
    }
}

/// 擦除实例类型
pub fn erase<T>(instance: Arc<T>) -> Instance
where
    T: ?Sized + Send + Sync + 'static,
{
    Arc::new(instance)
}

/// 还原实例类型
pub fn downcast<T>(instance: &Instance, key: &BindingKey) -> Result<Arc<T>, DependencyError>
where
    T: ?Sized + Send + Sync + 'static,
{
    instance
        .downcast_ref::<Arc<T>>()
        .cloned()
        .ok_or_else(|| DependencyError::TypeMismatch {
            key: key.to_string(),
            expected: std::any::type_name::<T>().to_string(),
        })
}
