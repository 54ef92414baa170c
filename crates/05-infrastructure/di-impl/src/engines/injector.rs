//! 模块式注入引擎
//!
//! 绑定通过 [`Module`] 安装到 [`Injector`]：模块在 [`Binder`] 上声明绑定，注入器
//! 根据绑定的 [`Scope`] 决定实例是否复用。单例作用域的缓存由注入器持有，每个绑定键
//! 对应一个 `OnceCell`，重新安装同一个绑定键时缓存随之重置。

use di_abstractions::{BindingKey, ErasedProvider, Instance};
use infrastructure_common::DependencyError;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// 绑定作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// 注入器内唯一
    Singleton,
    /// 不缓存，每次都调用提供者
    NoScope,
}

/// 注入器中的一条绑定
#[derive(Clone)]
struct Binding {
    provider: ErasedProvider,
    scope: Scope,
}

/// 绑定声明器
///
/// 只收集绑定，真正生效发生在 [`Injector::install`] 时。
#[derive(Default)]
pub struct Binder {
    bindings: Vec<(BindingKey, Binding)>,
}

impl Binder {
    /// 声明绑定
    pub fn bind(&mut self, key: BindingKey, provider: ErasedProvider, scope: Scope) -> &mut Self {
        self.bindings.push((key, Binding { provider, scope }));
        self
    }

    /// 已声明的绑定数量
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// 是否没有声明任何绑定
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// 绑定模块
pub trait Module {
    /// 在绑定声明器上声明绑定
    fn configure(&self, binder: &mut Binder);
}

impl<F> Module for F
where
    F: Fn(&mut Binder),
{
    fn configure(&self, binder: &mut Binder) {
        self(binder);
    }
}

/// 模块式注入器
#[derive(Default)]
pub struct Injector {
    bindings: RwLock<HashMap<BindingKey, Binding>>,
    singleton_scope: RwLock<HashMap<BindingKey, Arc<OnceCell<Instance>>>>,
}

impl Injector {
    /// 创建空的注入器
    pub fn new() -> Self {
        Self::default()
    }

    /// 安装模块，返回本次安装的绑定数量
    pub fn install<M>(&self, module: &M) -> usize
    where
        M: Module + ?Sized,
    {
        let mut binder = Binder::default();
        module.configure(&mut binder);
        let installed = binder.len();

        let mut bindings = self.bindings.write();
        let mut singleton_scope = self.singleton_scope.write();
        for (key, binding) in binder.bindings {
            match binding.scope {
                Scope::Singleton => {
                    singleton_scope.insert(key.clone(), Arc::new(OnceCell::new()));
                }
                Scope::NoScope => {
                    singleton_scope.remove(&key);
                }
            }
            if bindings.insert(key.clone(), binding).is_some() {
                debug!("覆盖已有绑定: {}", key);
            }
        }

        installed
    }

    /// 获取实例，未绑定时返回 `Ok(None)`
    pub fn get(&self, key: &BindingKey) -> Result<Option<Instance>, DependencyError> {
        let (binding, cell) = {
            let bindings = self.bindings.read();
            let singleton_scope = self.singleton_scope.read();
            match bindings.get(key) {
                Some(binding) => (binding.clone(), singleton_scope.get(key).cloned()),
                None => return Ok(None),
            }
        };

        match (binding.scope, cell) {
            (Scope::Singleton, Some(cell)) => cell
                .get_or_try_init(|| {
                    debug!("创建单例实例: {}", key);
                    (binding.provider)()
                })
                .cloned()
                .map(Some),
            _ => (binding.provider)().map(Some),
        }
    }

    /// 获取绑定的提供者和作用域
    pub fn binding(&self, key: &BindingKey) -> Option<(ErasedProvider, Scope)> {
        self.bindings
            .read()
            .get(key)
            .map(|binding| (Arc::clone(&binding.provider), binding.scope))
    }

    /// 检查绑定是否存在
    pub fn contains(&self, key: &BindingKey) -> bool {
        self.bindings.read().contains_key(key)
    }

    /// 所有绑定键
    pub fn keys(&self) -> Vec<BindingKey> {
        self.bindings.read().keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counter;

    fn counting_provider(calls: Arc<AtomicUsize>) -> ErasedProvider {
        Arc::new(move || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(n) as Instance)
        })
    }

    #[test]
    fn test_singleton_scope_constructs_once() {
        let injector = Injector::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = BindingKey::of::<Counter>(None);
        let provider = counting_provider(Arc::clone(&calls));

        let installed = injector.install(&|binder: &mut Binder| {
            binder.bind(key.clone(), Arc::clone(&provider), Scope::Singleton);
        });
        assert_eq!(installed, 1);

        let first = injector.get(&key).unwrap().unwrap();
        let second = injector.get(&key).unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_no_scope_calls_provider_every_time() {
        let injector = Injector::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = BindingKey::of::<Counter>(None);
        let provider = counting_provider(Arc::clone(&calls));

        injector.install(&|binder: &mut Binder| {
            binder.bind(key.clone(), Arc::clone(&provider), Scope::NoScope);
        });

        injector.get(&key).unwrap();
        injector.get(&key).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_reinstall_resets_singleton() {
        let injector = Injector::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let key = BindingKey::of::<Counter>(None);
        let provider = counting_provider(Arc::clone(&calls));
        let module = |binder: &mut Binder| {
            binder.bind(key.clone(), Arc::clone(&provider), Scope::Singleton);
        };

        injector.install(&module);
        let first = injector.get(&key).unwrap().unwrap();
        injector.install(&module);
        let second = injector.get(&key).unwrap().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(injector.keys().len(), 1);

        let (bound, scope) = injector.binding(&key).unwrap();
        assert!(Arc::ptr_eq(&bound, &provider));
        assert_eq!(scope, Scope::Singleton);
    }

    #[test]
    fn test_missing_binding() {
        let injector = Injector::new();
        let key = BindingKey::of::<Counter>(Some("absent"));
        assert!(injector.get(&key).unwrap().is_none());
        assert!(!injector.contains(&key));
    }
}
