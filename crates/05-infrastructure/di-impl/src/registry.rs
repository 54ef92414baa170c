//! 共享实例注册表
//!
//! 互操作桥接持有的权威实例缓存。条目只增不减，某个绑定键一旦写入，之后的写入
//! 都不会替换它。

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use di_abstractions::{BindingKey, Instance};
use std::sync::Arc;
use tracing::{debug, warn};

/// 注册表条目
#[derive(Clone)]
pub struct RegistryEntry {
    /// 共享实例
    pub instance: Instance,
    /// 实例来源的引擎名称
    pub origin: &'static str,
    /// 写入时间
    pub registered_at: DateTime<Utc>,
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("origin", &self.origin)
            .field("registered_at", &self.registered_at)
            .finish()
    }
}

/// 共享实例注册表
#[derive(Debug, Default)]
pub struct SharedRegistry {
    entries: DashMap<BindingKey, RegistryEntry>,
}

impl SharedRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 获取共享实例
    pub fn get(&self, key: &BindingKey) -> Option<Instance> {
        self.entries
            .get(key)
            .map(|entry| Arc::clone(&entry.instance))
    }

    /// 获取条目详情
    pub fn entry(&self, key: &BindingKey) -> Option<RegistryEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// 共享实例，返回该绑定键当前的权威实例
    ///
    /// 绑定键已有条目时保留原条目。
    pub fn share(&self, key: BindingKey, instance: Instance, origin: &'static str) -> Instance {
        match self.entries.entry(key) {
            Entry::Occupied(occupied) => {
                let existing = Arc::clone(&occupied.get().instance);
                if !Arc::ptr_eq(&existing, &instance) {
                    warn!(
                        "注册表已存在 {} (来源: {})，忽略来自 {} 的实例",
                        occupied.key(),
                        occupied.get().origin,
                        origin
                    );
                }
                existing
            }
            Entry::Vacant(vacant) => {
                debug!("注册共享实例: {} (来源: {})", vacant.key(), origin);
                vacant.insert(RegistryEntry {
                    instance: Arc::clone(&instance),
                    origin,
                    registered_at: Utc::now(),
                });
                instance
            }
        }
    }

    /// 检查绑定键是否存在
    pub fn contains(&self, key: &BindingKey) -> bool {
        self.entries.contains_key(key)
    }

    /// 所有绑定键
    pub fn keys(&self) -> Vec<BindingKey> {
        self.entries.iter().map(|entry| entry.key().clone()).collect()
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
