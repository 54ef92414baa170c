//! 元数据定义
//!
//! 提供类型的元数据信息

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// 类型信息
///
/// 相等性和哈希只取决于 [`TypeId`]，名称仅用于日志和错误信息。
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    /// 类型ID
    pub id: TypeId,
    /// 完整类型路径
    pub type_name: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息，支持 `dyn Trait` 等非定长类型
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        // 去掉 `dyn Trait + Send + Sync` 中的附加约束
        let base = self.type_name.split(" + ").next().unwrap_or(self.type_name);
        if base.contains('<') {
            // 泛型类型保留完整名称，避免丢失类型参数
            return self.type_name;
        }
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
