//! 绑定键

use infrastructure_common::TypeInfo;
use std::fmt;

/// 绑定键
///
/// 由抽象类型标识和可选的限定名组成，两部分都相同时才视为同一个注册位置。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingKey {
    type_info: TypeInfo,
    qualifier: Option<String>,
}

impl BindingKey {
    /// 创建新的绑定键
    pub fn new(type_info: TypeInfo, qualifier: Option<String>) -> Self {
        Self {
            type_info,
            qualifier,
        }
    }

    /// 从类型创建绑定键
    pub fn of<T: ?Sized + 'static>(qualifier: Option<&str>) -> Self {
        Self::new(TypeInfo::of::<T>(), qualifier.map(str::to_owned))
    }

    /// 类型信息
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    /// 限定名
    pub fn qualifier(&self) -> Option<&str> {
        self.qualifier.as_deref()
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.qualifier {
            Some(qualifier) => write!(f, "{}[{}]", self.type_info, qualifier),
            None => write!(f, "{}", self.type_info),
        }
    }
}
