//! 组件生命周期定义

use std::fmt;

/// 组件生命周期类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifetime {
    /// 单例模式 - 每个绑定键只创建一个实例，之后的解析都复用该实例
    #[default]
    Singleton,
    /// 瞬时模式 - 每次解析都创建新实例
    Transient,
}

impl Lifetime {
    /// 是否为单例
    pub fn is_singleton(self) -> bool {
        matches!(self, Self::Singleton)
    }
}

impl From<bool> for Lifetime {
    fn from(is_singleton: bool) -> Self {
        if is_singleton {
            Self::Singleton
        } else {
            Self::Transient
        }
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singleton => write!(f, "singleton"),
            Self::Transient => write!(f, "transient"),
        }
    }
}
