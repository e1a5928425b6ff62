//! # Traits 模块
//!
//! 动画系统与视图之间的接口定义。
//!
//! ## 核心概念
//!
//! - `ObjectId`: 由 AnimationSystem 分配的唯一对象标识符
//! - `AnimPropertyKey`: 对象 + 属性名组成的键
//! - `Animatable`: 可动画对象接口

use super::AnimValue;

/// 对象唯一标识符
///
/// 由 `AnimationSystem` 在对象注册时分配，保证全局唯一。
/// 使用内部计数器生成，不会重复（注销后也不会复用）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) u64);

impl ObjectId {
    /// 创建新的对象 ID（仅供 AnimationSystem 内部使用）
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }

    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

/// 属性键
///
/// `ObjectId + property_id` 唯一标识一个正在被动画的属性。
/// 同一属性同一时刻只允许一个动画写入。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimPropertyKey {
    /// 对象实例 ID
    pub object_id: ObjectId,
    /// 属性名称
    pub property_id: &'static str,
}

impl AnimPropertyKey {
    /// 创建属性键
    pub fn new(object_id: ObjectId, property_id: &'static str) -> Self {
        Self {
            object_id,
            property_id,
        }
    }
}

impl std::fmt::Display for AnimPropertyKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.object_id, self.property_id)
    }
}

/// 可动画对象接口
///
/// 对象通过实现此 trait 声明自己有哪些属性可以被动画。
/// 由 `AnimationSystem` 统一分配唯一标识符，对象无需管理。
///
/// 实现方通常用 `Rc<RefCell<T>>` 持有数据，因此 setter 只需要 `&self`，
/// 多个属性可以被同时写入而不冲突。
pub trait Animatable: 'static {
    /// 获取属性的当前值
    ///
    /// # 返回
    /// - `Some(value)`: 属性存在
    /// - `None`: 属性不存在
    fn get_property(&self, property_id: &str) -> Option<AnimValue>;

    /// 设置属性的新值
    ///
    /// # 返回
    /// - `true`: 设置成功
    /// - `false`: 属性不存在或值类型不匹配
    fn set_property(&self, property_id: &str, value: AnimValue) -> bool;

    /// 获取所有可动画属性的列表
    fn property_list(&self) -> &'static [&'static str];
}
