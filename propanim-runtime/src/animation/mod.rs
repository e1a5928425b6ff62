//! # Animation 模块
//!
//! 属性动画驱动器。
//!
//! ## 核心设计理念
//!
//! 动画系统只负责 **时间轴管理**：
//! - 知道某个属性从 A 到 B 需要在 duration 内变化（可重复、可倒放）
//! - 每帧把插值结果写回对象
//! - **不假设对象类型**，对象通过 `Animatable` 暴露属性
//!
//! ## 核心概念
//!
//! - `AnimationDescriptor`: 一次动画的全部参数（目标、起止值、时长、重复、缓动）
//! - `Animation`: 单个动画的时间轴
//! - `AnimationSystem`: 驱动器，负责启动、更新、取消与事件
//! - `EasingFunction`: 缓动函数
//! - `AnimValue`: 浮点或颜色属性值
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! let mut system = AnimationSystem::new();
//! let star = system.register(Rc::new(StarView::new(48.0, 48.0)));
//!
//! system.start(
//!     AnimationDescriptor::of_float(star, "rotation", -360.0, 0.0)
//!         .with_duration(Duration::from_millis(1000)),
//! )?;
//!
//! for event in system.update(dt) {
//!     // Started / Completed / Cancelled
//! }
//! ```

mod animation;
mod easing;
mod system;
mod traits;
mod value;

pub use animation::{
    Animation, AnimationDescriptor, AnimationId, AnimationState, DEFAULT_DURATION,
    PropertyValues, RepeatMode,
};
pub use easing::EasingFunction;
pub use system::AnimationSystem;
pub use traits::{AnimPropertyKey, Animatable, ObjectId};
pub use value::{AnimValue, Argb, ValueKind};

/// 动画事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    /// 动画开始
    Started(AnimationId),
    /// 动画自然结束
    Completed(AnimationId),
    /// 动画被取消
    Cancelled(AnimationId),
}

impl AnimationEvent {
    /// 事件所属的动画
    pub fn id(&self) -> AnimationId {
        match self {
            AnimationEvent::Started(id)
            | AnimationEvent::Completed(id)
            | AnimationEvent::Cancelled(id) => *id,
        }
    }
}
