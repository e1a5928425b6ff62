//! # PropAnim Runtime
//!
//! 属性动画展示的核心库。
//!
//! ## 架构概述
//!
//! `propanim-runtime` 是纯逻辑核心，不依赖任何窗口、GPU 或 IO。
//! 宿主层（Host）只需要做三件事：
//!
//! ```text
//! Host                            Runtime
//!   │                                │
//!   │──── tap(ButtonId) ───────────►│ 构造动画描述并启动
//!   │──── update(dt) ──────────────►│ 推进动画、执行结束回调
//!   │◄─── 视图快照（星星/容器/粒子）──│
//!   │                                │
//! ```
//!
//! ## 模块结构
//!
//! - [`animation`]：动画驱动器（时间轴、缓动、插值、事件）
//! - [`view`]：视图模型（星星、容器、按钮）
//! - [`random`]：随机数来源
//! - [`showcase`]：展示界面控制器
//! - [`error`]：错误类型定义

pub mod animation;
pub mod error;
pub mod random;
pub mod showcase;
pub mod view;

// 重导出核心类型
pub use animation::{
    AnimValue, Animatable, AnimationDescriptor, AnimationEvent, AnimationId, AnimationSystem,
    Argb, EasingFunction, ObjectId, PropertyValues, RepeatMode,
};
pub use error::{AnimResult, AnimationError, UnknownButton};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use showcase::{ShowerPlan, Showcase};
pub use view::{ButtonId, ButtonStates, ContainerView, StarView, ViewData};
