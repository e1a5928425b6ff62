//! # Animation 模块
//!
//! 动画描述（descriptor）与单个动画实例的时间轴。
//!
//! 时间轴只计算"当前进度"，不关心进度被写到哪个对象上；
//! 写入由 `AnimationSystem` 负责。

use std::time::Duration;

use super::{AnimValue, EasingFunction, ObjectId};

/// 未指定时长时使用的默认值
pub const DEFAULT_DURATION: Duration = Duration::from_millis(300);

/// 完成判定的容差（秒），吸收逐帧累加 `dt` 的舍入误差
const COMPLETION_EPSILON: f64 = 1e-6;

/// 动画 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

impl AnimationId {
    /// 创建新的动画 ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for AnimationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 重复模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    /// 每次重复都从头播放
    #[default]
    Restart,
    /// 奇数次重复倒放
    Reverse,
}

/// 动画状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// 正在播放
    #[default]
    Running,
    /// 自然结束
    Completed,
    /// 被取消（被同属性的新动画顶替、对象被注销或显式取消）
    Cancelled,
}

impl AnimationState {
    /// 是否为活跃状态（需要更新）
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// 单个属性的起止值
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyValues {
    /// 属性名称
    pub property: &'static str,
    /// 起始值
    pub from: AnimValue,
    /// 目标值
    pub to: AnimValue,
}

impl PropertyValues {
    pub fn new(property: &'static str, from: impl Into<AnimValue>, to: impl Into<AnimValue>) -> Self {
        Self {
            property,
            from: from.into(),
            to: to.into(),
        }
    }

    /// 按进度计算当前值
    pub fn value_at(&self, fraction: f32) -> Option<AnimValue> {
        self.from.lerp(self.to, fraction)
    }
}

/// 动画描述
///
/// 一次点击构造一个描述，交给 `AnimationSystem::start` 执行。
/// 一个描述可以同时驱动同一对象的多个属性（例如同时缩放 X 与 Y）。
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDescriptor {
    /// 目标对象
    pub target: ObjectId,
    /// 属性起止值
    pub values: Vec<PropertyValues>,
    /// 单次播放时长
    pub duration: Duration,
    /// 额外重复次数（0 表示只播放一次）
    pub repeat_count: u32,
    /// 重复模式
    pub repeat_mode: RepeatMode,
    /// 缓动函数
    pub easing: EasingFunction,
}

impl AnimationDescriptor {
    /// 同时动画多个属性
    pub fn of_values(target: ObjectId, values: Vec<PropertyValues>) -> Self {
        Self {
            target,
            values,
            duration: DEFAULT_DURATION,
            repeat_count: 0,
            repeat_mode: RepeatMode::default(),
            easing: EasingFunction::default(),
        }
    }

    /// 单个浮点属性
    pub fn of_float(target: ObjectId, property: &'static str, from: f32, to: f32) -> Self {
        Self::of_values(target, vec![PropertyValues::new(property, from, to)])
    }

    /// 单个颜色属性
    pub fn of_argb(target: ObjectId, property: &'static str, from: super::Argb, to: super::Argb) -> Self {
        Self::of_values(target, vec![PropertyValues::new(property, from, to)])
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_repeat(mut self, count: u32, mode: RepeatMode) -> Self {
        self.repeat_count = count;
        self.repeat_mode = mode;
        self
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    /// 包含所有重复在内的总时长
    pub fn total_duration(&self) -> Duration {
        self.duration * (self.repeat_count + 1)
    }

    /// 查找某个属性的起止值
    pub fn property(&self, property: &str) -> Option<&PropertyValues> {
        self.values.iter().find(|v| v.property == property)
    }
}

/// 动画实例（时间轴）
#[derive(Debug, Clone)]
pub struct Animation {
    /// 动画 ID
    pub id: AnimationId,
    /// 单次播放时长（秒）
    pub duration: f64,
    /// 额外重复次数
    pub repeat_count: u32,
    /// 重复模式
    pub repeat_mode: RepeatMode,
    /// 缓动函数
    pub easing: EasingFunction,
    /// 当前状态
    pub state: AnimationState,
    /// 当前进度（已应用缓动与倒放）
    pub fraction: f32,
    /// 已经过的时间（秒）
    elapsed: f64,
}

impl Animation {
    pub fn new(id: AnimationId, duration: Duration) -> Self {
        Self {
            id,
            duration: duration.as_secs_f64(),
            repeat_count: 0,
            repeat_mode: RepeatMode::default(),
            easing: EasingFunction::default(),
            state: AnimationState::Running,
            fraction: 0.0,
            elapsed: 0.0,
        }
    }

    /// 从描述创建
    pub fn from_descriptor(id: AnimationId, descriptor: &AnimationDescriptor) -> Self {
        Self::new(id, descriptor.duration)
            .with_repeat(descriptor.repeat_count, descriptor.repeat_mode)
            .with_easing(descriptor.easing)
    }

    pub fn with_easing(mut self, easing: EasingFunction) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_repeat(mut self, count: u32, mode: RepeatMode) -> Self {
        self.repeat_count = count;
        self.repeat_mode = mode;
        self
    }

    /// 总时长（秒）
    pub fn total_duration(&self) -> f64 {
        self.duration * f64::from(self.repeat_count + 1)
    }

    /// 已经过的时间（秒）
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// 更新动画
    ///
    /// # 返回
    /// - `true`: 动画仍在进行中
    /// - `false`: 动画已结束
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.state.is_active() {
            return false;
        }

        self.elapsed += f64::from(dt.max(0.0));

        if self.duration <= 0.0 || self.elapsed + COMPLETION_EPSILON >= self.total_duration() {
            self.fraction = self.final_fraction();
            self.state = AnimationState::Completed;
            return false;
        }

        let position = self.elapsed / self.duration;
        let iteration = position.floor() as u32;
        let mut local = (position - f64::from(iteration)) as f32;
        if self.repeat_mode == RepeatMode::Reverse && iteration % 2 == 1 {
            local = 1.0 - local;
        }
        self.fraction = self.easing.apply(local);
        true
    }

    /// 结束时的进度：倒放奇数次后回到起点
    pub fn final_fraction(&self) -> f32 {
        if self.repeat_mode == RepeatMode::Reverse && self.repeat_count % 2 == 1 {
            0.0
        } else {
            1.0
        }
    }

    /// 取消动画，进度停留在当前值
    pub fn cancel(&mut self) {
        if self.state.is_active() {
            self.state = AnimationState::Cancelled;
        }
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// 是否为活跃状态
    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }
}
