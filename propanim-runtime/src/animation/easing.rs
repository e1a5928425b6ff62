//! # Easing 模块
//!
//! 缓动函数（插值器），把时间进度映射为动画进度。

use std::f32::consts::PI;

/// 缓动函数类型
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EasingFunction {
    /// 线性（匀速）
    Linear,
    /// 加速，`t^(2·factor)`
    Accelerate(f32),
    /// 两头慢中间快（余弦曲线），未指定时的默认值
    #[default]
    AccelerateDecelerate,
}

impl EasingFunction {
    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)
    ///
    /// # 返回
    /// - 缓动后的进度值 (0.0 - 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match *self {
            EasingFunction::Linear => t,
            EasingFunction::Accelerate(factor) => {
                if factor == 1.0 {
                    t * t
                } else {
                    t.powf(2.0 * factor)
                }
            }
            EasingFunction::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}
