//! # Value 模块
//!
//! 可动画的属性值以及插值（evaluator）规则。

use serde::{Deserialize, Serialize};

/// ARGB 颜色（`0xAARRGGBB`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Argb(pub u32);

impl Argb {
    pub const BLACK: Argb = Argb(0xFF00_0000);
    pub const WHITE: Argb = Argb(0xFFFF_FFFF);
    pub const RED: Argb = Argb(0xFFFF_0000);
    pub const TRANSPARENT: Argb = Argb(0x0000_0000);

    /// 由四个通道构造
    pub const fn from_channels(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// 拆分为 `[a, r, g, b]`
    pub const fn channels(self) -> [u8; 4] {
        [
            (self.0 >> 24) as u8,
            (self.0 >> 16) as u8,
            (self.0 >> 8) as u8,
            self.0 as u8,
        ]
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// 颜色插值
    ///
    /// RGB 通道先从 sRGB 转到线性空间（gamma 2.2）再插值，alpha 直接线性插值，
    /// 结果四舍五入回 8 位通道。
    pub fn lerp(self, other: Self, fraction: f32) -> Self {
        let [a0, r0, g0, b0] = self.channels().map(|c| c as f32 / 255.0);
        let [a1, r1, g1, b1] = other.channels().map(|c| c as f32 / 255.0);

        let a = a0 + fraction * (a1 - a0);
        let r = lerp_linear(r0, r1, fraction);
        let g = lerp_linear(g0, g1, fraction);
        let b = lerp_linear(b0, b1, fraction);

        Self::from_channels(to_channel(a), to_channel(r), to_channel(g), to_channel(b))
    }
}

impl std::fmt::Display for Argb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:08X}", self.0)
    }
}

const GAMMA: f32 = 2.2;

fn lerp_linear(from: f32, to: f32, fraction: f32) -> f32 {
    let from = from.powf(GAMMA);
    let to = to.powf(GAMMA);
    let v = from + fraction * (to - from);
    v.max(0.0).powf(1.0 / GAMMA)
}

fn to_channel(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

/// 属性值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimValue {
    /// 浮点属性（角度、位移、缩放、透明度）
    Float(f32),
    /// 颜色属性
    Color(Argb),
}

/// 属性值类型（用于校验）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Float,
    Color,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueKind::Float => f.write_str("float"),
            ValueKind::Color => f.write_str("color"),
        }
    }
}

impl AnimValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            AnimValue::Float(_) => ValueKind::Float,
            AnimValue::Color(_) => ValueKind::Color,
        }
    }

    /// 按进度在两个值之间插值
    ///
    /// 类型不一致时返回 `None`。
    pub fn lerp(self, to: AnimValue, fraction: f32) -> Option<AnimValue> {
        match (self, to) {
            (AnimValue::Float(a), AnimValue::Float(b)) => {
                Some(AnimValue::Float(a + (b - a) * fraction))
            }
            (AnimValue::Color(a), AnimValue::Color(b)) => Some(AnimValue::Color(a.lerp(b, fraction))),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            AnimValue::Float(v) => Some(*v),
            AnimValue::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<Argb> {
        match self {
            AnimValue::Color(c) => Some(*c),
            AnimValue::Float(_) => None,
        }
    }
}

impl From<f32> for AnimValue {
    fn from(v: f32) -> Self {
        AnimValue::Float(v)
    }
}

impl From<Argb> for AnimValue {
    fn from(c: Argb) -> Self {
        AnimValue::Color(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argb_channels() {
        let c = Argb::from_channels(0x80, 0x12, 0x34, 0x56);
        assert_eq!(c, Argb(0x8012_3456));
        assert_eq!(c.channels(), [0x80, 0x12, 0x34, 0x56]);
        assert_eq!(c.alpha(), 0x80);
        assert_eq!(c.to_string(), "#80123456");
    }

    #[test]
    fn test_argb_lerp_endpoints() {
        assert_eq!(Argb::BLACK.lerp(Argb::RED, 0.0), Argb::BLACK);
        assert_eq!(Argb::BLACK.lerp(Argb::RED, 1.0), Argb::RED);
    }

    #[test]
    fn test_argb_lerp_is_gamma_corrected() {
        // 0.5^(1/2.2) * 255 ≈ 186
        let mid = Argb::BLACK.lerp(Argb::RED, 0.5);
        assert_eq!(mid.channels(), [0xFF, 186, 0, 0]);
    }

    #[test]
    fn test_value_lerp() {
        let v = AnimValue::Float(-360.0).lerp(AnimValue::Float(0.0), 0.25);
        assert_eq!(v, Some(AnimValue::Float(-270.0)));

        let mismatch = AnimValue::Float(0.0).lerp(AnimValue::Color(Argb::RED), 0.5);
        assert_eq!(mismatch, None);
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(AnimValue::from(1.0).kind(), ValueKind::Float);
        assert_eq!(AnimValue::from(Argb::RED).kind(), ValueKind::Color);
        assert_eq!(AnimValue::Float(2.0).as_float(), Some(2.0));
        assert_eq!(AnimValue::Float(2.0).as_color(), None);
    }
}
