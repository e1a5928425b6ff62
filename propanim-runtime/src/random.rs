//! # Random 模块
//!
//! 随机数来源。
//!
//! 流星雨的参数全部来自 `RandomSource`，测试可以注入固定序列，
//! 宿主层可以通过种子复现同一场流星雨。

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// 随机数来源
pub trait RandomSource {
    /// [0, 1) 上均匀分布的浮点数
    fn next_f32(&mut self) -> f32;

    /// [0, upper) 上均匀分布的整数；`upper == 0` 时返回 0
    fn next_below(&mut self, upper: u64) -> u64;
}

/// 基于 `StdRng` 的随机数来源
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// 使用固定种子（可复现）
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// 使用系统熵源
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// 有种子时可复现，否则取系统熵
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.r#gen::<f32>()
    }

    fn next_below(&mut self, upper: u64) -> u64 {
        if upper == 0 {
            return 0;
        }
        self.rng.gen_range(0..upper)
    }
}

/// 按固定序列回放的随机数来源
///
/// 浮点序列与整数序列分别循环使用；序列为空时返回 0。
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    floats: VecDeque<f32>,
    integers: VecDeque<u64>,
}

impl ScriptedRandom {
    pub fn new(floats: impl IntoIterator<Item = f32>, integers: impl IntoIterator<Item = u64>) -> Self {
        Self {
            floats: floats.into_iter().collect(),
            integers: integers.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        match self.floats.pop_front() {
            Some(v) => {
                self.floats.push_back(v);
                v
            }
            None => 0.0,
        }
    }

    fn next_below(&mut self, upper: u64) -> u64 {
        match self.integers.pop_front() {
            Some(v) => {
                self.integers.push_back(v);
                if upper == 0 { 0 } else { v.min(upper - 1) }
            }
            None => 0,
        }
    }
}
