//! 命令行参数

use std::path::PathBuf;

use clap::Parser;
use propanim_runtime::{ButtonId, UnknownButton};

use crate::config::AppConfig;

/// 属性动画展示
#[derive(Debug, Clone, Parser)]
#[command(name = "propanim")]
#[command(about = "属性动画展示 - 旋转、平移、缩放、淡出、变色、流星雨")]
#[command(version)]
pub struct Cli {
    /// 配置文件路径
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// 不打开窗口，按固定步长运行并输出动画事件
    #[arg(long)]
    pub headless: bool,

    /// headless 模式运行的帧数
    #[arg(long, default_value_t = 600)]
    pub frames: u32,

    /// headless 模式每帧的时长（秒）
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// headless 模式在第 0 帧点击的按钮（可重复）
    #[arg(long = "tap", value_parser = parse_button)]
    pub taps: Vec<ButtonId>,

    /// 流星雨随机种子（覆盖配置文件）
    #[arg(long)]
    pub seed: Option<u64>,

    /// 输出 debug 级别日志（release build 默认只输出 info）
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_button(s: &str) -> Result<ButtonId, UnknownButton> {
    s.parse()
}

impl Cli {
    /// 用命令行参数覆盖配置文件中的值
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(seed) = self.seed {
            config.shower.seed = Some(seed);
        }
    }
}
