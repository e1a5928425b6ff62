//! # Host 层
//!
//! 属性动画展示的宿主层，使用 winit + wgpu + egui 作为窗口和渲染后端。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 配置加载与命令行参数
//! - 窗口与渲染
//! - 输入采集（按钮点击）
//! - 每帧驱动 `propanim-runtime` 的 [`Showcase`](propanim_runtime::Showcase)
//!
//! Host 层不包含动画逻辑，只负责把视图状态画出来。

pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod renderer;
pub mod window;

pub use app::{AppState, HeadlessReport, build_showcase, run_headless};
pub use cli::Cli;
pub use config::{AppConfig, ConfigError, DebugConfig, ShowerConfig, StarConfig, WindowConfig};
pub use renderer::{SceneSnapshot, argb_to_color32, star_mesh, star_outline};
