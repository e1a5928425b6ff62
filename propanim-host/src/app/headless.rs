//! 无窗口运行：固定步长推进动画并记录事件

use propanim_runtime::{AnimationEvent, AnimationId, ButtonId, ButtonStates, ViewData};
use tracing::{info, warn};

use super::AppState;
use crate::config::AppConfig;

/// headless 运行结果
#[derive(Debug, Clone)]
pub struct HeadlessReport {
    /// 实际运行的帧数
    pub frames: u32,
    /// 点击产生的动画 id（被禁用而忽略的点击不计入）
    pub started: Vec<(ButtonId, AnimationId)>,
    /// `(帧号, 事件)`
    pub events: Vec<(u32, AnimationEvent)>,
    pub buttons: ButtonStates,
    pub star: ViewData,
    pub particles_left: usize,
}

impl HeadlessReport {
    /// 某个动画的完成帧
    pub fn completed_at(&self, id: AnimationId) -> Option<u32> {
        self.events.iter().find_map(|(frame, event)| match event {
            AnimationEvent::Completed(done) if *done == id => Some(*frame),
            _ => None,
        })
    }
}

/// 在第 0 帧依次点击 `taps`，然后以 `dt` 为步长运行 `frames` 帧
pub fn run_headless(config: AppConfig, taps: &[ButtonId], frames: u32, dt: f32) -> HeadlessReport {
    let mut app = AppState::new(config);
    let mut started = Vec::new();

    for &button in taps {
        match app.showcase.tap(button) {
            Ok(Some(id)) => {
                info!(%button, animation = %id, "点击");
                started.push((button, id));
            }
            Ok(None) => info!(%button, "按钮已禁用，点击被忽略"),
            Err(e) => warn!(%button, error = %e, "启动动画失败"),
        }
    }

    let mut events = Vec::new();
    for frame in 0..frames {
        // 固定步长，不做卡顿截断
        for event in app.showcase.update(dt) {
            info!(frame, ?event, "动画事件");
            events.push((frame, event));
        }
    }

    let report = HeadlessReport {
        frames,
        started,
        events,
        buttons: app.showcase.buttons().clone(),
        star: app.showcase.star().snapshot(),
        particles_left: app.showcase.particle_count(),
    };

    info!(
        frames,
        events = report.events.len(),
        particles = report.particles_left,
        "headless 运行结束"
    );
    report
}
