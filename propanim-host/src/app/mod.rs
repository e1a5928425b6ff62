//! # App 模块
//!
//! 应用状态与每帧逻辑：推进动画、绘制场景、响应按钮。
//! 与窗口系统无关，窗口层只负责把 egui 的输出提交给 GPU。

mod headless;

pub use headless::{HeadlessReport, run_headless};

use std::time::Instant;

use egui::Color32;
use propanim_runtime::{
    AnimationEvent, Argb, ButtonId, ContainerView, SeededRandom, Showcase, StarView,
};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::renderer::{self, SceneSnapshot};

/// 单帧时长上限（秒），避免窗口拖动等卡顿后动画一次跳过太多
const MAX_FRAME_DT: f32 = 0.1;

/// 按配置构建展示界面
///
/// 容器尺寸先取窗口尺寸，首帧布局后再同步为实际绘制区域。
pub fn build_showcase(config: &AppConfig) -> Showcase {
    let star = StarView::new(config.star.size, config.star.size);
    let container = ContainerView::new(
        config.window.width as f32,
        config.window.height as f32,
        Argb::BLACK,
    );
    let random = SeededRandom::new(config.shower.seed);

    Showcase::new(star, container, Box::new(random))
}

/// 抓取当前帧需要绘制的视图数据
pub fn snapshot(showcase: &Showcase) -> SceneSnapshot {
    SceneSnapshot {
        background: showcase.container().background(),
        star: showcase.star().snapshot(),
        particles: showcase
            .container()
            .children()
            .into_iter()
            .map(|(_, data)| data)
            .collect(),
    }
}

/// 记录动画事件
pub fn log_events(events: &[AnimationEvent]) {
    for event in events {
        match event {
            AnimationEvent::Started(id) => debug!(animation = %id, "动画开始"),
            AnimationEvent::Completed(id) => debug!(animation = %id, "动画完成"),
            AnimationEvent::Cancelled(id) => debug!(animation = %id, "动画取消"),
        }
    }
}

/// 应用状态
pub struct AppState {
    pub config: AppConfig,
    pub showcase: Showcase,
    star_color: Color32,
    last_frame: Option<Instant>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let showcase = build_showcase(&config);
        let star_color = renderer::argb_to_color32(config.star.color);

        Self {
            config,
            showcase,
            star_color,
            last_frame: None,
        }
    }

    /// 按钮点击
    pub fn tap(&mut self, button: ButtonId) {
        if let Err(e) = self.showcase.tap(button) {
            warn!(%button, error = %e, "启动动画失败");
        }
    }

    /// 推进一帧
    pub fn advance(&mut self, dt: f32) -> Vec<AnimationEvent> {
        let events = self.showcase.update(dt.clamp(0.0, MAX_FRAME_DT));
        log_events(&events);
        events
    }

    /// 构建并绘制一帧 UI
    pub fn ui(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        self.advance(dt);

        let mut tapped = Vec::new();

        egui::TopBottomPanel::bottom("buttons").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal_wrapped(|ui| {
                for button in ButtonId::ALL {
                    let enabled = self.showcase.is_enabled(button);
                    if ui
                        .add_enabled(enabled, egui::Button::new(button.label()))
                        .clicked()
                    {
                        tapped.push(button);
                    }
                }
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.showcase.set_container_size(rect.width(), rect.height());

                let painter = ui.painter_at(rect);
                renderer::paint_scene(&painter, rect, &snapshot(&self.showcase), self.star_color);

                if self.config.debug.overlay {
                    self.debug_overlay(ui, rect);
                }
            });

        for button in tapped {
            self.tap(button);
        }

        // 空闲时不请求重绘，窗口层据此让事件循环休眠
        if self.is_animating() {
            ctx.request_repaint();
        }
    }

    /// 是否有动画在运行（需要持续重绘）
    pub fn is_animating(&self) -> bool {
        self.showcase.system().has_active_animations()
    }

    fn debug_overlay(&self, ui: &egui::Ui, rect: egui::Rect) {
        let system = self.showcase.system();
        let text = format!(
            "animations: {}\nparticles: {}\ncontainer: {:.0}x{:.0}",
            system.active_count(),
            self.showcase.particle_count(),
            rect.width(),
            rect.height(),
        );
        ui.painter().text(
            rect.min + egui::vec2(8.0, 8.0),
            egui::Align2::LEFT_TOP,
            text,
            egui::FontId::monospace(12.0),
            Color32::from_gray(200),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.shower.seed = Some(3);
        config
    }

    #[test]
    fn test_build_showcase_uses_config() {
        let mut config = test_config();
        config.star.size = 64.0;

        let showcase = build_showcase(&config);
        assert_eq!(showcase.star().width(), 64.0);
        assert_eq!(showcase.container().width(), 480.0);
        assert_eq!(showcase.container().background(), Argb::BLACK);
        assert!(ButtonId::ALL.iter().all(|b| showcase.is_enabled(*b)));
    }

    #[test]
    fn test_snapshot_includes_particles() {
        let mut app = AppState::new(test_config());
        app.tap(ButtonId::Shower);
        app.tap(ButtonId::Shower);

        let scene = snapshot(&app.showcase);
        assert_eq!(scene.particles.len(), 2);
        assert_eq!(scene.background, Argb::BLACK);
    }

    #[test]
    fn test_is_animating_follows_showcase() {
        let mut app = AppState::new(test_config());
        assert!(!app.is_animating());

        app.tap(ButtonId::Scale);
        assert!(app.is_animating());

        for _ in 0..6 {
            app.advance(MAX_FRAME_DT);
        }
        assert!(!app.is_animating());
    }

    #[test]
    fn test_advance_clamps_large_dt() {
        let mut app = AppState::new(test_config());
        app.tap(ButtonId::Rotate);

        // 一次长时间停顿只推进 MAX_FRAME_DT
        app.advance(5.0);
        assert!(!app.showcase.is_enabled(ButtonId::Rotate));

        for _ in 0..20 {
            app.advance(MAX_FRAME_DT);
        }
        assert!(app.showcase.is_enabled(ButtonId::Rotate));
    }
}
