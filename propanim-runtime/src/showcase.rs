//! # Showcase 模块
//!
//! 展示界面控制器：六个按钮各自触发一段属性动画。
//!
//! | 按钮 | 目标 | 效果 |
//! |------|------|------|
//! | Rotate | 星星 | 旋转 -360° → 0°，1000ms |
//! | Translate | 星星 | 水平移动 0 → 200 再返回 |
//! | Scale | 星星 | X/Y 同时放大到 4 倍再返回 |
//! | Fade | 星星 | 透明度 1 → 0 再返回，每段 1000ms |
//! | Colorize | **父容器** | 背景色 黑 → 红 再返回，每段 500ms |
//! | Shower | 新粒子 | 随机大小/位置的星星边转边落下，结束后移除 |
//!
//! 除 Shower 外，按钮在动画开始时禁用，动画自然结束时恢复；
//! 动画被取消时不会恢复。

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use tracing::debug;

use crate::animation::{
    AnimationDescriptor, AnimationEvent, AnimationId, AnimationSystem, Argb, EasingFunction,
    ObjectId, PropertyValues, RepeatMode,
};
use crate::error::AnimResult;
use crate::random::RandomSource;
use crate::view::{ButtonId, ButtonStates, ContainerView, StarView, props};

/// 旋转时长
pub const ROTATE_DURATION: Duration = Duration::from_millis(1000);
/// 淡出时长（单程）
pub const FADE_DURATION: Duration = Duration::from_millis(1000);
/// 变色时长（单程）
pub const COLORIZE_DURATION: Duration = Duration::from_millis(500);
/// 水平移动距离
pub const TRANSLATE_DISTANCE: f32 = 200.0;
/// 放大倍数
pub const SCALE_FACTOR: f32 = 4.0;
/// 流星雨最长时长（不含）
pub const SHOWER_MAX_DURATION_MS: u64 = 10_000;
/// 流星最大旋转角度（不含）
pub const SHOWER_MAX_ROTATION: f32 = 1080.0;

/// Rotate：-360° → 0°
pub fn rotate_descriptor(star: ObjectId) -> AnimationDescriptor {
    AnimationDescriptor::of_float(star, props::ROTATION, -360.0, 0.0).with_duration(ROTATE_DURATION)
}

/// Translate：0 → 200 再返回
pub fn translate_descriptor(star: ObjectId) -> AnimationDescriptor {
    AnimationDescriptor::of_float(star, props::TRANSLATION_X, 0.0, TRANSLATE_DISTANCE)
        .with_repeat(1, RepeatMode::Reverse)
}

/// Scale：X/Y 同时放大到 4 倍再返回
pub fn scale_descriptor(star: ObjectId) -> AnimationDescriptor {
    AnimationDescriptor::of_values(
        star,
        vec![
            PropertyValues::new(props::SCALE_X, 1.0, SCALE_FACTOR),
            PropertyValues::new(props::SCALE_Y, 1.0, SCALE_FACTOR),
        ],
    )
    .with_repeat(1, RepeatMode::Reverse)
}

/// Fade：透明度 1 → 0 再返回
pub fn fade_descriptor(star: ObjectId) -> AnimationDescriptor {
    AnimationDescriptor::of_float(star, props::ALPHA, 1.0, 0.0)
        .with_duration(FADE_DURATION)
        .with_repeat(1, RepeatMode::Reverse)
}

/// Colorize：父容器背景 黑 → 红 再返回
pub fn colorize_descriptor(container: ObjectId) -> AnimationDescriptor {
    AnimationDescriptor::of_argb(container, props::BACKGROUND_COLOR, Argb::BLACK, Argb::RED)
        .with_duration(COLORIZE_DURATION)
        .with_repeat(1, RepeatMode::Reverse)
}

/// 一颗流星的随机参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShowerPlan {
    /// 等比缩放，[0.1, 1.6)
    pub scale: f32,
    /// 水平起始位置
    pub translation_x: f32,
    /// 垂直起点（容器顶部之上）
    pub start_y: f32,
    /// 垂直终点（容器底部之下）
    pub end_y: f32,
    /// 最终旋转角度，[0, 1080)
    pub rotation: f32,
    /// 时长，[0, 10000) ms
    pub duration: Duration,
}

impl ShowerPlan {
    /// 抽取一组参数
    ///
    /// 依次消耗：缩放、水平位置、旋转角度三个浮点数，以及一个时长整数。
    pub fn draw(
        random: &mut dyn RandomSource,
        container_width: f32,
        container_height: f32,
        star_width: f32,
        star_height: f32,
    ) -> Self {
        let scale = random.next_f32() * 1.5 + 0.1;
        let scaled_width = star_width * scale;
        let scaled_height = star_height * scale;
        let translation_x = random.next_f32() * container_width - scaled_width / 2.0;
        let rotation = random.next_f32() * SHOWER_MAX_ROTATION;
        let duration = Duration::from_millis(random.next_below(SHOWER_MAX_DURATION_MS));

        Self {
            scale,
            translation_x,
            start_y: -scaled_height,
            end_y: container_height + scaled_height,
            rotation,
            duration,
        }
    }

    /// 下落（加速）与旋转（匀速）两段动画
    pub fn descriptors(&self, particle: ObjectId) -> Vec<AnimationDescriptor> {
        vec![
            AnimationDescriptor::of_float(particle, props::TRANSLATION_Y, self.start_y, self.end_y)
                .with_easing(EasingFunction::Accelerate(1.0)),
            AnimationDescriptor::of_float(particle, props::ROTATION, 0.0, self.rotation)
                .with_easing(EasingFunction::Linear),
        ]
    }
}

/// 动画结束后要执行的动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OnEnd {
    /// 恢复按钮
    EnableButton(ButtonId),
    /// 从容器移除粒子
    RemoveParticle(ObjectId),
}

/// 展示界面控制器
///
/// 持有星星、父容器和按钮状态的句柄，并驱动动画系统。
/// 宿主层每帧调用 [`Showcase::update`]，点击时调用 [`Showcase::tap`]。
pub struct Showcase {
    system: AnimationSystem,
    star: StarView,
    star_id: ObjectId,
    container: ContainerView,
    container_id: ObjectId,
    buttons: ButtonStates,
    on_end: HashMap<AnimationId, OnEnd>,
    random: Box<dyn RandomSource>,
}

impl std::fmt::Debug for Showcase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Showcase")
            .field("system", &self.system)
            .field("star", &self.star_id)
            .field("container", &self.container_id)
            .field("buttons", &self.buttons)
            .field("pending", &self.on_end.len())
            .finish()
    }
}

impl Showcase {
    /// 绑定星星与父容器
    pub fn new(star: StarView, container: ContainerView, random: Box<dyn RandomSource>) -> Self {
        let mut system = AnimationSystem::new();
        let star_id = system.register(Rc::new(star.clone()));
        let container_id = system.register(Rc::new(container.clone()));

        Self {
            system,
            star,
            star_id,
            container,
            container_id,
            buttons: ButtonStates::new(),
            on_end: HashMap::new(),
            random,
        }
    }

    /// 按钮点击
    ///
    /// 按钮处于禁用状态时忽略点击，返回 `Ok(None)`。
    pub fn tap(&mut self, button: ButtonId) -> AnimResult<Option<AnimationId>> {
        if !self.buttons.is_enabled(button) {
            debug!(%button, "按钮已禁用，忽略点击");
            return Ok(None);
        }

        let id = match button {
            ButtonId::Rotate => self.rotate()?,
            ButtonId::Translate => self.translate()?,
            ButtonId::Scale => self.scale()?,
            ButtonId::Fade => self.fade()?,
            ButtonId::Colorize => self.colorize()?,
            ButtonId::Shower => self.shower()?,
        };
        Ok(Some(id))
    }

    pub fn rotate(&mut self) -> AnimResult<AnimationId> {
        self.start_with_button(ButtonId::Rotate, rotate_descriptor(self.star_id))
    }

    pub fn translate(&mut self) -> AnimResult<AnimationId> {
        self.start_with_button(ButtonId::Translate, translate_descriptor(self.star_id))
    }

    pub fn scale(&mut self) -> AnimResult<AnimationId> {
        self.start_with_button(ButtonId::Scale, scale_descriptor(self.star_id))
    }

    pub fn fade(&mut self) -> AnimResult<AnimationId> {
        self.start_with_button(ButtonId::Fade, fade_descriptor(self.star_id))
    }

    pub fn colorize(&mut self) -> AnimResult<AnimationId> {
        self.start_with_button(ButtonId::Colorize, colorize_descriptor(self.container_id))
    }

    /// 生成一颗流星
    ///
    /// 每次调用互不相关，可以同时存在任意多颗。
    pub fn shower(&mut self) -> AnimResult<AnimationId> {
        let plan = ShowerPlan::draw(
            self.random.as_mut(),
            self.container.width(),
            self.container.height(),
            self.star.width(),
            self.star.height(),
        );

        let particle = StarView::new(self.star.width(), self.star.height());
        particle.set_scale(plan.scale);
        particle.set_translation_x(plan.translation_x);

        let particle_id = self.system.register(Rc::new(particle.clone()));
        self.container.add_child(particle_id, particle);

        match self.system.start_together(plan.descriptors(particle_id), plan.duration) {
            Ok(set_id) => {
                debug!(
                    particle = %particle_id,
                    scale = plan.scale,
                    duration_ms = plan.duration.as_millis() as u64,
                    "流星出现"
                );
                self.on_end.insert(set_id, OnEnd::RemoveParticle(particle_id));
                Ok(set_id)
            }
            Err(e) => {
                self.remove_particle(particle_id);
                Err(e)
            }
        }
    }

    /// 推进所有动画并处理结束回调
    ///
    /// # 返回
    /// 本帧的动画事件
    pub fn update(&mut self, dt: f32) -> Vec<AnimationEvent> {
        let events = self.system.update(dt);

        for event in &events {
            match *event {
                AnimationEvent::Started(_) => {}
                AnimationEvent::Completed(id) => match self.on_end.remove(&id) {
                    Some(OnEnd::EnableButton(button)) => {
                        self.buttons.set_enabled(button, true);
                        debug!(%button, "动画结束，恢复按钮");
                    }
                    Some(OnEnd::RemoveParticle(particle)) => self.remove_particle(particle),
                    None => {}
                },
                AnimationEvent::Cancelled(id) => match self.on_end.remove(&id) {
                    // 取消时不恢复按钮
                    Some(OnEnd::EnableButton(button)) => {
                        debug!(%button, "动画被取消，按钮保持禁用");
                    }
                    Some(OnEnd::RemoveParticle(particle)) => self.remove_particle(particle),
                    None => {}
                },
            }
        }

        events
    }

    /// 取消一段动画（按钮不会恢复）
    pub fn cancel(&mut self, id: AnimationId) -> bool {
        self.system.cancel(id)
    }

    /// 布局变化时同步容器尺寸
    pub fn set_container_size(&mut self, width: f32, height: f32) {
        self.container.set_size(width, height);
    }

    /// 同步星星的固有尺寸
    pub fn set_star_size(&mut self, width: f32, height: f32) {
        self.star.set_size(width, height);
    }

    pub fn star(&self) -> &StarView {
        &self.star
    }

    pub fn star_id(&self) -> ObjectId {
        self.star_id
    }

    pub fn container(&self) -> &ContainerView {
        &self.container
    }

    pub fn container_id(&self) -> ObjectId {
        self.container_id
    }

    pub fn buttons(&self) -> &ButtonStates {
        &self.buttons
    }

    pub fn is_enabled(&self, button: ButtonId) -> bool {
        self.buttons.is_enabled(button)
    }

    pub fn system(&self) -> &AnimationSystem {
        &self.system
    }

    /// 当前在容器中的流星数量
    pub fn particle_count(&self) -> usize {
        self.container.child_count()
    }

    fn start_with_button(
        &mut self,
        button: ButtonId,
        descriptor: AnimationDescriptor,
    ) -> AnimResult<AnimationId> {
        let total = descriptor.total_duration();
        let id = self.system.start(descriptor)?;
        self.buttons.set_enabled(button, false);
        self.on_end.insert(id, OnEnd::EnableButton(button));
        debug!(%button, animation = %id, total_ms = total.as_millis() as u64, "开始动画");
        Ok(id)
    }

    fn remove_particle(&mut self, particle: ObjectId) {
        self.container.remove_child(particle);
        self.system.unregister(particle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimValue;
    use crate::random::ScriptedRandom;

    fn showcase(random: ScriptedRandom) -> Showcase {
        Showcase::new(
            StarView::new(40.0, 40.0),
            ContainerView::new(400.0, 600.0, Argb::BLACK),
            Box::new(random),
        )
    }

    #[test]
    fn test_rotate_descriptor() {
        let star = ObjectId::new(1);
        let desc = rotate_descriptor(star);
        let rotation = desc.property(props::ROTATION).unwrap();

        assert_eq!(desc.target, star);
        assert_eq!(rotation.from, AnimValue::Float(-360.0));
        assert_eq!(rotation.to, AnimValue::Float(0.0));
        assert_eq!(desc.duration, Duration::from_millis(1000));
        assert_eq!(desc.repeat_count, 0);
        assert_eq!(desc.easing, EasingFunction::AccelerateDecelerate);
    }

    #[test]
    fn test_reversing_descriptors() {
        let star = ObjectId::new(1);
        let container = ObjectId::new(2);

        for desc in [
            translate_descriptor(star),
            scale_descriptor(star),
            fade_descriptor(star),
            colorize_descriptor(container),
        ] {
            assert_eq!(desc.repeat_count, 1);
            assert_eq!(desc.repeat_mode, RepeatMode::Reverse);
            assert_eq!(desc.easing, EasingFunction::AccelerateDecelerate);
        }
    }

    #[test]
    fn test_descriptor_literals() {
        let star = ObjectId::new(1);
        let container = ObjectId::new(2);

        let translate = translate_descriptor(star);
        let x = translate.property(props::TRANSLATION_X).unwrap();
        assert_eq!((x.from, x.to), (AnimValue::Float(0.0), AnimValue::Float(200.0)));

        let scale = scale_descriptor(star);
        for p in [props::SCALE_X, props::SCALE_Y] {
            assert_eq!(scale.property(p).unwrap().to, AnimValue::Float(4.0));
        }

        let fade = fade_descriptor(star);
        let alpha = fade.property(props::ALPHA).unwrap();
        assert_eq!((alpha.from, alpha.to), (AnimValue::Float(1.0), AnimValue::Float(0.0)));
        assert_eq!(fade.duration, Duration::from_millis(1000));

        let colorize = colorize_descriptor(container);
        assert_eq!(colorize.target, container);
        let bg = colorize.property(props::BACKGROUND_COLOR).unwrap();
        assert_eq!((bg.from, bg.to), (AnimValue::Color(Argb::BLACK), AnimValue::Color(Argb::RED)));
        assert_eq!(colorize.duration, Duration::from_millis(500));
    }

    #[test]
    fn test_shower_plan_from_scripted_values() {
        let mut random = ScriptedRandom::new([0.5, 0.25, 0.5], [4000]);
        let plan = ShowerPlan::draw(&mut random, 400.0, 600.0, 40.0, 40.0);

        // 0.5 * 1.5 + 0.1
        assert!((plan.scale - 0.85).abs() < 1e-6);
        // 0.25 * 400 - 40 * 0.85 / 2
        assert!((plan.translation_x - 83.0).abs() < 1e-4);
        assert!((plan.start_y + 34.0).abs() < 1e-4);
        assert!((plan.end_y - 634.0).abs() < 1e-4);
        assert_eq!(plan.rotation, 540.0);
        assert_eq!(plan.duration, Duration::from_millis(4000));

        let descriptors = plan.descriptors(ObjectId::new(9));
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].easing, EasingFunction::Accelerate(1.0));
        assert_eq!(descriptors[1].easing, EasingFunction::Linear);
    }

    #[test]
    fn test_tap_disables_and_reenables() {
        let mut showcase = showcase(ScriptedRandom::default());

        let id = showcase.tap(ButtonId::Rotate).unwrap();
        assert!(id.is_some());
        assert!(!showcase.is_enabled(ButtonId::Rotate));

        // 禁用期间的点击被忽略
        assert_eq!(showcase.tap(ButtonId::Rotate), Ok(None));

        showcase.update(0.5);
        assert!(!showcase.is_enabled(ButtonId::Rotate));

        showcase.update(0.5);
        assert!(showcase.is_enabled(ButtonId::Rotate));
        assert_eq!(showcase.star().snapshot().rotation, 0.0);
    }

    #[test]
    fn test_cancel_does_not_reenable() {
        let mut showcase = showcase(ScriptedRandom::default());

        let id = showcase.fade().unwrap();
        showcase.update(0.1);
        assert!(showcase.cancel(id));
        showcase.update(0.1);

        assert!(!showcase.is_enabled(ButtonId::Fade));
    }

    #[test]
    fn test_colorize_changes_container_not_star() {
        let mut showcase = showcase(ScriptedRandom::default());
        let before = showcase.star().snapshot();

        showcase.colorize().unwrap();
        showcase.update(0.5);

        assert_eq!(showcase.container().background(), Argb::RED);
        assert_eq!(showcase.star().snapshot(), before);

        showcase.update(0.5);
        assert_eq!(showcase.container().background(), Argb::BLACK);
        assert!(showcase.is_enabled(ButtonId::Colorize));
    }

    #[test]
    fn test_shower_never_disables_button() {
        let mut showcase = showcase(ScriptedRandom::new([0.5], [1000]));

        showcase.tap(ButtonId::Shower).unwrap();
        showcase.tap(ButtonId::Shower).unwrap();

        assert!(showcase.is_enabled(ButtonId::Shower));
        assert_eq!(showcase.particle_count(), 2);

        showcase.update(1.0);
        assert_eq!(showcase.particle_count(), 0);
    }
}
