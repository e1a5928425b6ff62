//! # System 模块
//!
//! 动画驱动器。
//!
//! 对象实现 `Animatable` trait，系统每帧直接写入属性值：
//! ```rust,ignore
//! let obj_id = system.register(Rc::new(star));
//! system.start(AnimationDescriptor::of_float(obj_id, "alpha", 1.0, 0.0))?;
//! for event in system.update(dt) { /* Started / Completed / Cancelled */ }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::Duration;

use super::traits::{AnimPropertyKey, Animatable, ObjectId};
use super::{Animation, AnimationDescriptor, AnimationEvent, AnimationId, PropertyValues};
use crate::error::{AnimResult, AnimationError};

/// 正在运行的动画
struct Running {
    /// 目标对象
    object_id: ObjectId,
    /// 属性起止值
    values: Vec<PropertyValues>,
    /// 时间轴
    animation: Animation,
    /// 所属动画组
    set: Option<AnimationId>,
}

impl Running {
    fn touches(&self, key: &AnimPropertyKey) -> bool {
        self.object_id == key.object_id && self.values.iter().any(|v| v.property == key.property_id)
    }
}

/// 同时播放的一组动画
struct AnimatorSet {
    /// 尚未完成的子动画
    pending: Vec<AnimationId>,
}

/// 动画系统
///
/// 管理所有动画实例，提供统一的更新和查询接口。
///
/// 系统只负责：
/// 1. 管理时间轴：知道某个属性从 A 到 B 需要在 duration 内变化
/// 2. 直接设置对象属性（通过 Animatable trait）
/// 3. 通过事件队列报告生命周期（Started / Completed / Cancelled）
pub struct AnimationSystem {
    /// 已注册的对象
    objects: HashMap<ObjectId, Rc<dyn Animatable>>,
    /// 正在运行的动画（按 ID 排序，保证事件顺序稳定）
    animations: BTreeMap<AnimationId, Running>,
    /// 动画组
    sets: BTreeMap<AnimationId, AnimatorSet>,
    /// 下一个动画 ID
    next_anim_id: u64,
    /// 下一个对象 ID
    next_object_id: u64,
    /// 待处理的事件队列
    events: Vec<AnimationEvent>,
}

impl Default for AnimationSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnimationSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSystem")
            .field("objects", &self.objects.len())
            .field("animations", &self.animations.len())
            .field("sets", &self.sets.len())
            .finish()
    }
}

impl AnimationSystem {
    /// 创建新的动画系统
    pub fn new() -> Self {
        Self {
            objects: HashMap::new(),
            animations: BTreeMap::new(),
            sets: BTreeMap::new(),
            next_anim_id: 1,
            next_object_id: 1,
            events: Vec::new(),
        }
    }

    fn next_animation_id(&mut self) -> AnimationId {
        let id = AnimationId::new(self.next_anim_id);
        self.next_anim_id += 1;
        id
    }

    fn next_object_id(&mut self) -> ObjectId {
        let id = ObjectId::new(self.next_object_id);
        self.next_object_id += 1;
        id
    }

    // ========== 对象管理 ==========

    /// 注册可动画对象
    ///
    /// 系统分配唯一的 `ObjectId` 并返回，后续通过此 ID 引用对象。
    /// 同一类型的对象多次注册也会获得不同的 ID。
    pub fn register<T: Animatable>(&mut self, object: Rc<T>) -> ObjectId {
        let id = self.next_object_id();
        self.objects.insert(id, object as Rc<dyn Animatable>);
        id
    }

    /// 注销对象
    ///
    /// 该对象上仍在运行的动画会被取消（产生 `Cancelled` 事件）。
    pub fn unregister(&mut self, object_id: ObjectId) {
        let owned: Vec<AnimationId> = self
            .animations
            .iter()
            .filter(|(_, r)| r.object_id == object_id)
            .map(|(id, _)| *id)
            .collect();
        for id in owned {
            self.cancel(id);
        }
        self.objects.remove(&object_id);
    }

    /// 检查对象是否已注册
    pub fn is_registered(&self, object_id: ObjectId) -> bool {
        self.objects.contains_key(&object_id)
    }

    /// 获取已注册对象数量
    pub fn registered_count(&self) -> usize {
        self.objects.len()
    }

    // ========== 动画控制 ==========

    /// 启动动画
    ///
    /// 起始值立即写入对象；同一属性上已有的动画会被取消。
    pub fn start(&mut self, descriptor: AnimationDescriptor) -> AnimResult<AnimationId> {
        self.validate(&descriptor)?;
        let id = self.next_animation_id();
        self.launch(id, descriptor, None);
        self.events.push(AnimationEvent::Started(id));
        Ok(id)
    }

    /// 同时启动一组动画
    ///
    /// 所有子动画共用 `duration`。组在全部子动画自然结束后产生一次 `Completed`，
    /// 任一子动画被取消则整组取消。
    pub fn start_together(
        &mut self,
        descriptors: Vec<AnimationDescriptor>,
        duration: Duration,
    ) -> AnimResult<AnimationId> {
        if descriptors.is_empty() {
            return Err(AnimationError::EmptySet);
        }
        for descriptor in &descriptors {
            self.validate(descriptor)?;
        }

        let set_id = self.next_animation_id();
        self.events.push(AnimationEvent::Started(set_id));
        self.sets.insert(set_id, AnimatorSet { pending: Vec::new() });

        for descriptor in descriptors {
            let child_id = self.next_animation_id();
            if let Some(set) = self.sets.get_mut(&set_id) {
                set.pending.push(child_id);
            }
            self.launch(child_id, descriptor.with_duration(duration), Some(set_id));
            self.events.push(AnimationEvent::Started(child_id));
        }

        Ok(set_id)
    }

    /// 取消动画或动画组
    ///
    /// 属性停留在当前值，产生 `Cancelled` 事件。
    ///
    /// # 返回
    /// 该 ID 是否仍在运行
    pub fn cancel(&mut self, id: AnimationId) -> bool {
        if let Some(set) = self.sets.remove(&id) {
            for child in set.pending {
                self.cancel(child);
            }
            self.events.push(AnimationEvent::Cancelled(id));
            return true;
        }

        if let Some(mut running) = self.animations.remove(&id) {
            running.animation.cancel();
            self.events.push(AnimationEvent::Cancelled(id));
            if let Some(set_id) = running.set {
                self.cancel(set_id);
            }
            return true;
        }

        false
    }

    /// 更新所有动画
    ///
    /// # 返回
    /// 自上次调用以来产生的事件（按发生顺序）
    pub fn update(&mut self, dt: f32) -> Vec<AnimationEvent> {
        let mut finished: Vec<AnimationId> = Vec::new();

        for (id, running) in &mut self.animations {
            running.animation.update(dt);
            if let Some(object) = self.objects.get(&running.object_id) {
                apply_values(object.as_ref(), &running.values, running.animation.fraction);
            }
            if running.animation.is_finished() {
                finished.push(*id);
            }
        }

        for id in finished {
            let Some(running) = self.animations.remove(&id) else {
                continue;
            };
            self.events.push(AnimationEvent::Completed(id));

            if let Some(set_id) = running.set {
                let set_done = match self.sets.get_mut(&set_id) {
                    Some(set) => {
                        set.pending.retain(|child| *child != id);
                        set.pending.is_empty()
                    }
                    None => false,
                };
                if set_done {
                    self.sets.remove(&set_id);
                    self.events.push(AnimationEvent::Completed(set_id));
                }
            }
        }

        std::mem::take(&mut self.events)
    }

    // ========== 查询方法 ==========

    /// 检查是否有活跃的动画
    pub fn has_active_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    /// 检查对象是否有活跃的动画
    pub fn has_object_animations(&self, object_id: ObjectId) -> bool {
        self.animations.values().any(|r| r.object_id == object_id)
    }

    /// 获取活跃动画数量（不含动画组本身）
    pub fn active_count(&self) -> usize {
        self.animations.len()
    }

    /// 动画或动画组是否仍在运行
    pub fn is_running(&self, id: AnimationId) -> bool {
        self.animations.contains_key(&id) || self.sets.contains_key(&id)
    }

    /// 获取动画的当前进度（已应用缓动）
    pub fn get_progress(&self, id: AnimationId) -> Option<f32> {
        self.animations.get(&id).map(|r| r.animation.fraction)
    }

    /// 获取对象属性的当前值
    pub fn get_object_property(
        &self,
        object_id: ObjectId,
        property_id: &str,
    ) -> Option<super::AnimValue> {
        self.objects.get(&object_id)?.get_property(property_id)
    }

    // ========== 内部 ==========

    fn validate(&self, descriptor: &AnimationDescriptor) -> AnimResult<()> {
        let object = self
            .objects
            .get(&descriptor.target)
            .ok_or(AnimationError::ObjectNotRegistered(descriptor.target))?;

        if descriptor.values.is_empty() {
            return Err(AnimationError::NoProperties);
        }

        for values in &descriptor.values {
            let current = object.get_property(values.property).ok_or_else(|| {
                AnimationError::PropertyNotFound {
                    object: descriptor.target,
                    property: values.property.to_string(),
                }
            })?;

            for value in [values.from, values.to] {
                if value.kind() != current.kind() {
                    return Err(AnimationError::ValueKindMismatch {
                        property: values.property.to_string(),
                        expected: current.kind(),
                        found: value.kind(),
                    });
                }
            }
        }

        Ok(())
    }

    /// 已通过校验的描述：顶替冲突动画、写入起始值、加入运行表
    fn launch(&mut self, id: AnimationId, descriptor: AnimationDescriptor, set: Option<AnimationId>) {
        for values in &descriptor.values {
            let key = AnimPropertyKey::new(descriptor.target, values.property);
            let conflicts: Vec<AnimationId> = self
                .animations
                .iter()
                .filter(|(_, r)| r.touches(&key))
                .map(|(id, _)| *id)
                .collect();
            for conflict in conflicts {
                self.cancel(conflict);
            }
        }

        if let Some(object) = self.objects.get(&descriptor.target) {
            apply_values(object.as_ref(), &descriptor.values, 0.0);
        }

        let animation = Animation::from_descriptor(id, &descriptor);
        self.animations.insert(
            id,
            Running {
                object_id: descriptor.target,
                values: descriptor.values,
                animation,
                set,
            },
        );
    }
}

fn apply_values(object: &dyn Animatable, values: &[PropertyValues], fraction: f32) {
    for v in values {
        if let Some(value) = v.value_at(fraction) {
            object.set_property(v.property, value);
        }
    }
}
