//! # View 模块
//!
//! 展示界面上的视图模型：星星、容器、按钮。
//!
//! 视图只保存状态，动画系统通过 `Animatable` 写入属性，
//! 宿主层每帧读取快照进行绘制。

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use crate::animation::{AnimValue, Animatable, Argb, ObjectId};
use crate::error::UnknownButton;

/// 视图属性名
pub mod props {
    /// 旋转角度（度）
    pub const ROTATION: &str = "rotation";
    /// 水平位移
    pub const TRANSLATION_X: &str = "translation_x";
    /// 垂直位移
    pub const TRANSLATION_Y: &str = "translation_y";
    /// 水平缩放
    pub const SCALE_X: &str = "scale_x";
    /// 垂直缩放
    pub const SCALE_Y: &str = "scale_y";
    /// 透明度 (0.0 - 1.0)
    pub const ALPHA: &str = "alpha";
    /// 背景色（容器）
    pub const BACKGROUND_COLOR: &str = "background_color";
}

/// 星星视图的数据
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewData {
    /// 固有宽度（未缩放）
    pub width: f32,
    /// 固有高度（未缩放）
    pub height: f32,
    pub rotation: f32,
    pub translation_x: f32,
    pub translation_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub alpha: f32,
}

impl ViewData {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            rotation: 0.0,
            translation_x: 0.0,
            translation_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            alpha: 1.0,
        }
    }
}

/// 星星视图
///
/// 既用于界面中央的固定星星，也用于"流星雨"中的临时粒子。
/// 克隆得到的是同一视图的另一个句柄。
#[derive(Debug, Clone)]
pub struct StarView {
    data: Rc<RefCell<ViewData>>,
}

impl StarView {
    /// 支持的属性列表
    pub const PROPERTIES: &'static [&'static str] = &[
        props::ROTATION,
        props::TRANSLATION_X,
        props::TRANSLATION_Y,
        props::SCALE_X,
        props::SCALE_Y,
        props::ALPHA,
    ];

    pub fn new(width: f32, height: f32) -> Self {
        Self::from_data(ViewData::new(width, height))
    }

    pub fn from_data(data: ViewData) -> Self {
        Self {
            data: Rc::new(RefCell::new(data)),
        }
    }

    /// 当前状态快照
    pub fn snapshot(&self) -> ViewData {
        *self.data.borrow()
    }

    pub fn width(&self) -> f32 {
        self.data.borrow().width
    }

    pub fn height(&self) -> f32 {
        self.data.borrow().height
    }

    /// 设置固有尺寸（布局变化时调用）
    pub fn set_size(&self, width: f32, height: f32) {
        let mut data = self.data.borrow_mut();
        data.width = width;
        data.height = height;
    }

    /// 等比缩放
    pub fn set_scale(&self, scale: f32) {
        let mut data = self.data.borrow_mut();
        data.scale_x = scale;
        data.scale_y = scale;
    }

    pub fn set_translation_x(&self, x: f32) {
        self.data.borrow_mut().translation_x = x;
    }

    /// 是否为同一视图
    pub fn ptr_eq(&self, other: &StarView) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }
}

impl Animatable for StarView {
    fn get_property(&self, property_id: &str) -> Option<AnimValue> {
        let data = self.data.borrow();
        let value = match property_id {
            props::ROTATION => data.rotation,
            props::TRANSLATION_X => data.translation_x,
            props::TRANSLATION_Y => data.translation_y,
            props::SCALE_X => data.scale_x,
            props::SCALE_Y => data.scale_y,
            props::ALPHA => data.alpha,
            _ => return None,
        };
        Some(AnimValue::Float(value))
    }

    fn set_property(&self, property_id: &str, value: AnimValue) -> bool {
        let Some(value) = value.as_float() else {
            return false;
        };
        let mut data = self.data.borrow_mut();
        let slot = match property_id {
            props::ROTATION => &mut data.rotation,
            props::TRANSLATION_X => &mut data.translation_x,
            props::TRANSLATION_Y => &mut data.translation_y,
            props::SCALE_X => &mut data.scale_x,
            props::SCALE_Y => &mut data.scale_y,
            props::ALPHA => &mut data.alpha,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn property_list(&self) -> &'static [&'static str] {
        Self::PROPERTIES
    }
}

/// 容器数据
#[derive(Debug, Clone)]
struct ContainerData {
    width: f32,
    height: f32,
    background: Argb,
    children: Vec<(ObjectId, StarView)>,
}

/// 星星所在的父容器
///
/// 拥有背景色（可动画）和临时粒子列表。
#[derive(Debug, Clone)]
pub struct ContainerView {
    data: Rc<RefCell<ContainerData>>,
}

impl ContainerView {
    pub const PROPERTIES: &'static [&'static str] = &[props::BACKGROUND_COLOR];

    pub fn new(width: f32, height: f32, background: Argb) -> Self {
        Self {
            data: Rc::new(RefCell::new(ContainerData {
                width,
                height,
                background,
                children: Vec::new(),
            })),
        }
    }

    pub fn width(&self) -> f32 {
        self.data.borrow().width
    }

    pub fn height(&self) -> f32 {
        self.data.borrow().height
    }

    /// 布局尺寸变化
    pub fn set_size(&self, width: f32, height: f32) {
        let mut data = self.data.borrow_mut();
        data.width = width;
        data.height = height;
    }

    pub fn background(&self) -> Argb {
        self.data.borrow().background
    }

    /// 追加子视图（绘制在最上层）
    pub fn add_child(&self, id: ObjectId, view: StarView) {
        self.data.borrow_mut().children.push((id, view));
    }

    /// 移除子视图
    ///
    /// # 返回
    /// 该子视图是否存在
    pub fn remove_child(&self, id: ObjectId) -> bool {
        let mut data = self.data.borrow_mut();
        let before = data.children.len();
        data.children.retain(|(child, _)| *child != id);
        data.children.len() != before
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.data.borrow().children.iter().any(|(child, _)| *child == id)
    }

    pub fn child_count(&self) -> usize {
        self.data.borrow().children.len()
    }

    /// 子视图快照（按添加顺序）
    pub fn children(&self) -> Vec<(ObjectId, ViewData)> {
        self.data
            .borrow()
            .children
            .iter()
            .map(|(id, view)| (*id, view.snapshot()))
            .collect()
    }
}

impl Animatable for ContainerView {
    fn get_property(&self, property_id: &str) -> Option<AnimValue> {
        match property_id {
            props::BACKGROUND_COLOR => Some(AnimValue::Color(self.data.borrow().background)),
            _ => None,
        }
    }

    fn set_property(&self, property_id: &str, value: AnimValue) -> bool {
        match (property_id, value) {
            (props::BACKGROUND_COLOR, AnimValue::Color(c)) => {
                self.data.borrow_mut().background = c;
                true
            }
            _ => false,
        }
    }

    fn property_list(&self) -> &'static [&'static str] {
        Self::PROPERTIES
    }
}

/// 界面上的六个按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ButtonId {
    Rotate,
    Translate,
    Scale,
    Fade,
    Colorize,
    Shower,
}

impl ButtonId {
    /// 按界面顺序排列
    pub const ALL: [ButtonId; 6] = [
        ButtonId::Rotate,
        ButtonId::Translate,
        ButtonId::Scale,
        ButtonId::Fade,
        ButtonId::Colorize,
        ButtonId::Shower,
    ];

    /// 按钮文字
    pub fn label(&self) -> &'static str {
        match self {
            ButtonId::Rotate => "Rotate",
            ButtonId::Translate => "Translate",
            ButtonId::Scale => "Scale",
            ButtonId::Fade => "Fade",
            ButtonId::Colorize => "Colorize",
            ButtonId::Shower => "Shower",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for ButtonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ButtonId {
    type Err = UnknownButton;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ButtonId::ALL
            .into_iter()
            .find(|b| b.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownButton(s.to_string()))
    }
}

/// 按钮可用状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonStates {
    enabled: [bool; 6],
}

impl Default for ButtonStates {
    fn default() -> Self {
        Self { enabled: [true; 6] }
    }
}

impl ButtonStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self, button: ButtonId) -> bool {
        self.enabled[button.index()]
    }

    pub fn set_enabled(&mut self, button: ButtonId, enabled: bool) {
        self.enabled[button.index()] = enabled;
    }
}
