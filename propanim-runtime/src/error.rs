//! # Error 模块
//!
//! 定义 propanim-runtime 中使用的错误类型。

use thiserror::Error;

use crate::animation::{ObjectId, ValueKind};

/// 动画系统错误
///
/// 只有宿主层的使用错误（对象未注册、属性名拼错等）会产生这些错误，
/// 展示逻辑本身的输入都是常量或随机数，不会失败。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnimationError {
    /// 对象未注册（或已被注销）
    #[error("对象 {0} 未注册")]
    ObjectNotRegistered(ObjectId),

    /// 对象上不存在该属性
    #[error("对象 {object} 上不存在属性 '{property}'")]
    PropertyNotFound { object: ObjectId, property: String },

    /// 起止值或当前值类型不一致
    #[error("属性 '{property}' 需要 {expected} 值，实际为 {found}")]
    ValueKindMismatch {
        property: String,
        expected: ValueKind,
        found: ValueKind,
    },

    /// 描述中没有任何属性
    #[error("动画描述没有任何属性")]
    NoProperties,

    /// 动画组中没有任何子动画
    #[error("动画组为空")]
    EmptySet,
}

/// 按钮名称解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("未知按钮 '{0}'（可选：rotate, translate, scale, fade, colorize, shower）")]
pub struct UnknownButton(pub String);

/// Result 别名
pub type AnimResult<T> = Result<T, AnimationError>;
