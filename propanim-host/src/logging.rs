//! 日志初始化

use tracing::Level;

/// 安装全局 tracing 订阅者
///
/// debug build 或 `verbose` 时输出 debug 级别，否则 info。
/// 重复调用时保留第一次安装的订阅者。
pub fn init(verbose: bool) {
    let level = if verbose || cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
