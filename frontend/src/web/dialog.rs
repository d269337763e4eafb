//! 浏览器原生对话框封装

/// 弹出模态确认框；窗口不可用时按"取消"处理
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}
