//! 错误分类模块
//!
//! 将远端 API 的非 2xx 响应归类为固定的几种语义，控制器只在
//! 一个决策点上消费它们：Auth 类错误清除会话并跳转登录，其余
//! 以内联提示展示。所有分类逻辑都是纯函数，可在宿主上测试。

use std::fmt;

/// API 调用失败的分类结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 401/403：会话失效或权限不足，调用方必须清除会话并跳转登录
    Auth(String),
    /// 400/422 等业务校验失败，作为表单内联提示展示
    Validation(String),
    /// 409：资源冲突（如预订时段重叠）
    Conflict(String),
    /// 404：资源不存在
    NotFound(String),
    /// 服务端取消策略拒绝（仅由取消预订操作映射产生）
    Policy(String),
    /// 网络层失败：无响应或超时。不自动重试
    Connectivity(String),
    /// 其它未归类状态（5xx 等）
    Unexpected(u16, String),
}

impl ApiError {
    /// 是否属于认证类错误（需要清会话 + 跳转登录）
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }

    /// 按 HTTP 状态码与响应体归类
    pub fn classify(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        let or_default = |fallback: &str| message.clone().unwrap_or_else(|| fallback.to_string());

        match status {
            401 | 403 => ApiError::Auth(or_default("会话已过期或没有权限。")),
            404 => ApiError::NotFound(or_default("资源不存在。")),
            409 => ApiError::Conflict(or_default("该时段与已有预订冲突。")),
            400..=499 => ApiError::Validation(or_default("请求内容无效。")),
            _ => ApiError::Unexpected(status, or_default("服务器发生未知错误。")),
        }
    }

    /// 把校验/冲突类错误重映射为取消策略拒绝
    ///
    /// 客户端的 24 小时判断只是参考，服务端仍可能因时钟偏差或
    /// 规则不同而拒绝；该拒绝按策略错误展示，不视为程序缺陷。
    pub fn into_policy(self) -> Self {
        match self {
            ApiError::Validation(msg) | ApiError::Conflict(msg) => ApiError::Policy(msg),
            other => other,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Auth(msg) => write!(f, "{}", msg),
            ApiError::Validation(msg) => write!(f, "{}", msg),
            ApiError::Conflict(msg) => write!(f, "{}", msg),
            ApiError::NotFound(msg) => write!(f, "{}", msg),
            ApiError::Policy(msg) => write!(f, "无法取消: {}", msg),
            ApiError::Connectivity(msg) => write!(f, "连接失败: {}", msg),
            ApiError::Unexpected(status, msg) => write!(f, "请求失败 ({}): {}", status, msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        ApiError::Connectivity(e.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// 从响应体中提取人类可读的错误消息
///
/// 依次尝试：对象的 `error` 字段 -> 字符串响应体 ->
/// 对象里的第一个字符串值。都不匹配时返回 `None`，
/// 由调用方落回通用提示。
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;

    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s),
        serde_json::Value::Object(map) => {
            if let Some(serde_json::Value::String(s)) = map.get("error") {
                return Some(s.clone());
            }
            map.values().find_map(|v| match v {
                serde_json::Value::String(s) => Some(s.clone()),
                _ => None,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_classify_as_auth() {
        assert!(ApiError::classify(401, "").is_auth());
        assert!(ApiError::classify(403, "{}").is_auth());
    }

    #[test]
    fn auth_error_carries_an_inline_notice() {
        // 公开页面不会被守卫带走，这段文案就是用户唯一的反馈
        assert_eq!(
            ApiError::classify(401, "").to_string(),
            "会话已过期或没有权限。"
        );
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(ApiError::classify(404, ""), ApiError::NotFound(_)));
        assert!(matches!(ApiError::classify(409, ""), ApiError::Conflict(_)));
        assert!(matches!(
            ApiError::classify(400, ""),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::classify(422, ""),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::classify(500, ""),
            ApiError::Unexpected(500, _)
        ));
    }

    #[test]
    fn message_comes_from_error_field() {
        let err = ApiError::classify(409, r#"{"error":"Horário indisponível"}"#);
        assert_eq!(err, ApiError::Conflict("Horário indisponível".to_string()));
    }

    #[test]
    fn message_falls_back_to_first_string_value() {
        let msg = extract_message(r#"{"startAt":"must be in the future"}"#);
        assert_eq!(msg, Some("must be in the future".to_string()));
    }

    #[test]
    fn string_body_is_taken_verbatim() {
        assert_eq!(
            extract_message(r#""room is gone""#),
            Some("room is gone".to_string())
        );
    }

    #[test]
    fn garbage_body_yields_generic_fallback() {
        let err = ApiError::classify(400, "<html>oops</html>");
        assert_eq!(err, ApiError::Validation("请求内容无效。".to_string()));
    }

    #[test]
    fn cancel_rejection_becomes_policy() {
        let err = ApiError::classify(400, r#"{"error":"inside the 24h window"}"#).into_policy();
        assert!(matches!(err, ApiError::Policy(_)));

        // Auth 错误不得被重映射，仍需触发会话清理
        assert!(ApiError::classify(401, "").into_policy().is_auth());
    }
}
