use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod policy;
pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// Bearer 认证头名称
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 用户角色
///
/// 仅用于前端的条件渲染（显示/隐藏管理入口），
/// 真正的授权判断始终由后端完成。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// 会议室
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    pub name: String,
    pub capacity: i32,
}

/// 预订摘要（只读投影，权威实体在服务端）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub id: i64,
    pub room_name: String,
    pub user_name: String,
    pub user_email: String,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
}

/// 用户
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// 登录/注册成功后返回的会话令牌
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_summary_uses_camel_case_wire_names() {
        let json = r#"{
            "id": 7,
            "roomName": "Sala Alfa",
            "userName": "Ana",
            "userEmail": "ana@example.com",
            "startAt": "2025-01-10T10:00:00",
            "endAt": "2025-01-10T11:00:00"
        }"#;

        let booking: BookingSummary = serde_json::from_str(json).unwrap();
        assert_eq!(booking.id, 7);
        assert_eq!(booking.room_name, "Sala Alfa");
        assert_eq!(booking.user_email, "ana@example.com");
        assert!(booking.start_at < booking.end_at);
    }

    #[test]
    fn role_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        assert_eq!(
            serde_json::from_str::<Role>("\"USER\"").unwrap(),
            Role::User
        );
    }
}
