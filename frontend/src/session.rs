//! 会话存储模块
//!
//! 负责 bearer 令牌在 LocalStorage 中的读写。令牌带固定两小时
//! 寿命，过期后懒清除。角色声明从 JWT payload 中解码，**不验证
//! 签名** —— 验证是服务端的职责，这里的角色只用于条件渲染。

use crate::web::LocalStorage;
use base64::Engine;
use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use chrono::Utc;
use roomsched_shared::Role;
use serde::{Deserialize, Serialize};

/// LocalStorage 键名
const STORAGE_SESSION_KEY: &str = "roomsched_session";

/// 会话令牌寿命（毫秒）：约两小时，与服务端令牌寿命一致
const TOKEN_TTL_MS: i64 = 2 * 60 * 60 * 1000;

/// 持久化的会话条目
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    /// 过期时刻（Unix 毫秒）
    expires_at: i64,
}

/// 从令牌 payload 解码出的声明（仅 UI 关心的子集）
#[derive(Debug, Clone, PartialEq)]
pub struct TokenClaims {
    pub role: Option<Role>,
    pub exp: Option<i64>,
}

/// 解码 JWT payload 中的 role / exp 声明
///
/// 任何一步失败（分段数不对、base64 损坏、非 JSON）都软失败
/// 返回 `None`；无法识别的 role 值只让 role 缺席，不影响 exp。
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let payload = token.split('.').nth(1)?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .or_else(|_| URL_SAFE.decode(payload))
        .ok()?;
    let json: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    let map = json.as_object()?;

    let role = map.get("role").and_then(|v| v.as_str()).and_then(|s| match s {
        "ADMIN" => Some(Role::Admin),
        "USER" => Some(Role::User),
        _ => None,
    });
    let exp = map.get("exp").and_then(|v| v.as_i64());

    Some(TokenClaims { role, exp })
}

/// 会话存储操作封装
pub struct SessionStore;

impl SessionStore {
    /// 读取当前令牌；已过期的条目当场清除并返回 `None`
    pub fn get() -> Option<String> {
        Self::get_at(Utc::now().timestamp_millis())
    }

    /// 以注入的当前时刻读取令牌（便于测试过期逻辑）
    pub fn get_at(now_ms: i64) -> Option<String> {
        let stored: StoredSession = LocalStorage::get_json(STORAGE_SESSION_KEY)?;
        if stored.expires_at <= now_ms {
            Self::clear();
            return None;
        }
        Some(stored.token)
    }

    /// 持久化令牌，寿命固定两小时
    pub fn set(token: &str) {
        let stored = StoredSession {
            token: token.to_string(),
            expires_at: Utc::now().timestamp_millis() + TOKEN_TTL_MS,
        };
        LocalStorage::set_json(STORAGE_SESSION_KEY, &stored);
    }

    /// 清除会话（幂等）
    pub fn clear() {
        LocalStorage::delete(STORAGE_SESSION_KEY);
    }

    /// 当前令牌的角色声明；无会话或令牌损坏时为 `None`
    pub fn role() -> Option<Role> {
        let token = Self::get()?;
        decode_claims(&token)?.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_token(payload_json: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload_json.as_bytes());
        format!("{}.{}.signature", header, payload)
    }

    #[test]
    fn decodes_role_and_exp() {
        let token = fake_token(r#"{"sub":"ana@example.com","role":"ADMIN","exp":1736503200}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.role, Some(Role::Admin));
        assert_eq!(claims.exp, Some(1736503200));
    }

    #[test]
    fn user_role_decodes() {
        let token = fake_token(r#"{"role":"USER"}"#);
        assert_eq!(decode_claims(&token).unwrap().role, Some(Role::User));
    }

    #[test]
    fn unknown_role_value_fails_soft_to_absent() {
        let token = fake_token(r#"{"role":"ROLE_SUPERVISOR","exp":42}"#);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.role, None);
        assert_eq!(claims.exp, Some(42));
    }

    #[test]
    fn malformed_tokens_fail_soft() {
        assert_eq!(decode_claims("not-a-jwt"), None);
        assert_eq!(decode_claims("a.%%%%.c"), None);
        assert_eq!(decode_claims(&format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"[1,2]"))), None);
    }
}
