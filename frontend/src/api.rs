//! API 客户端模块
//!
//! 对远端调度 API 的全部调用都经过唯一的泛型 `send` 路径：
//! 按 [`ApiEndpoint`] 的元数据构建请求、附加 bearer 令牌、
//! 套上显式超时，再把响应解码为负载或归类为 [`ApiError`]。
//! 客户端从不自动重试，每个失败都交还调用方做一次用户级决策。

use crate::error::{ApiError, ApiResult};
use futures::future::Either;
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use roomsched_shared::protocol::{
    ApiEndpoint, CancelBookingRequest, CreateBookingRequest, CreateRoomRequest, DeleteRoomRequest,
    DeleteUserRequest, HttpMethod, ListBookingsRequest, ListMyBookingsRequest, ListRoomsRequest,
    ListUsersRequest, LoginRequest, RegisterRequest, SetUserRoleRequest, UpdateRoomRequest,
};
use roomsched_shared::{BookingSummary, HEADER_AUTHORIZATION, Role, Room, TokenResponse, User};
use serde::de::DeserializeOwned;
use std::future::Future;

/// 单次请求的超时（毫秒）。超时按网络失败上报，不重试。
const REQUEST_TIMEOUT_MS: u32 = 10_000;

/// 把状态码与响应体文本解码为负载或分类错误（纯函数）
fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<T> {
    if !(200..300).contains(&status) {
        return Err(ApiError::classify(status, body));
    }

    // 204 等空响应体按 JSON null 处理，配合 `()` 响应类型
    let raw = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(raw)
        .map_err(|e| ApiError::Unexpected(status, format!("响应解析失败: {}", e)))
}

/// 给底层 fetch 套上显式超时
async fn with_timeout<F>(fut: F) -> ApiResult<Response>
where
    F: Future<Output = Result<Response, gloo_net::Error>>,
{
    let timeout = TimeoutFuture::new(REQUEST_TIMEOUT_MS);
    futures::pin_mut!(fut);
    futures::pin_mut!(timeout);

    match futures::future::select(fut, timeout).await {
        Either::Left((result, _)) => result.map_err(ApiError::from),
        Either::Right(((), _)) => Err(ApiError::Connectivity("请求超时".to_string())),
    }
}

/// 调度 API 客户端
#[derive(Clone, Debug, PartialEq)]
pub struct SchedulerApi {
    pub base_url: String,
}

impl SchedulerApi {
    pub fn new(base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 唯一的发送路径：构建 -> 附加令牌 -> 超时 -> 解码/分类
    async fn send<E: ApiEndpoint>(&self, req: &E, token: Option<&str>) -> ApiResult<E::Response> {
        let url = self.url(&req.path());

        // 漏传令牌的调用会以 401 告终，这里提前留一条线索
        if E::REQUIRES_AUTH && token.is_none() {
            web_sys::console::warn_1(
                &format!("[Api] {} {} 需要令牌但未提供", E::METHOD.as_str(), url).into(),
            );
        }

        let mut builder: RequestBuilder = match E::METHOD {
            HttpMethod::Get => Request::get(&url),
            HttpMethod::Post => Request::post(&url),
            HttpMethod::Put => Request::put(&url),
            HttpMethod::Delete => Request::delete(&url),
            HttpMethod::Patch => Request::patch(&url),
        };

        if let Some(token) = token {
            builder = builder.header(HEADER_AUTHORIZATION, &format!("Bearer {}", token));
        }

        let response = if E::METHOD.has_body() {
            let request = builder
                .header("Content-Type", "application/json")
                .json(req)?;
            with_timeout(request.send()).await?
        } else {
            with_timeout(builder.send()).await?
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        decode_body::<E::Response>(status, &body).inspect_err(|err| {
            web_sys::console::warn_1(
                &format!("[Api] {} {} -> {} ({})", E::METHOD.as_str(), url, status, err).into(),
            );
        })
    }

    // --- Auth ---

    pub async fn login(&self, email: String, password: String) -> ApiResult<TokenResponse> {
        self.send(&LoginRequest { email, password }, None).await
    }

    /// 注册普通用户并返回令牌（自动登录）
    pub async fn register(
        &self,
        name: String,
        email: String,
        password: String,
    ) -> ApiResult<TokenResponse> {
        let req = RegisterRequest {
            name,
            email,
            password,
            role: Role::User,
        };
        self.send(&req, None).await
    }

    // --- Rooms ---

    pub async fn list_rooms(&self) -> ApiResult<Vec<Room>> {
        self.send(&ListRoomsRequest, None).await
    }

    pub async fn create_room(&self, name: String, capacity: i32, token: &str) -> ApiResult<Room> {
        self.send(&CreateRoomRequest { name, capacity }, Some(token))
            .await
    }

    pub async fn update_room(
        &self,
        id: i64,
        name: String,
        capacity: i32,
        token: &str,
    ) -> ApiResult<Room> {
        self.send(&UpdateRoomRequest { id, name, capacity }, Some(token))
            .await
    }

    pub async fn delete_room(&self, id: i64, token: &str) -> ApiResult<()> {
        self.send(&DeleteRoomRequest { id }, Some(token)).await
    }

    // --- Bookings ---

    /// 全量预订列表（管理员范围）
    pub async fn list_bookings(&self, token: &str) -> ApiResult<Vec<BookingSummary>> {
        self.send(&ListBookingsRequest, Some(token)).await
    }

    /// 调用者自己的预订
    pub async fn list_my_bookings(&self, token: &str) -> ApiResult<Vec<BookingSummary>> {
        self.send(&ListMyBookingsRequest, Some(token)).await
    }

    pub async fn create_booking(
        &self,
        req: CreateBookingRequest,
        token: Option<&str>,
    ) -> ApiResult<BookingSummary> {
        self.send(&req, token).await
    }

    /// 取消预订；服务端的策略拒绝以 Policy 错误呈现
    pub async fn cancel_booking(&self, id: i64, token: &str) -> ApiResult<()> {
        self.send(&CancelBookingRequest { id }, Some(token))
            .await
            .map_err(ApiError::into_policy)
    }

    // --- Users (admin) ---

    pub async fn list_users(&self, token: &str) -> ApiResult<Vec<User>> {
        self.send(&ListUsersRequest, Some(token)).await
    }

    pub async fn delete_user(&self, id: i64, token: &str) -> ApiResult<()> {
        self.send(&DeleteUserRequest { id }, Some(token)).await
    }

    pub async fn set_user_role(&self, id: i64, role: Role, token: &str) -> ApiResult<User> {
        self.send(&SetUserRoleRequest { id, role }, Some(token))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_decodes_into_payload() {
        let room: Room = decode_body(200, r#"{"id":1,"name":"Alfa","capacity":8}"#).unwrap();
        assert_eq!(room.id, 1);
        assert_eq!(room.capacity, 8);
    }

    #[test]
    fn empty_204_body_decodes_as_unit() {
        let out: ApiResult<()> = decode_body(204, "");
        assert!(out.is_ok());
    }

    #[test]
    fn non_2xx_is_classified() {
        let out: ApiResult<Vec<Room>> = decode_body(403, "");
        assert!(matches!(out, Err(ApiError::Auth(_))));
    }

    #[test]
    fn corrupt_success_body_is_reported_with_status() {
        let out: ApiResult<Room> = decode_body(200, "not json");
        assert!(matches!(out, Err(ApiError::Unexpected(200, _))));
    }
}
