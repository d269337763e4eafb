//! 认证模块
//!
//! 管理会话状态，与路由系统解耦：路由服务通过注入的认证/角色
//! 信号做守卫。令牌持久化在 [`SessionStore`]，此处只持有内存态。
//! 解码出的角色只决定界面渲染，权威授权始终在服务端。

use crate::api::SchedulerApi;
use crate::error::{ApiError, ApiResult};
use crate::session::SessionStore;
use leptos::prelude::*;
use roomsched_shared::Role;

/// 认证状态
#[derive(Clone, Default)]
pub struct AuthState {
    /// 当前会话令牌（仅内存副本，持久化在 SessionStore）
    pub token: Option<String>,
    /// 令牌中的角色声明（仅条件渲染用）
    pub role: Option<Role>,
    /// 是否正在从存储恢复会话
    pub is_loading: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: ReadSignal<AuthState>,
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState {
            is_loading: true,
            ..AuthState::default()
        });
        Self { state, set_state }
    }

    /// 认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_authenticated())
    }

    /// 管理员角色信号（用于路由服务注入与导航栏渲染）
    pub fn is_admin_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().is_admin())
    }

    /// 当前令牌的便捷读取（非响应式场景勿用）
    pub fn token(&self) -> Option<String> {
        self.state.get().token
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态：从 LocalStorage 恢复未过期的会话
pub fn init_auth(ctx: &AuthContext) {
    let token = SessionStore::get();
    let role = SessionStore::role();
    ctx.set_state.update(|state| {
        state.token = token;
        state.role = role;
        state.is_loading = false;
    });
}

/// 用返回的令牌建立会话（登录/注册共用）
fn establish_session(ctx: &AuthContext, token: String) {
    SessionStore::set(&token);
    let role = crate::session::decode_claims(&token).and_then(|c| c.role);
    ctx.set_state.update(|state| {
        state.token = Some(token);
        state.role = role;
        state.is_loading = false;
    });
}

/// 登录并保存会话
pub async fn login(
    ctx: &AuthContext,
    api: &SchedulerApi,
    email: String,
    password: String,
) -> ApiResult<()> {
    let response = api.login(email, password).await?;
    establish_session(ctx, response.token);
    Ok(())
}

/// 注册新账号；成功即自动登录
pub async fn register(
    ctx: &AuthContext,
    api: &SchedulerApi,
    name: String,
    email: String,
    password: String,
) -> ApiResult<()> {
    let response = api.register(name, email, password).await?;
    establish_session(ctx, response.token);
    Ok(())
}

/// 注销并清除状态
///
/// 导航由路由服务监听认证状态变化自动处理。
pub fn logout(ctx: &AuthContext) {
    SessionStore::clear();
    ctx.set_state.update(|state| {
        state.token = None;
        state.role = None;
    });
}

/// 认证类错误的统一善后：清会话，路由守卫随后会跳到登录页
///
/// 对任意 [`ApiError`] 调用均安全；非认证类错误原样返回 false。
pub fn handle_auth_failure(ctx: &AuthContext, err: &ApiError) -> bool {
    if err.is_auth() {
        logout(ctx);
        true
    } else {
        false
    }
}
