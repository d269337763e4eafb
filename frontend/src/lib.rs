//! RoomScheduler 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route` / `web::router`: 路由定义与守卫引擎
//! - `session` / `auth`: 会话持久化与认证状态管理
//! - `api` / `error`: 远端调度 API 客户端与错误分类
//! - `state`: 列表页状态机与按身份合并
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod admin;
    mod booking_form;
    pub mod home;
    pub mod login;
    pub mod my_bookings;
    pub mod navbar;
    pub mod register;
}
mod config;
mod error;
mod session;
mod state;

use crate::auth::{AuthContext, init_auth};
use crate::components::admin::AdminPage;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::my_bookings::MyBookingsPage;
use crate::components::navbar::Navbar;
use crate::components::register::RegisterPage;

use leptos::prelude::*;

// 原生 Web API 封装模块
pub(crate) mod web {
    mod dialog;
    pub mod route;
    pub mod router;
    mod storage;

    pub use dialog::confirm;
    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::MyBookings => view! { <MyBookingsPage /> }.into_any(),
        AppRoute::Admin => view! { <AdminPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"页面未找到"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文并从 LocalStorage 恢复会话
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(&auth_ctx);

    // 2. API 客户端：基地址来自构建期配置
    provide_context(api::SchedulerApi::new(config::api_base_url()));

    // 3. 认证/角色信号注入路由服务（解耦）
    let is_authenticated = auth_ctx.is_authenticated_signal();
    let is_admin = auth_ctx.is_admin_signal();

    view! {
        <Router is_authenticated=is_authenticated is_admin=is_admin>
            <Navbar />
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
