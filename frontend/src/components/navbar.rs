use crate::auth::{logout, use_auth};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use leptos::prelude::*;

/// 顶部导航栏
///
/// 链接按会话状态条件渲染：管理入口只对 ADMIN 角色显示
/// （仅渲染层面的判断，服务端仍会校验权限）。
/// 登录/注册页不显示导航栏。
#[component]
pub fn Navbar() -> impl IntoView {
    let auth_ctx = use_auth();
    let router = use_router();

    let is_authenticated = auth_ctx.is_authenticated_signal();
    let is_admin = auth_ctx.is_admin_signal();

    let nav_to = move |route: AppRoute| {
        move |ev: leptos::web_sys::MouseEvent| {
            ev.prevent_default();
            router.navigate(route);
        }
    };

    let on_logout = move |_| {
        logout(&auth_ctx);
        // 跳转由路由服务的认证状态监听处理
    };

    let hidden = move || {
        matches!(
            router.current_route().get(),
            AppRoute::Login | AppRoute::Register
        )
    };

    view! {
        <Show when=move || !hidden()>
            <nav class="navbar bg-base-100 border-b border-base-200 sticky top-0 z-40 shadow-sm px-6">
                <div class="flex-1">
                    <a href="/" on:click=nav_to(AppRoute::Home) class="text-xl font-bold text-primary">
                        "RoomScheduler"
                    </a>
                </div>
                <div class="flex-none gap-3">
                    <Show
                        when=move || is_authenticated.get()
                        fallback=move || view! {
                            <a href="/login" on:click=nav_to(AppRoute::Login) class="btn btn-ghost btn-sm">
                                "登录"
                            </a>
                            <a href="/register" on:click=nav_to(AppRoute::Register) class="btn btn-primary btn-sm">
                                "注册账号"
                            </a>
                        }
                    >
                        <a href="/my-bookings" on:click=nav_to(AppRoute::MyBookings) class="btn btn-ghost btn-sm">
                            "我的预订"
                        </a>
                        <Show when=move || is_admin.get()>
                            <a href="/admin" on:click=nav_to(AppRoute::Admin) class="btn btn-ghost btn-sm">
                                "管理面板"
                            </a>
                        </Show>
                        <button on:click=on_logout class="btn btn-outline btn-error btn-sm">
                            "退出"
                        </button>
                    </Show>
                </div>
            </nav>
        </Show>
    }
}
