mod bookings_tab;
mod rooms_tab;
mod users_tab;

use crate::api::SchedulerApi;
use crate::auth::{handle_auth_failure, logout, use_auth};
use crate::error::ApiError;
use crate::state::LoadState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use roomsched_shared::{BookingSummary, Room, User};

use bookings_tab::BookingsTab;
use rooms_tab::RoomsTab;
use users_tab::UsersTab;

/// 管理面板的页签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AdminTab {
    Bookings,
    Rooms,
    Users,
}

/// 把一次列表加载的结果写入对应信号
///
/// 失败一律落入 Failed；认证类错误随后清会话，守卫整页跳登录。
fn settle<T>(
    auth_ctx: &crate::auth::AuthContext,
    set_state: WriteSignal<LoadState<T>>,
    result: Result<Vec<T>, ApiError>,
) where
    T: Send + Sync + 'static,
{
    let (next, err) = LoadState::settle(result);
    set_state.try_set(next);
    if let Some(err) = err {
        handle_auth_failure(auth_ctx, &err);
    }
}

/// 管理面板（需要 ADMIN 角色，由路由守卫拦截）
///
/// 挂载时并发拉取三份列表，全部落定后才离开加载态。
#[component]
pub fn AdminPage() -> impl IntoView {
    let api = expect_context::<SchedulerApi>();
    let auth_ctx = use_auth();

    let (tab, set_tab) = signal(AdminTab::Bookings);
    let (bookings, set_bookings) = signal(LoadState::<BookingSummary>::Idle);
    let (rooms, set_rooms) = signal(LoadState::<Room>::Idle);
    let (users, set_users) = signal(LoadState::<User>::Idle);

    let load_all = {
        let api = api.clone();
        move || {
            let api = api.clone();
            let Some(token) = auth_ctx.state.get_untracked().token else {
                return;
            };
            set_bookings.set(LoadState::Loading);
            set_rooms.set(LoadState::Loading);
            set_users.set(LoadState::Loading);

            spawn_local(async move {
                // 无序并发批量加载，等全部落定
                let (bookings_res, rooms_res, users_res) = futures::join!(
                    api.list_bookings(&token),
                    api.list_rooms(),
                    api.list_users(&token),
                );

                settle(&auth_ctx, set_bookings, bookings_res);
                settle(&auth_ctx, set_rooms, rooms_res);
                settle(&auth_ctx, set_users, users_res);
            });
        }
    };

    Effect::new({
        let load_all = load_all.clone();
        move |_| load_all()
    });

    let is_loading = move || {
        bookings.with(|s| s.is_loading())
            || rooms.with(|s| s.is_loading())
            || users.with(|s| s.is_loading())
    };

    let on_logout = move |_| logout(&auth_ctx);

    let tab_class = move |this: AdminTab| {
        move || {
            if tab.get() == this {
                "tab tab-active"
            } else {
                "tab"
            }
        }
    };

    view! {
        <main class="min-h-screen bg-base-200 p-4 md:p-8">
            <div class="max-w-6xl mx-auto space-y-6">
                <div class="flex items-center justify-between">
                    <h1 class="text-3xl font-bold">"管理面板"</h1>
                    <div class="flex items-center gap-2">
                        <button
                            class="btn btn-ghost btn-sm"
                            disabled=is_loading
                            on:click={
                                let load_all = load_all.clone();
                                move |_| load_all()
                            }
                        >
                            "刷新"
                        </button>
                        <button class="btn btn-outline btn-error btn-sm" on:click=on_logout>
                            "退出"
                        </button>
                    </div>
                </div>

                <div role="tablist" class="tabs tabs-boxed bg-base-100 w-fit">
                    <a role="tab" class=tab_class(AdminTab::Bookings) on:click=move |_| set_tab.set(AdminTab::Bookings)>
                        "预订"
                    </a>
                    <a role="tab" class=tab_class(AdminTab::Rooms) on:click=move |_| set_tab.set(AdminTab::Rooms)>
                        "会议室"
                    </a>
                    <a role="tab" class=tab_class(AdminTab::Users) on:click=move |_| set_tab.set(AdminTab::Users)>
                        "用户"
                    </a>
                </div>

                <Show
                    when=move || !is_loading()
                    fallback=|| view! {
                        <div class="text-center py-16">
                            <span class="loading loading-spinner loading-lg text-primary"></span>
                            <p class="text-base-content/60 mt-4">"加载面板中..."</p>
                        </div>
                    }
                >
                    {move || match tab.get() {
                        AdminTab::Bookings => view! { <BookingsTab bookings=bookings /> }.into_any(),
                        AdminTab::Rooms => view! { <RoomsTab rooms=rooms set_rooms=set_rooms /> }.into_any(),
                        AdminTab::Users => view! { <UsersTab users=users set_users=set_users /> }.into_any(),
                    }}
                </Show>
            </div>
        </main>
    }
}
