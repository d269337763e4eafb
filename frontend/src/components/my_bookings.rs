use crate::api::SchedulerApi;
use crate::auth::{handle_auth_failure, use_auth};
use crate::state::LoadState;
use crate::web::confirm;
use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use roomsched_shared::BookingSummary;
use roomsched_shared::policy::{CANCEL_NOTICE_HOURS, is_cancellable};

/// 我的预订页（需要认证）
///
/// 取消按钮由 24 小时规则门控；该判断仅是参考，服务端仍可能
/// 拒绝取消，此时按策略错误内联提示，不动本地列表。
#[component]
pub fn MyBookingsPage() -> impl IntoView {
    let api = expect_context::<SchedulerApi>();
    let auth_ctx = use_auth();

    let (bookings, set_bookings) = signal(LoadState::<BookingSummary>::Idle);
    // (消息内容, 是否成功)
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    let load_bookings = {
        let api = api.clone();
        move || {
            let api = api.clone();
            let Some(token) = auth_ctx.state.get_untracked().token else {
                return;
            };
            set_bookings.set(LoadState::Loading);
            spawn_local(async move {
                // 认证类失败也先落入 Failed，再清会话交给守卫跳转
                let (next, err) = LoadState::settle(api.list_my_bookings(&token).await);
                set_bookings.try_set(next);
                if let Some(err) = err {
                    handle_auth_failure(&auth_ctx, &err);
                }
            });
        }
    };

    Effect::new({
        let load_bookings = load_bookings.clone();
        move |_| load_bookings()
    });

    let handle_cancel = move |id: i64| {
        if !confirm("确定要取消这个预订吗？") {
            return;
        }
        set_notification.set(None);

        let api = api.clone();
        let Some(token) = auth_ctx.state.get_untracked().token else {
            return;
        };
        spawn_local(async move {
            match api.cancel_booking(id, &token).await {
                Ok(()) => {
                    set_bookings.try_update(|state| state.remove(id));
                    set_notification.try_set(Some(("预订已取消。".to_string(), true)));
                }
                Err(err) => {
                    // 404 说明预订在服务端已不存在，剔除陈旧条目
                    set_bookings.try_update(|state| state.purge_if_stale(id, &err));
                    if !handle_auth_failure(&auth_ctx, &err) {
                        set_notification.try_set(Some((err.to_string(), false)));
                    }
                }
            }
        });
    };

    let format_at = |at: chrono::NaiveDateTime| at.format("%d/%m/%y %H:%M").to_string();

    view! {
        <main class="min-h-screen bg-base-200 py-10 px-4">
            <div class="max-w-4xl mx-auto space-y-4">
                <h1 class="text-3xl font-bold">"我的预订"</h1>
                <p class="text-base-content/60">"管理你的未来预约。"</p>

                <div role="alert" class="alert alert-info text-sm">
                    <span>
                        {format!(
                            "取消政策：预订开始前 {} 小时内不可取消。",
                            CANCEL_NOTICE_HOURS
                        )}
                    </span>
                </div>

                <Show when=move || notification.get().is_some()>
                    <div class=move || {
                        let ok = notification.get().map(|(_, ok)| ok).unwrap_or(false);
                        if ok { "alert alert-success" } else { "alert alert-error" }
                    }>
                        <span>{move || notification.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show when=move || bookings.with(|s| matches!(s, LoadState::Failed(_)))>
                    <div role="alert" class="alert alert-error">
                        <span>
                            {move || bookings.with(|s| match s {
                                LoadState::Failed(msg) => msg.clone(),
                                _ => String::new(),
                            })}
                        </span>
                    </div>
                </Show>

                <Show when=move || bookings.with(|s| s.is_loading())>
                    <div class="text-center py-16">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                </Show>

                <Show when=move || bookings.with(|s| matches!(s, LoadState::Ready(list) if list.is_empty()))>
                    <div class="card bg-base-100 shadow">
                        <div class="card-body text-center text-base-content/60">
                            "你还没有任何预订。"
                        </div>
                    </div>
                </Show>

                <For
                    each=move || bookings.with(|s| s.items().to_vec())
                    key=|booking| booking.id
                    children=move |booking: BookingSummary| {
                        let id = booking.id;
                        // 每次渲染以当前时刻评估资格
                        let cancellable = is_cancellable(booking.start_at, Local::now().naive_local());
                        let handle_cancel = handle_cancel.clone();
                        view! {
                            <div class="card bg-base-100 shadow hover:shadow-lg transition-shadow">
                                <div class="card-body flex-row items-center justify-between flex-wrap gap-4">
                                    <div>
                                        <h3 class="font-bold text-lg">{booking.room_name.clone()}</h3>
                                        <p class="text-sm text-base-content/60 mt-1">
                                            <span class="badge badge-ghost badge-sm">
                                                {format_at(booking.start_at)}
                                            </span>
                                            " 至 "
                                            <span class="badge badge-ghost badge-sm">
                                                {format_at(booking.end_at)}
                                            </span>
                                        </p>
                                    </div>
                                    {if cancellable {
                                        view! {
                                            <button
                                                class="btn btn-outline btn-error btn-sm"
                                                on:click=move |_| handle_cancel(id)
                                            >
                                                "取消预订"
                                            </button>
                                        }.into_any()
                                    } else {
                                        view! {
                                            <span class="btn btn-disabled btn-sm" title="距开始不足 24 小时">
                                                "不可取消"
                                            </span>
                                        }.into_any()
                                    }}
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </main>
    }
}
