use crate::api::SchedulerApi;
use crate::auth::{handle_auth_failure, use_auth};
use crate::state::LoadState;
use crate::web::confirm;
use leptos::prelude::*;
use leptos::task::spawn_local;
use roomsched_shared::{Role, User};

/// 用户管理：切换角色、删除账号
///
/// 改角色后用服务端返回的用户原位替换，其余行不动。
#[component]
pub fn UsersTab(
    users: ReadSignal<LoadState<User>>,
    set_users: WriteSignal<LoadState<User>>,
) -> impl IntoView {
    let api = expect_context::<SchedulerApi>();
    let auth_ctx = use_auth();

    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    // 正在变更中的用户，禁用其按钮避免重复提交
    let (pending_id, set_pending_id) = signal(Option::<i64>::None);

    let handle_role_toggle = {
        let api = api.clone();
        move |id: i64, current: Role| {
            let Some(token) = auth_ctx.state.get_untracked().token else {
                return;
            };
            let target = match current {
                Role::Admin => Role::User,
                Role::User => Role::Admin,
            };
            set_error_msg.set(None);
            set_pending_id.set(Some(id));

            let api = api.clone();
            spawn_local(async move {
                match api.set_user_role(id, target, &token).await {
                    Ok(updated) => {
                        set_users.try_update(|state| state.upsert(updated));
                    }
                    Err(err) => {
                        // 目标用户已不存在时剔除陈旧行
                        set_users.try_update(|state| state.purge_if_stale(id, &err));
                        if !handle_auth_failure(&auth_ctx, &err) {
                            set_error_msg.try_set(Some(err.to_string()));
                        }
                    }
                }
                set_pending_id.try_set(None);
            });
        }
    };

    let handle_delete = {
        let api = api.clone();
        move |id: i64| {
            if !confirm("确定要删除这个用户吗？其预订也会一并失效。") {
                return;
            }
            let Some(token) = auth_ctx.state.get_untracked().token else {
                return;
            };
            set_error_msg.set(None);
            set_pending_id.set(Some(id));

            let api = api.clone();
            spawn_local(async move {
                match api.delete_user(id, &token).await {
                    Ok(()) => {
                        set_users.try_update(|state| state.remove(id));
                    }
                    Err(err) => {
                        set_users.try_update(|state| state.purge_if_stale(id, &err));
                        if !handle_auth_failure(&auth_ctx, &err) {
                            set_error_msg.try_set(Some(err.to_string()));
                        }
                    }
                }
                set_pending_id.try_set(None);
            });
        }
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">"用户管理"</h2>

                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>

                <Show when=move || users.with(|s| matches!(s, LoadState::Ready(list) if list.is_empty()))>
                    <p class="text-base-content/60 py-4">"暂无用户。"</p>
                </Show>

                <div class="overflow-x-auto">
                    <table class="table table-zebra">
                        <thead>
                            <tr>
                                <th>"姓名"</th>
                                <th>"邮箱"</th>
                                <th>"角色"</th>
                                <th class="text-right">"操作"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || users.with(|s| s.items().to_vec())
                                key=|user| user.id
                                children=move |user: User| {
                                    let id = user.id;
                                    let role = user.role;
                                    let handle_role_toggle = handle_role_toggle.clone();
                                    let handle_delete = handle_delete.clone();
                                    let busy = move || pending_id.get() == Some(id);
                                    view! {
                                        <tr>
                                            <td class="font-medium">{user.name.clone()}</td>
                                            <td>{user.email.clone()}</td>
                                            <td>
                                                {match role {
                                                    Role::Admin => view! {
                                                        <span class="badge badge-secondary">"管理员"</span>
                                                    }.into_any(),
                                                    Role::User => view! {
                                                        <span class="badge badge-ghost">"用户"</span>
                                                    }.into_any(),
                                                }}
                                            </td>
                                            <td class="text-right space-x-2">
                                                <button
                                                    class="btn btn-outline btn-xs"
                                                    disabled=busy
                                                    on:click=move |_| handle_role_toggle(id, role)
                                                >
                                                    {match role {
                                                        Role::Admin => "降为用户",
                                                        Role::User => "设为管理员",
                                                    }}
                                                </button>
                                                <button
                                                    class="btn btn-outline btn-error btn-xs"
                                                    disabled=busy
                                                    on:click=move |_| handle_delete(id)
                                                >
                                                    "删除"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
