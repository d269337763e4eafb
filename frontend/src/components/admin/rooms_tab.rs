use crate::api::SchedulerApi;
use crate::auth::{handle_auth_failure, use_auth};
use crate::error::ApiError;
use crate::state::LoadState;
use crate::web::confirm;
use leptos::prelude::*;
use leptos::task::spawn_local;
use roomsched_shared::Room;

/// 会议室表单的字段信号
///
/// `editing_id` 为空表示新建，否则表示正在编辑该会议室。
#[derive(Clone, Copy)]
struct RoomFormState {
    editing_id: RwSignal<Option<i64>>,
    name: RwSignal<String>,
    capacity_raw: RwSignal<String>,
}

impl RoomFormState {
    fn new() -> Self {
        Self {
            editing_id: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            capacity_raw: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        self.editing_id.try_set(None);
        self.name.try_set(String::new());
        self.capacity_raw.try_set(String::new());
    }

    fn load(&self, room: &Room) {
        self.editing_id.set(Some(room.id));
        self.name.set(room.name.clone());
        self.capacity_raw.set(room.capacity.to_string());
    }

    /// 校验并取出表单值，失败时返回提示文案
    fn validated(&self) -> Result<(String, i32), String> {
        let name = self.name.get_untracked().trim().to_string();
        if name.is_empty() {
            return Err("请填写会议室名称".to_string());
        }
        let capacity: i32 = self
            .capacity_raw
            .get_untracked()
            .trim()
            .parse()
            .map_err(|_| "容量必须是数字".to_string())?;
        if capacity <= 0 {
            return Err("容量必须大于 0".to_string());
        }
        Ok((name, capacity))
    }
}

/// 会议室管理：新建、编辑、删除
///
/// 写操作成功后按标识合并进本地列表，不整页重拉。
#[component]
pub fn RoomsTab(
    rooms: ReadSignal<LoadState<Room>>,
    set_rooms: WriteSignal<LoadState<Room>>,
) -> impl IntoView {
    let api = expect_context::<SchedulerApi>();
    let auth_ctx = use_auth();

    let form = RoomFormState::new();
    let (submitting, set_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = {
        let api = api.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();

            let (name, capacity) = match form.validated() {
                Ok(parts) => parts,
                Err(msg) => {
                    set_error_msg.set(Some(msg));
                    return;
                }
            };
            let Some(token) = auth_ctx.state.get_untracked().token else {
                return;
            };

            set_submitting.set(true);
            set_error_msg.set(None);

            let api = api.clone();
            spawn_local(async move {
                let result = match form.editing_id.get_untracked() {
                    Some(id) => api.update_room(id, name, capacity, &token).await,
                    None => api.create_room(name, capacity, &token).await,
                };

                match result {
                    Ok(room) => {
                        // 新建追加到末尾，编辑原位替换
                        set_rooms.try_update(|state| state.upsert(room));
                        form.reset();
                    }
                    Err(err) => {
                        if !handle_auth_failure(&auth_ctx, &err) {
                            set_error_msg.try_set(Some(err.to_string()));
                        }
                    }
                }
                set_submitting.try_set(false);
            });
        }
    };

    let handle_delete = {
        let api = api.clone();
        move |id: i64| {
            if !confirm("确定要删除这个会议室吗？") {
                return;
            }
            let Some(token) = auth_ctx.state.get_untracked().token else {
                return;
            };
            set_error_msg.set(None);

            let api = api.clone();
            spawn_local(async move {
                match api.delete_room(id, &token).await {
                    Ok(()) => {
                        set_rooms.try_update(|state| state.remove(id));
                        // 正在编辑被删除的会议室时清空表单
                        if form.editing_id.get_untracked() == Some(id) {
                            form.reset();
                        }
                    }
                    Err(err) => {
                        // 404 说明条目在服务端已不存在，按陈旧数据剔除
                        set_rooms.try_update(|state| state.purge_if_stale(id, &err));
                        if matches!(err, ApiError::NotFound(_))
                            && form.editing_id.get_untracked() == Some(id)
                        {
                            form.reset();
                        }
                        if !handle_auth_failure(&auth_ctx, &err) {
                            set_error_msg.try_set(Some(err.to_string()));
                        }
                    }
                }
            });
        }
    };

    let form_title = move || {
        if form.editing_id.get().is_some() {
            "编辑会议室"
        } else {
            "新建会议室"
        }
    };

    view! {
        <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
            <div class="card bg-base-100 shadow lg:col-span-1 h-fit">
                <form class="card-body" on:submit=on_submit>
                    <h2 class="card-title">{form_title}</h2>

                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>

                    <div class="form-control">
                        <label class="label" for="room-name">
                            <span class="label-text">"名称"</span>
                        </label>
                        <input
                            id="room-name"
                            type="text"
                            class="input input-bordered"
                            prop:value=move || form.name.get()
                            on:input=move |ev| form.name.set(event_target_value(&ev))
                            required
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="room-capacity">
                            <span class="label-text">"容量"</span>
                        </label>
                        <input
                            id="room-capacity"
                            type="number"
                            min="1"
                            class="input input-bordered"
                            prop:value=move || form.capacity_raw.get()
                            on:input=move |ev| form.capacity_raw.set(event_target_value(&ev))
                            required
                        />
                    </div>

                    <div class="form-control mt-4 gap-2">
                        <button class="btn btn-primary" disabled=move || submitting.get()>
                            {move || if submitting.get() { "保存中..." } else { "保存" }}
                        </button>
                        <Show when=move || form.editing_id.get().is_some()>
                            <button
                                type="button"
                                class="btn btn-ghost btn-sm"
                                on:click=move |_| form.reset()
                            >
                                "取消编辑"
                            </button>
                        </Show>
                    </div>
                </form>
            </div>

            <div class="card bg-base-100 shadow lg:col-span-2">
                <div class="card-body">
                    <h2 class="card-title">"会议室列表"</h2>

                    <Show when=move || rooms.with(|s| matches!(s, LoadState::Ready(list) if list.is_empty()))>
                        <p class="text-base-content/60 py-4">"还没有会议室，先创建一个。"</p>
                    </Show>

                    <div class="overflow-x-auto">
                        <table class="table table-zebra">
                            <thead>
                                <tr>
                                    <th>"名称"</th>
                                    <th>"容量"</th>
                                    <th class="text-right">"操作"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || rooms.with(|s| s.items().to_vec())
                                    key=|room| room.id
                                    children=move |room: Room| {
                                        let id = room.id;
                                        let handle_delete = handle_delete.clone();
                                        let edit_room = room.clone();
                                        view! {
                                            <tr>
                                                <td class="font-medium">{room.name.clone()}</td>
                                                <td>{room.capacity}</td>
                                                <td class="text-right space-x-2">
                                                    <button
                                                        class="btn btn-outline btn-xs"
                                                        on:click=move |_| form.load(&edit_room)
                                                    >
                                                        "编辑"
                                                    </button>
                                                    <button
                                                        class="btn btn-outline btn-error btn-xs"
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
        </div>
    }
}
