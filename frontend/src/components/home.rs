use crate::api::SchedulerApi;
use crate::state::LoadState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use roomsched_shared::Room;

use super::booking_form::BookingForm;

/// 首页：会议室列表（公开，无需登录）
#[component]
pub fn HomePage() -> impl IntoView {
    let api = expect_context::<SchedulerApi>();

    let (rooms, set_rooms) = signal(LoadState::<Room>::Idle);

    let load_rooms = {
        let api = api.clone();
        move || {
            let api = api.clone();
            set_rooms.set(LoadState::Loading);
            spawn_local(async move {
                // 组件可能在响应到达前已卸载，丢弃迟到的结果
                match api.list_rooms().await {
                    Ok(list) => set_rooms.try_set(LoadState::Ready(list)),
                    Err(err) => set_rooms.try_set(LoadState::Failed(err.to_string())),
                };
            });
        }
    };

    // 挂载时整页加载
    Effect::new({
        let load_rooms = load_rooms.clone();
        move |_| load_rooms()
    });

    let room_count = move || rooms.with(|state| state.items().len());

    view! {
        <main class="min-h-screen bg-base-200">
            <section class="hero bg-neutral text-neutral-content py-16">
                <div class="hero-content text-center">
                    <div class="max-w-2xl">
                        <h1 class="text-4xl md:text-5xl font-bold mb-4">
                            "智能预订你的会议空间"
                        </h1>
                        <p class="text-lg opacity-80">
                            "时段冲突由系统自动拦截，为团队找到合适的空间。"
                        </p>
                    </div>
                </div>
            </section>

            <section class="max-w-7xl mx-auto py-12 px-6">
                <div class="flex items-center justify-between mb-8">
                    <h2 class="text-2xl font-bold">"可用会议室"</h2>
                    <span class="text-base-content/60 text-sm">
                        {move || format!("共 {} 间", room_count())}
                    </span>
                </div>

                <Show when=move || rooms.with(|s| matches!(s, LoadState::Failed(_)))>
                    <div role="alert" class="alert alert-error mb-6">
                        <span>
                            {move || rooms.with(|s| match s {
                                LoadState::Failed(msg) => msg.clone(),
                                _ => String::new(),
                            })}
                        </span>
                    </div>
                </Show>

                <Show when=move || rooms.with(|s| s.is_loading())>
                    <div class="text-center py-16">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                        <p class="text-base-content/60 mt-4">"加载中..."</p>
                    </div>
                </Show>

                <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-6">
                    <For
                        each=move || rooms.with(|s| s.items().to_vec())
                        key=|room| room.id
                        children=move |room: Room| {
                            view! {
                                <div class="card bg-base-100 shadow-md hover:shadow-xl transition-shadow">
                                    <div class="card-body">
                                        <h3 class="card-title">{room.name.clone()}</h3>
                                        <div class="badge badge-outline">
                                            {format!("容纳 {} 人", room.capacity)}
                                        </div>
                                        <BookingForm room=room.clone() />
                                    </div>
                                </div>
                            }
                        }
                    />
                </div>
            </section>
        </main>
    }
}
