use crate::api::SchedulerApi;
use crate::auth::{handle_auth_failure, use_auth};
use chrono::NaiveDateTime;
use leptos::prelude::*;
use leptos::task::spawn_local;
use roomsched_shared::Room;
use roomsched_shared::protocol::CreateBookingRequest;

/// 成功提示展示多久后自动收起表单（毫秒）
const CONFIRM_CLOSE_DELAY_MS: u64 = 2_000;

/// 解析 `datetime-local` 输入框的值
///
/// 浏览器给出的是 `2025-01-10T10:00`（无秒），补上 `:00` 再解析。
fn parse_local_input(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(&format!("{}:00", raw), "%Y-%m-%dT%H:%M:%S").ok()
}

/// 单个会议室卡片内的预订表单
///
/// 折叠为一个按钮，展开后提交起止时间。成功后展示确认消息，
/// 两秒后自动收起并清空。
#[component]
pub fn BookingForm(room: Room) -> impl IntoView {
    let api = expect_context::<SchedulerApi>();
    let auth_ctx = use_auth();

    let (open, set_open) = signal(false);
    let (start_raw, set_start_raw) = signal(String::new());
    let (end_raw, set_end_raw) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    // (消息内容, 是否成功)
    let (message, set_message) = signal(Option::<(String, bool)>::None);

    let room_id = room.id;

    let reset_form = move || {
        set_start_raw.try_set(String::new());
        set_end_raw.try_set(String::new());
        set_message.try_set(None);
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let (start_at, end_at) = match (
            parse_local_input(&start_raw.get()),
            parse_local_input(&end_raw.get()),
        ) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                set_message.set(Some(("时间格式无效，请重新选择。".to_string(), false)));
                return;
            }
        };

        let token = auth_ctx.state.get_untracked().token;
        if token.is_none() {
            set_message.set(Some(("请先登录后再预订。".to_string(), false)));
            return;
        }

        set_submitting.set(true);
        set_message.set(None);

        let api = api.clone();
        spawn_local(async move {
            let req = CreateBookingRequest {
                room_id,
                start_at,
                end_at,
            };

            match api.create_booking(req, token.as_deref()).await {
                Ok(_) => {
                    set_message.try_set(Some(("预订成功！".to_string(), true)));
                    set_timeout(
                        move || {
                            set_open.try_set(false);
                            reset_form();
                        },
                        std::time::Duration::from_millis(CONFIRM_CLOSE_DELAY_MS),
                    );
                }
                Err(err) => {
                    // 首页是公开路由，认证类错误不会触发守卫跳转，
                    // 清完会话仍要留下内联提示
                    handle_auth_failure(&auth_ctx, &err);
                    set_message.try_set(Some((err.to_string(), false)));
                }
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <Show
            when=move || open.get()
            fallback=move || view! {
                <button class="btn btn-primary btn-block mt-2" on:click=move |_| set_open.set(true)>
                    "预订"
                </button>
            }
        >
            <form class="mt-2 p-4 bg-base-200 rounded-lg space-y-3" on:submit=on_submit.clone()>
                <h4 class="font-bold text-sm">"新预订"</h4>

                <div class="form-control">
                    <label class="label">
                        <span class="label-text text-xs">"开始时间"</span>
                    </label>
                    <input
                        type="datetime-local"
                        required
                        class="input input-bordered input-sm w-full"
                        prop:value=start_raw
                        on:input=move |ev| set_start_raw.set(event_target_value(&ev))
                    />
                </div>

                <div class="form-control">
                    <label class="label">
                        <span class="label-text text-xs">"结束时间"</span>
                    </label>
                    <input
                        type="datetime-local"
                        required
                        class="input input-bordered input-sm w-full"
                        prop:value=end_raw
                        on:input=move |ev| set_end_raw.set(event_target_value(&ev))
                    />
                </div>

                <Show when=move || message.get().is_some()>
                    <div class=move || {
                        let ok = message.get().map(|(_, ok)| ok).unwrap_or(false);
                        if ok {
                            "alert alert-success text-sm py-2"
                        } else {
                            "alert alert-error text-sm py-2"
                        }
                    }>
                        <span>{move || message.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                    </div>
                </Show>

                <div class="flex gap-2">
                    <button
                        type="submit"
                        disabled=move || submitting.get()
                        class="btn btn-success btn-sm flex-1"
                    >
                        {move || if submitting.get() { "处理中..." } else { "确认" }}
                    </button>
                    <button
                        type="button"
                        class="btn btn-ghost btn-sm flex-1"
                        on:click=move |_| {
                            set_open.set(false);
                            set_message.set(None);
                        }
                    >
                        "取消"
                    </button>
                </div>
            </form>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn datetime_local_value_parses_with_appended_seconds() {
        let parsed = parse_local_input("2025-01-10T10:00").unwrap();
        assert_eq!(parsed.format("%Y-%m-%dT%H:%M:%S").to_string(), "2025-01-10T10:00:00");
    }

    #[test]
    fn garbage_input_fails_to_parse() {
        assert!(parse_local_input("10/01/2025 10h").is_none());
        assert!(parse_local_input("").is_none());
    }
}
