use crate::state::LoadState;
use chrono::NaiveDateTime;
use leptos::prelude::*;
use roomsched_shared::BookingSummary;

fn format_at(at: NaiveDateTime) -> String {
    at.format("%d/%m/%y %H:%M").to_string()
}

/// 全量预订列表（只读）
#[component]
pub fn BookingsTab(bookings: ReadSignal<LoadState<BookingSummary>>) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">"全部预订"</h2>

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

                <Show when=move || bookings.with(|s| matches!(s, LoadState::Ready(list) if list.is_empty()))>
                    <p class="text-base-content/60 py-4">"暂无预订记录。"</p>
                </Show>

                <div class="overflow-x-auto">
                    <table class="table table-zebra">
                        <thead>
                            <tr>
                                <th>"会议室"</th>
                                <th>"预订人"</th>
                                <th>"开始"</th>
                                <th>"结束"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || bookings.with(|s| s.items().to_vec())
                                key=|booking| booking.id
                                children=|booking: BookingSummary| {
                                    view! {
                                        <tr>
                                            <td class="font-medium">{booking.room_name.clone()}</td>
                                            <td>
                                                <div>{booking.user_name.clone()}</div>
                                                <div class="text-xs text-base-content/60">
                                                    {booking.user_email.clone()}
                                                </div>
                                            </td>
                                            <td>{format_at(booking.start_at)}</td>
                                            <td>{format_at(booking.end_at)}</td>
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
