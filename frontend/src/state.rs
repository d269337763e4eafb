//! 页面列表状态模块
//!
//! 每个列表页共享同一个状态机：
//! `Idle -> Loading -> {Ready, Failed}`；`Ready` 之后的每次写操作
//! 不整页刷新，而是按身份就地合并（新增追加、更新替换、删除剔除），
//! 服务端始终是下一次整页加载的唯一事实来源。
//!
//! 合并操作独立于渲染，是纯函数，可在宿主上测试。

use crate::error::ApiError;
use roomsched_shared::{BookingSummary, Room, User};

/// 拥有服务端分配 id 的实体
pub trait Identify {
    fn id(&self) -> i64;
}

impl Identify for Room {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identify for User {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identify for BookingSummary {
    fn id(&self) -> i64 {
        self.id
    }
}

/// 按身份合并：id 已存在则就地替换（保持位置），否则追加到末尾
pub fn upsert_by_id<T: Identify>(list: &mut Vec<T>, item: T) {
    match list.iter_mut().find(|existing| existing.id() == item.id()) {
        Some(slot) => *slot = item,
        None => list.push(item),
    }
}

/// 按身份剔除，保持其余元素的相对顺序
pub fn remove_by_id<T: Identify>(list: &mut Vec<T>, id: i64) {
    list.retain(|item| item.id() != id);
}

/// 列表页状态机
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState<T> {
    /// 尚未发起加载
    #[default]
    Idle,
    /// 首次加载中
    Loading,
    /// 加载成功，持有服务端数据的本地缓存
    Ready(Vec<T>),
    /// 加载失败，携带面向用户的消息
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// 只读访问 Ready 状态的列表
    pub fn items(&self) -> &[T] {
        match self {
            LoadState::Ready(items) => items,
            _ => &[],
        }
    }

    /// 把一次列表加载的结果落入终态
    ///
    /// 任何错误都进入 `Failed`，认证类也不例外；原始错误交还
    /// 调用方做会话善后。
    pub fn settle(result: Result<Vec<T>, ApiError>) -> (Self, Option<ApiError>) {
        match result {
            Ok(items) => (LoadState::Ready(items), None),
            Err(err) => (LoadState::Failed(err.to_string()), Some(err)),
        }
    }
}

impl<T: Identify> LoadState<T> {
    /// 写操作成功后的本地合并；非 Ready 状态下为空操作
    pub fn upsert(&mut self, item: T) {
        if let LoadState::Ready(items) = self {
            upsert_by_id(items, item);
        }
    }

    /// 删除成功后的本地剔除；非 Ready 状态下为空操作
    pub fn remove(&mut self, id: i64) {
        if let LoadState::Ready(items) = self {
            remove_by_id(items, id);
        }
    }

    /// 写操作撞上 404 时剔除本地的陈旧条目；其它错误不动列表
    pub fn purge_if_stale(&mut self, id: i64, err: &ApiError) {
        if matches!(err, ApiError::NotFound(_)) {
            self.remove(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: i64, name: &str) -> Room {
        Room {
            id,
            name: name.to_string(),
            capacity: 4,
        }
    }

    #[test]
    fn create_appends_exactly_one_entry_without_reordering() {
        let mut list = vec![room(1, "Alfa"), room(2, "Beta")];
        upsert_by_id(&mut list, room(3, "Gama"));

        let ids: Vec<i64> = list.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut list = vec![room(1, "Alfa"), room(2, "Beta"), room(3, "Gama")];
        upsert_by_id(&mut list, room(2, "Beta Renovada"));

        assert_eq!(list.len(), 3);
        assert_eq!(list[1].name, "Beta Renovada");
        assert_eq!(list[0].id, 1);
        assert_eq!(list[2].id, 3);
    }

    #[test]
    fn delete_keeps_relative_order_of_the_rest() {
        let mut list = vec![room(1, "Alfa"), room(2, "Beta"), room(3, "Gama")];
        remove_by_id(&mut list, 2);

        let ids: Vec<i64> = list.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn delete_of_unknown_id_is_noop() {
        let mut list = vec![room(1, "Alfa")];
        remove_by_id(&mut list, 99);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn merges_only_apply_in_ready_state() {
        let mut state: LoadState<Room> = LoadState::Loading;
        state.upsert(room(1, "Alfa"));
        assert_eq!(state, LoadState::Loading);

        let mut state = LoadState::Ready(vec![room(1, "Alfa")]);
        state.remove(1);
        assert_eq!(state.items().len(), 0);
    }

    #[test]
    fn successful_load_lands_in_ready() {
        let (state, err) = LoadState::settle(Ok(vec![room(1, "Alfa")]));
        assert_eq!(state.items().len(), 1);
        assert!(err.is_none());
    }

    #[test]
    fn auth_failure_during_load_lands_in_failed_state() {
        let (state, err): (LoadState<Room>, _) =
            LoadState::settle(Err(ApiError::classify(401, "")));

        assert!(matches!(state, LoadState::Failed(_)));
        // 调用方据此清会话并交给路由守卫跳转
        assert!(err.unwrap().is_auth());
    }

    #[test]
    fn stale_entry_is_purged_on_not_found() {
        let mut state = LoadState::Ready(vec![room(1, "Alfa"), room(2, "Beta")]);
        state.purge_if_stale(2, &ApiError::classify(404, ""));

        let ids: Vec<i64> = state.items().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn other_write_failures_keep_the_list_intact() {
        let mut state = LoadState::Ready(vec![room(1, "Alfa")]);
        state.purge_if_stale(1, &ApiError::classify(409, ""));
        assert_eq!(state.items().len(), 1);
    }

    #[test]
    fn role_change_touches_only_the_target_user() {
        use roomsched_shared::Role;
        let user = |id: i64, role: Role| User {
            id,
            name: format!("user-{id}"),
            email: format!("u{id}@example.com"),
            role,
        };

        let mut list = vec![user(1, Role::User), user(2, Role::User), user(3, Role::User)];
        let mut promoted = user(2, Role::Admin);
        promoted.name = "user-2".to_string();
        upsert_by_id(&mut list, promoted);

        assert_eq!(list[1].role, Role::Admin);
        assert_eq!(list[0].role, Role::User);
        assert_eq!(list[2].role, Role::User);
        assert_eq!(list.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
