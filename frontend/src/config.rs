//! 构建期配置
//!
//! API 基地址在编译时通过 `ROOMSCHED_API_URL` 环境变量注入，
//! 未设置时退回本地开发默认值。

/// 远端调度 API 的基地址（无尾部斜杠）
pub fn api_base_url() -> String {
    option_env!("ROOMSCHED_API_URL")
        .unwrap_or("http://localhost:8080")
        .trim_end_matches('/')
        .to_string()
}
