//! 数据模型定义
//!
//! 业务实体与请求/响应 DTO，与 entity 模块的数据库实体分离。

pub mod assignments;
pub mod auth;
pub mod common;
pub mod files;
pub mod roster;
pub mod submissions;
pub mod teachers;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间，用于统计预处理耗时
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
