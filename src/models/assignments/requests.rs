use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;

/// 创建作业请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub name: String,
    pub course: String,
    pub year: String,
    /// ISO 8601 格式，时间部分会被丢弃，只保留日历日期
    pub due_date: DateTime<Utc>,
    /// 题目文件的 download_token
    pub file_token: String,
}

/// 作业列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 学生视角：true 时只列出自己尚未提交的作业
    #[serde(default)]
    pub remaining: bool,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    /// 教师视角：只列自己创建的作业
    pub created_by: Option<i64>,
    /// 学生视角：按 (course, year) 受众过滤
    pub audience: Option<(String, String)>,
    /// 排除该学生已持有在册提交的作业
    pub exclude_submitted_by: Option<i64>,
}
