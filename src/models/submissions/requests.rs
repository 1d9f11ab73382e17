use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::pagination::PaginationQuery;
use crate::models::submissions::entities::SubmissionOutcome;

/// 提交作业请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    /// 已上传答卷文件的 download_token
    pub file_token: String,
}

/// 批改请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    /// accepted 或 rejected
    pub outcome: SubmissionOutcome,
    pub remark: String,
}

/// 提交列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    /// 按批改状态过滤：false = 待批改队列，true = 已批改队列
    pub corrected: Option<bool>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment_id: i64,
    pub corrected: Option<bool>,
}
