use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::PaginationInfo;
use crate::models::submissions::entities::SubmissionOutcome;

/// 提交人信息（教师批改视角）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionStudent {
    pub id: i64,
    pub name: String,
    pub roll_no: String,
}

/// 提交列表条目（教师批改视角）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListItem {
    pub id: i64,
    pub assignment_id: i64,
    pub student: SubmissionStudent,
    pub file_token: String,
    pub corrected: bool,
    pub outcome: SubmissionOutcome,
    pub remark: Option<String>,
    pub submitted_at: String,
}

/// 提交列表响应
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionListItem>,
    pub pagination: PaginationInfo,
}

/// 学生查看自己提交状态的条目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct StudentSubmissionView {
    pub submission_id: i64,
    pub assignment_id: i64,
    pub assignment_name: String,
    pub due_date: NaiveDate,
    pub file_token: String,
    pub corrected: bool,
    pub outcome: SubmissionOutcome,
    pub remark: Option<String>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}
