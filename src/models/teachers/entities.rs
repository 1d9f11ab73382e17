use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师注册表条目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub email: String,
    pub added_at: chrono::DateTime<chrono::Utc>,
}
