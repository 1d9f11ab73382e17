use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 名册中的学生行，只取导出需要的投影
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/roster.ts")]
pub struct RosterStudent {
    pub id: i64,
    pub name: String,
    pub roll_no: String,
    pub course: String,
    pub year: String,
}

/// 名册响应。结果是集合语义，顺序不作承诺
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/roster.ts")]
pub struct RosterResponse {
    pub items: Vec<RosterStudent>,
    pub total: i64,
}
