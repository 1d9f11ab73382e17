use serde::Deserialize;
use ts_rs::TS;

/// 添加教师请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct AddTeacherRequest {
    pub email: String,
}
