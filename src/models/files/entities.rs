use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct File {
    // 文件的唯一标识符
    pub download_token: String,
    // 原始文件名
    pub original_name: String,
    // 文件大小（以字节为单位）
    pub file_size: i64,
    // 文件类型
    pub file_type: String,
    // 上传者ID
    pub user_id: i64,
    // 上传时间
    pub created_at: chrono::DateTime<chrono::Utc>,
}
