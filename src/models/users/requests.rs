use serde::Deserialize;
use ts_rs::TS;

/// 注册请求，角色由服务端解析，不由客户端指定
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

/// 学生入驻请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct OnboardRequest {
    pub name: String,
    pub roll_no: String,
    pub course: String,
    pub year: String,
}
