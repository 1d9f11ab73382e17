use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 用户角色
#[derive(Debug, Clone, Serialize, PartialEq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub enum UserRole {
    Hod,     // 系主任
    Teacher, // 教师
    Student, // 学生
}

impl UserRole {
    pub const HOD: &'static str = "hod";
    pub const TEACHER: &'static str = "teacher";
    pub const STUDENT: &'static str = "student";

    pub fn hod_roles() -> &'static [&'static UserRole] {
        &[&Self::Hod]
    }
    pub fn teacher_roles() -> &'static [&'static UserRole] {
        &[&Self::Teacher]
    }
    // 教学侧角色（教师与系主任）
    pub fn staff_roles() -> &'static [&'static UserRole] {
        &[&Self::Hod, &Self::Teacher]
    }
    pub fn student_roles() -> &'static [&'static UserRole] {
        &[&Self::Student]
    }
    pub fn all_roles() -> &'static [&'static UserRole] {
        &[&Self::Hod, &Self::Teacher, &Self::Student]
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.as_str() {
            UserRole::HOD => Ok(UserRole::Hod),
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::STUDENT => Ok(UserRole::Student),
            _ => Err(serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: hod, teacher, student"
            ))),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Hod => write!(f, "{}", UserRole::HOD),
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hod" => Ok(UserRole::Hod),
            "teacher" => Ok(UserRole::Teacher),
            "student" => Ok(UserRole::Student),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

// 学生入驻资料，入驻完成前各字段为空
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct StudentProfile {
    pub name: Option<String>,
    pub roll_no: Option<String>,
    pub course: Option<String>,
    pub year: Option<String>,
}

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    #[ts(skip)]
    pub password_hash: String,
    pub role: UserRole,
    pub profile: StudentProfile,
    pub onboarded: bool,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl User {
    // 生成访问令牌
    pub async fn generate_access_token(&self) -> String {
        match crate::utils::jwt::JwtUtils::generate_access_token(self.id, &self.role.to_string()) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!("JWT token 生成失败: {}", e);
                format!(
                    "fallback_token_{}_{}",
                    self.id,
                    chrono::Utc::now().timestamp()
                )
            }
        }
    }

    // 生成 token 对（access + refresh）
    pub async fn generate_token_pair(
        &self,
        refresh_token_expiry: Option<chrono::TimeDelta>,
    ) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(
            self.id,
            &self.role.to_string(),
            refresh_token_expiry,
        )
        .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_round_trip() {
        for role in [UserRole::Hod, UserRole::Teacher, UserRole::Student] {
            let parsed = UserRole::from_str(&role.to_string()).unwrap();
            assert_eq!(parsed, role);
        }
    }

    #[test]
    fn test_role_parse_rejects_unknown() {
        assert!(UserRole::from_str("admin").is_err());
        assert!(UserRole::from_str("").is_err());
    }
}
