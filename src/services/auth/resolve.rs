//! 角色解析
//!
//! 角色不由客户端指定，每次注册和登录都按当前名单重新解析：
//! 系主任邮箱 -> HOD，教师名单内 -> Teacher，其余 -> Student。
//! 名单查询出错时向上传播，绝不静默降级为 Student。

use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::users::entities::UserRole;
use crate::storage::Storage;

pub async fn resolve_role(storage: &Arc<dyn Storage>, email: &str) -> Result<UserRole> {
    let config = AppConfig::get();

    if email.eq_ignore_ascii_case(&config.app.hod_email) {
        return Ok(UserRole::Hod);
    }

    if storage.get_teacher_by_email(email).await?.is_some() {
        return Ok(UserRole::Teacher);
    }

    Ok(UserRole::Student)
}

/// 邮箱统一小写存储，名单匹配不受大小写影响
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  HOD@College.EDU "), "hod@college.edu");
        assert_eq!(normalize_email("a@b.cc"), "a@b.cc");
    }
}
