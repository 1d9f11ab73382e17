use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::assignments::entities::Assignment;
use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};

/// 删除门禁判定结果
#[derive(Debug)]
pub(crate) enum DeleteGate {
    AlreadyGone,
    NotOwner,
    Allowed(Assignment),
}

/// 纯判定函数：目标缺失视为删除已完成，存在时只放行创建者
pub(crate) fn evaluate_delete_gate(existing: Option<Assignment>, user: &User) -> DeleteGate {
    match existing {
        None => DeleteGate::AlreadyGone,
        Some(assignment) => match user.role {
            UserRole::Teacher if assignment.created_by == user.id => {
                DeleteGate::Allowed(assignment)
            }
            _ => DeleteGate::NotOwner,
        },
    }
}

/// 删除作业（幂等）
///
/// 目标不存在时同样返回成功，重复删除不报错。提交记录随作业
/// 一并删除，答卷文件本体保留在文件仓库中。
pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    let existing = match storage.get_assignment_by_id(assignment_id).await {
        Ok(existing) => existing,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to delete assignment: {e}"),
                )),
            );
        }
    };

    let assignment = match evaluate_delete_gate(existing, &user) {
        DeleteGate::AlreadyGone => {
            // 幂等：目标已不存在视为删除完成
            return Ok(
                HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Assignment deleted"))
            );
        }
        DeleteGate::NotOwner => {
            // 作业归创建它的教师所有，只有创建者可以删除
            return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
                ErrorCode::Forbidden,
                "Only the creator can delete this assignment",
            )));
        }
        DeleteGate::Allowed(assignment) => assignment,
    };

    match storage.delete_assignment(assignment_id).await {
        Ok(_) => {
            tracing::info!(
                "Assignment {} ('{}') deleted by user {}",
                assignment_id,
                assignment.name,
                user.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Assignment deleted")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete assignment: {e}"),
            )),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::users::entities::StudentProfile;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn teacher(id: i64) -> User {
        User {
            id,
            email: format!("t{id}@college.edu"),
            password_hash: String::new(),
            role: UserRole::Teacher,
            profile: StudentProfile::default(),
            onboarded: false,
            last_login: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn assignment(created_by: i64) -> Assignment {
        Assignment {
            id: 5,
            created_by,
            name: "Unit 3 worksheet".to_string(),
            course: "B.Tech CSE".to_string(),
            year: "3rd".to_string(),
            due_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            file_token: "tok-q".to_string(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_absent_assignment_counts_as_deleted() {
        // 重复删除同一 ID 时第二次也走这条路径
        let gate = evaluate_delete_gate(None, &teacher(1));
        assert!(matches!(gate, DeleteGate::AlreadyGone));
    }

    #[test]
    fn test_creator_may_delete() {
        let gate = evaluate_delete_gate(Some(assignment(1)), &teacher(1));
        assert!(matches!(gate, DeleteGate::Allowed(_)));
    }

    #[test]
    fn test_non_creator_refused() {
        let gate = evaluate_delete_gate(Some(assignment(1)), &teacher(2));
        assert!(matches!(gate, DeleteGate::NotOwner));

        let mut hod = teacher(3);
        hod.role = UserRole::Hod;
        let gate = evaluate_delete_gate(Some(assignment(1)), &hod);
        assert!(matches!(gate, DeleteGate::NotOwner));
    }
}
