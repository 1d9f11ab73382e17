use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode, teachers::requests::AddTeacherRequest};
use crate::services::auth::resolve::normalize_email;
use crate::utils::validate::validate_email;

pub async fn handle_add(
    service: &TeacherService,
    add_request: AddTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let email = normalize_email(&add_request.email);

    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    // 重复加入直接拒绝
    match storage.get_teacher_by_email(&email).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::TeacherAlreadyExists,
                "Teacher already in the registry",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to add teacher: {e}"),
                )),
            );
        }
    }

    match storage.add_teacher(&email).await {
        Ok(teacher) => {
            tracing::info!("Teacher {} added to registry", teacher.email);
            // 已注册的同邮箱账号在下次登录时解析为教师角色
            Ok(HttpResponse::Created().json(ApiResponse::success(teacher, "Teacher added")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to add teacher: {e}"),
            )),
        ),
    }
}
