use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode};

pub async fn handle_remove(
    service: &TeacherService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.remove_teacher(teacher_id).await {
        Ok(true) => {
            tracing::info!("Teacher {} removed from registry", teacher_id);
            // 对应账号已创建的作业保留，角色在下次登录时降级
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Teacher removed")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to remove teacher: {e}"),
            )),
        ),
    }
}
