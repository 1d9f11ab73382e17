use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, assignments::requests::CreateAssignmentRequest};
use crate::utils::validate::validate_profile_field;

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    mut req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    req.name = req.name.trim().to_string();

    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::<()>::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    // 基本字段校验
    if req.name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            ErrorCode::InvalidInput,
            "Assignment name must not be empty",
        )));
    }

    for (field, value) in [("course", &req.course), ("year", &req.year)] {
        if let Err(msg) = validate_profile_field(value) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                ErrorCode::InvalidInput,
                format!("{field}: {msg}"),
            )));
        }
    }

    // 截止日早于今天的作业没有可提交窗口
    let due_date = crate::models::assignments::entities::normalize_due_date(req.due_date);
    if due_date < chrono::Utc::now().date_naive() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            ErrorCode::InvalidInput,
            "Due date must not be in the past",
        )));
    }

    // 题目文件必须已上传
    match storage.get_file_by_token(&req.file_token).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                ErrorCode::FileNotFound,
                "Question file not found, upload it first",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create assignment: {e}"),
                )),
            );
        }
    }

    // 同一教师下作业名称不允许重复（大小写敏感）
    match storage
        .get_assignment_by_creator_and_name(user.id, &req.name)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error_empty(
                ErrorCode::DuplicateAssignmentName,
                "An assignment with this name already exists",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to create assignment: {e}"),
                )),
            );
        }
    }

    match storage.create_assignment(user.id, req).await {
        Ok(assignment) => {
            tracing::info!(
                "Assignment '{}' created by user {} for {}/{}",
                assignment.name,
                user.id,
                assignment.course,
                assignment.year
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "Assignment created")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create assignment: {e}"),
            )),
        ),
    }
}
