use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

/// 学生查看自己的全部提交与批改状态
pub async fn handle_my_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
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

    match storage.list_student_submissions(user.id).await {
        Ok(views) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            views,
            "Submissions retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list submissions: {e}"),
            )),
        ),
    }
}

/// 学生查看自己对某个作业的在册提交
pub async fn handle_my_submission_for_assignment(
    service: &SubmissionService,
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

    match storage
        .get_submission_by_assignment_and_student(assignment_id, user.id)
        .await
    {
        Ok(Some(submission)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            submission,
            "Submission retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            ErrorCode::SubmissionNotFound,
            "No submission for this assignment",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to query submission: {e}"),
            )),
        ),
    }
}
