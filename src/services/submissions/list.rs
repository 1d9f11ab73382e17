use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{
    ApiResponse, ErrorCode,
    submissions::requests::{SubmissionListParams, SubmissionListQuery},
};

/// 教师列出某作业的提交，corrected 参数切换待批改/已批改队列
pub async fn handle_list(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
    params: SubmissionListParams,
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

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to list submissions: {e}"),
                )),
            );
        }
    };

    // 权限检查：只有作业创建者或系主任可以查看提交列表
    match user.role {
        UserRole::Hod => {}
        UserRole::Teacher if assignment.created_by == user.id => {}
        _ => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
                ErrorCode::Forbidden,
                "Only the assignment creator or the HOD can view submissions",
            )));
        }
    }

    let query = SubmissionListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        assignment_id,
        corrected: params.corrected,
    };

    match storage.list_submissions_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
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
