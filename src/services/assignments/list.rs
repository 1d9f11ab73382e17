use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{
    ApiResponse, ErrorCode,
    assignments::requests::{AssignmentListParams, AssignmentListQuery},
};

/// 列出作业，视角由角色决定
///
/// 系主任看到全部，教师只看到自己创建的，学生只看到自己
/// (course, year) 受众内的作业。
pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    params: AssignmentListParams,
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

    let mut query = AssignmentListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        created_by: None,
        audience: None,
        exclude_submitted_by: None,
    };

    match user.role {
        UserRole::Hod => {}
        UserRole::Teacher => {
            query.created_by = Some(user.id);
        }
        UserRole::Student => {
            // 未入驻的学生还没有受众归属
            let (course, year) = match (user.profile.course, user.profile.year) {
                (Some(course), Some(year)) if user.onboarded => (course, year),
                _ => {
                    return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
                        ErrorCode::UserNotOnboarded,
                        "Complete onboarding to view assignments",
                    )));
                }
            };
            query.audience = Some((course, year));
            // remaining=true 时只看自己还没交的
            if params.remaining {
                query.exclude_submitted_by = Some(user.id);
            }
        }
    }

    match storage.list_assignments_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Assignments retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list assignments: {e}"),
            )),
        ),
    }
}
