use std::collections::HashSet;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{RosterService, roster_entry, split_roster};
use crate::middlewares::RequireJWT;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode, roster::responses::RosterResponse};

/// 名册查询：allotted 为受众全集，remaining 为其中未提交者
pub async fn handle_roster(
    service: &RosterService,
    request: &HttpRequest,
    assignment_id: i64,
    allotted: bool,
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
                    format!("Failed to compute roster: {e}"),
                )),
            );
        }
    };

    // 权限检查：只有作业创建者或系主任可以查看名册
    match user.role {
        UserRole::Hod => {}
        UserRole::Teacher if assignment.created_by == user.id => {}
        _ => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
                ErrorCode::Forbidden,
                "Only the assignment creator or the HOD can view the roster",
            )));
        }
    }

    let students = match storage
        .list_students_by_audience(&assignment.course, &assignment.year)
        .await
    {
        Ok(students) => students,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to compute roster: {e}"),
                )),
            );
        }
    };

    let items = if allotted {
        students.into_iter().map(roster_entry).collect::<Vec<_>>()
    } else {
        let submitted_ids: HashSet<i64> =
            match storage.list_submitted_student_ids(assignment_id).await {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::<()>::error_empty(
                            ErrorCode::InternalServerError,
                            format!("Failed to compute roster: {e}"),
                        ),
                    ));
                }
            };
        let (_, remaining) = split_roster(students, &submitted_ids);
        remaining
    };

    let response = RosterResponse {
        total: items.len() as i64,
        items,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Roster retrieved successfully",
    )))
}
