//! 学生入驻
//!
//! 首次登录的学生补全姓名、学号、课程、年级。完成前学生侧的
//! 作业与提交接口都会拒绝访问。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{entities::UserRole, requests::OnboardRequest},
};
use crate::utils::validate::{validate_profile_field, validate_roll_no};

use super::AuthService;

pub async fn handle_onboard(
    service: &AuthService,
    onboard_request: OnboardRequest,
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

    // 只有学生需要入驻
    if user.role != UserRole::Student {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::<()>::error_empty(
            ErrorCode::Forbidden,
            "Only students can onboard",
        )));
    }

    // 校验档案字段
    for (field, value) in [
        ("name", &onboard_request.name),
        ("course", &onboard_request.course),
        ("year", &onboard_request.year),
    ] {
        if let Err(msg) = validate_profile_field(value) {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
                ErrorCode::BadRequest,
                format!("{field}: {msg}"),
            )));
        }
    }

    if let Err(msg) = validate_roll_no(&onboard_request.roll_no) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, msg)));
    }

    // 学号不允许与其他账号重复
    match storage.get_user_by_roll_no(&onboard_request.roll_no).await {
        Ok(Some(existing)) if existing.id != user.id => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::<()>::error_empty(
                ErrorCode::RollNoAlreadyExists,
                "Roll number already registered",
            )));
        }
        Ok(_) => {}
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Onboarding failed: {e}"),
                )),
            );
        }
    }

    match storage.onboard_user(user.id, onboard_request).await {
        Ok(Some(updated)) => {
            // 档案已变更，清掉中间件缓存的入驻前用户信息
            super::evict_cached_session(request).await;
            tracing::info!("Student {} completed onboarding", updated.email);
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Onboarding completed")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error_empty(
                ErrorCode::InternalServerError,
                format!("Onboarding failed: {e}"),
            )),
        ),
    }
}
