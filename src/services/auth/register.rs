use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, users::requests::CreateUserRequest};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple};

use super::AuthService;
use super::resolve::{normalize_email, resolve_role};

pub async fn handle_register(
    service: &AuthService,
    create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let email = normalize_email(&create_request.email);

    // 1. 验证邮箱格式
    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    // 2. 验证密码策略
    if let Err(msg) = validate_password_simple(&create_request.password) {
        return Ok(
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, msg))
        );
    }

    // 3. 检查邮箱是否已存在
    if let Err(response) = check_email_exists(&storage, &email).await {
        return Ok(response);
    }

    // 4. 解析角色
    let role = match resolve_role(&storage, &email).await {
        Ok(role) => role,
        Err(e) => {
            tracing::error!("Role resolution failed for {}: {}", email, e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed, unable to resolve role",
                )),
            );
        }
    };

    // 5. 哈希密码并创建用户
    match hash_password(&create_request.password) {
        Ok(password_hash) => match storage.create_user(&email, &password_hash, role).await {
            Ok(user) => {
                tracing::info!("User {} registered as {}", user.email, user.role);
                Ok(HttpResponse::Created().json(ApiResponse::success(user, "注册成功")))
            }
            Err(e) => Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("注册失败: {e}"),
                )),
            ),
        },
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("密码哈希失败: {e}"),
            )),
        ),
    }
}

async fn check_email_exists(
    storage: &std::sync::Arc<dyn crate::storage::Storage>,
    email: &str,
) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::UserEmailAlreadyExists,
            "Email already exists",
        ))),
        Ok(None) => Ok(()),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            )),
        ),
    }
}
