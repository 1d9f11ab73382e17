use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{LoginRequest, LoginResponse},
    users::entities::UserRole,
};
use crate::utils::jwt;
use crate::utils::password::verify_password;

use super::AuthService;
use super::resolve::{normalize_email, resolve_role};

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();
    let email = normalize_email(&login_request.email);

    // 1. 根据邮箱获取用户信息
    match storage.get_user_by_email(&email).await {
        Ok(Some(mut user)) => {
            // 2. 验证密码
            if !verify_password(&login_request.password, &user.password_hash) {
                return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                    ErrorCode::AuthFailed,
                    "Email or password is incorrect",
                )));
            }

            // 3. 按当前名单重新解析角色，名单变动在下次登录生效
            let resolved = match resolve_role(&storage, &email).await {
                Ok(role) => role,
                Err(e) => {
                    tracing::error!("Role resolution failed for {}: {}", email, e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Login failed, unable to resolve role",
                        ),
                    ));
                }
            };

            if resolved != user.role {
                if let Err(e) = storage.update_user_role(user.id, resolved.clone()).await {
                    tracing::error!("Failed to persist role change for {}: {}", email, e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Login failed, unable to update role",
                        ),
                    ));
                }
                user.role = resolved;
            }

            // 4. 更新最后登录时间
            let _ = storage.update_last_login(user.id).await;

            // 5. 生成令牌对
            match user
                .generate_token_pair(login_request.remember_me.then(|| {
                    chrono::Duration::days(config.jwt.refresh_token_remember_me_expiry)
                }))
                .await
            {
                Ok(token_pair) => {
                    tracing::info!("User {} logged in successfully", user.email);

                    let onboarding_required = user.role == UserRole::Student && !user.onboarded;

                    let response = LoginResponse {
                        access_token: token_pair.access_token,
                        expires_in: config.jwt.access_token_expiry * 60, // 转换为秒
                        user,
                        onboarding_required,
                        created_at: chrono::Utc::now(),
                    };

                    // 6. 创建 refresh token cookie
                    let refresh_cookie =
                        jwt::JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);

                    Ok(HttpResponse::Ok()
                        .cookie(refresh_cookie)
                        .json(ApiResponse::success(response, "Login successful")))
                }
                Err(e) => {
                    tracing::error!("Failed to generate JWT token: {}", e);
                    Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Login failed, unable to generate token",
                        )),
                    )
                }
            }
        }
        Ok(None) => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            "Email or password is incorrect",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Login failed: {e}"),
            )),
        ),
    }
}
