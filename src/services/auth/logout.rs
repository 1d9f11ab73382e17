use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 处理用户登出
///
/// 清除 refresh_token cookie，并让缓存的用户信息立即失效。
pub async fn handle_logout(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 移除缓存中的用户信息，access token 在剩余有效期内不再命中
    super::evict_cached_session(request).await;

    // max_age=0 会让浏览器删除该 cookie
    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::<()>::success_empty("登出成功")))
}
