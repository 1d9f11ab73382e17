use std::future::{Ready, ready};

use actix_web::error::InternalError;
use actix_web::{Error, FromRequest, HttpRequest, HttpResponse, dev::Payload};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: impl Into<String>) -> Error {
    let message = message.into();
    let response =
        HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(message, response).into()
}

/// 定义安全的 i64 路径参数提取器
///
/// 解析失败或非正数的 ID 统一返回 400，避免在各个 handler 里重复判错。
macro_rules! define_safe_id_i64 {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl std::ops::Deref for $name {
            type Target = i64;

            fn deref(&self) -> &i64 {
                &self.0
            }
        }

        impl FromRequest for $name {
            type Error = Error;
            type Future = Ready<Result<Self, Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0)
                    .map($name)
                    .ok_or_else(|| {
                        bad_request(format!("Invalid path parameter: {}", $param))
                    });
                ready(parsed)
            }
        }
    };
}

define_safe_id_i64!(SafeIDI64, "id");
define_safe_id_i64!(SafeAssignmentIdI64, "assignment_id");
define_safe_id_i64!(SafeSubmissionIdI64, "submission_id");

/// 安全的文件下载令牌提取器
///
/// 令牌格式为 "{millis}-{uuid}"，只允许字母、数字和连字符，
/// 防止路径穿越类的恶意输入进入文件层。
#[derive(Debug, Clone)]
pub struct SafeFileToken(pub String);

impl std::ops::Deref for SafeFileToken {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl FromRequest for SafeFileToken {
    type Error = Error;
    type Future = Ready<Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let parsed = req
            .match_info()
            .get("token")
            .filter(|raw| {
                !raw.is_empty()
                    && raw.len() <= 128
                    && raw
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-')
            })
            .map(|raw| SafeFileToken(raw.to_string()))
            .ok_or_else(|| bad_request("Invalid file token"));
        ready(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};

    async fn echo_id(id: SafeIDI64) -> HttpResponse {
        HttpResponse::Ok().body(id.to_string())
    }

    async fn echo_token(token: SafeFileToken) -> HttpResponse {
        HttpResponse::Ok().body(token.0.clone())
    }

    #[actix_web::test]
    async fn test_safe_id_accepts_positive_integer() {
        let app =
            test::init_service(App::new().route("/items/{id}", web::get().to(echo_id))).await;
        let req = test::TestRequest::get().uri("/items/42").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_safe_id_rejects_non_numeric_and_non_positive() {
        let app =
            test::init_service(App::new().route("/items/{id}", web::get().to(echo_id))).await;
        for path in ["/items/abc", "/items/0", "/items/-3"] {
            let req = test::TestRequest::get().uri(path).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn test_safe_file_token_rejects_path_traversal() {
        let app =
            test::init_service(App::new().route("/files/{token}", web::get().to(echo_token)))
                .await;
        let req = test::TestRequest::get()
            .uri("/files/..%2F..%2Fetc")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
