use actix_web::error::{InternalError, JsonPayloadError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析失败时的统一错误处理
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    warn!("JSON payload error on {}: {}", req.path(), err);
    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid JSON body: {e}"),
        other => format!("Invalid JSON body: {other}"),
    };
    let response =
        HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(err, response).into()
}

/// 查询参数解析失败时的统一错误处理
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    warn!("Query parameter error on {}: {}", req.path(), err);
    let message = format!("Invalid query parameters: {err}");
    let response =
        HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(err, response).into()
}
