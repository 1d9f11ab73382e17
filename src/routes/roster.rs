use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::roster::requests::RosterExportParams;
use crate::models::users::entities::UserRole;
use crate::services::RosterService;
use crate::utils::SafeAssignmentIdI64;

// 懒加载的全局 RosterService 实例
static ROSTER_SERVICE: Lazy<RosterService> = Lazy::new(RosterService::new_lazy);

// 受众全集名单
pub async fn allotted(req: HttpRequest, path: SafeAssignmentIdI64) -> ActixResult<HttpResponse> {
    ROSTER_SERVICE.allotted(&req, path.0).await
}

// 未提交名单
pub async fn remaining(req: HttpRequest, path: SafeAssignmentIdI64) -> ActixResult<HttpResponse> {
    ROSTER_SERVICE.remaining(&req, path.0).await
}

// 导出名册
pub async fn export(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
    query: web::Query<RosterExportParams>,
) -> ActixResult<HttpResponse> {
    ROSTER_SERVICE.export(&req, path.0, query.into_inner()).await
}

// 配置路由
pub fn configure_roster_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        // 名册只对教学侧开放（业务层校验创建者）
        web::scope("/api/v1/roster")
            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles()))
            .wrap(middlewares::RequireJWT)
            .route("/{assignment_id}/allotted", web::get().to(allotted))
            .route("/{assignment_id}/remaining", web::get().to(remaining))
            .route("/{assignment_id}/export", web::get().to(export)),
    );
}
