use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::teachers::requests::AddTeacherRequest;
use crate::models::users::entities::UserRole;
use crate::services::TeacherService;
use crate::utils::SafeIDI64;

// 懒加载的全局 TeacherService 实例
static TEACHER_SERVICE: Lazy<TeacherService> = Lazy::new(TeacherService::new_lazy);

// 列出教师名单
pub async fn list_teachers(req: HttpRequest) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.list(&req).await
}

// 把邮箱加入教师名单
pub async fn add_teacher(
    req: HttpRequest,
    body: web::Json<AddTeacherRequest>,
) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.add(body.into_inner(), &req).await
}

// 从名单移除教师
pub async fn remove_teacher(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    TEACHER_SERVICE.remove(path.0, &req).await
}

// 配置路由
pub fn configure_teacher_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        // 教师名单只有系主任可以管理
        web::scope("/api/v1/teachers")
            .wrap(middlewares::RequireRole::new_any(UserRole::hod_roles()))
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_teachers))
                    .route(web::post().to(add_teacher)),
            )
            .service(web::resource("/{id}").route(web::delete().to(remove_teacher))),
    );
}
