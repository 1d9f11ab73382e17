use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, GradeSubmissionRequest, SubmissionListParams,
};
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;
use crate::utils::{SafeAssignmentIdI64, SafeSubmissionIdI64};

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 学生提交作业
pub async fn submit(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .submit(&req, path.0, body.into_inner())
        .await
}

// 列出某作业的提交
pub async fn list_submissions(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list(&req, path.0, query.into_inner())
        .await
}

// 批改提交
pub async fn grade_submission(
    req: HttpRequest,
    path: SafeSubmissionIdI64,
    body: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade(&req, path.0, body.into_inner())
        .await
}

// 学生查看自己的全部提交
pub async fn my_submissions(req: HttpRequest) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE.my_submissions(&req).await
}

// 学生查看自己对某作业的提交
pub async fn my_submission_for_assignment(
    req: HttpRequest,
    path: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .my_submission_for_assignment(&req, path.0)
        .await
}

// 配置路由
pub fn configure_submission_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            // 学生查看自己的提交
            .service(
                web::resource("/my")
                    .route(web::get().to(my_submissions))
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
            )
            // 学生查看自己对某作业的提交
            .service(
                web::resource("/assignment/{assignment_id}/my")
                    .route(web::get().to(my_submission_for_assignment))
                    .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
            )
            .service(
                web::resource("/assignment/{assignment_id}")
                    // 提交作业 - 仅学生
                    .route(
                        web::post()
                            .to(submit)
                            .wrap(middlewares::RequireRole::new_any(UserRole::student_roles())),
                    )
                    // 列出提交 - 仅教师和系主任（业务层校验创建者）
                    .route(
                        web::get()
                            .to(list_submissions)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            )
            // 批改 - 仅教师（业务层校验创建者，系主任不参与批改）
            .service(
                web::resource("/{submission_id}/grade")
                    .route(web::post().to(grade_submission))
                    .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
            ),
    );
}
