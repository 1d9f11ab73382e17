pub mod grade;
pub mod list;
pub mod my;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::submissions::requests::{
    CreateSubmissionRequest, GradeSubmissionRequest, SubmissionListParams,
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 学生提交作业
    pub async fn submit(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        req: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        submit::handle_submit(self, request, assignment_id, req).await
    }

    // 教师列出某作业的提交
    pub async fn list(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        params: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        list::handle_list(self, request, assignment_id, params).await
    }

    // 教师批改提交
    pub async fn grade(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        req: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::handle_grade(self, request, submission_id, req).await
    }

    // 学生查看自己的提交
    pub async fn my_submissions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        my::handle_my_submissions(self, request).await
    }

    // 学生查看自己对某作业的在册提交
    pub async fn my_submission_for_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        my::handle_my_submission_for_assignment(self, request, assignment_id).await
    }
}
