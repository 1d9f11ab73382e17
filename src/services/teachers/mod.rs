pub mod add;
pub mod list;
pub mod remove;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::storage::Storage;

/// 教师名单服务，仅系主任可调用
pub struct TeacherService {
    storage: Option<Arc<dyn Storage>>,
}

impl TeacherService {
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

    // 列出教师名单
    pub async fn list(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::handle_list(self, request).await
    }

    // 把邮箱加入教师名单
    pub async fn add(
        &self,
        add_request: crate::models::teachers::requests::AddTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        add::handle_add(self, add_request, request).await
    }

    // 从名单移除教师
    pub async fn remove(&self, teacher_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        remove::handle_remove(self, teacher_id, request).await
    }
}
