pub mod login;
pub mod logout;
pub mod onboard;
pub mod register;
pub mod resolve;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
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

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 登录验证
    pub async fn login(
        &self,
        login_request: crate::models::auth::LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    // 用户注册
    pub async fn register(
        &self,
        create_request: crate::models::users::requests::CreateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, create_request, request).await
    }

    // 学生入驻
    pub async fn onboard(
        &self,
        onboard_request: crate::models::users::requests::OnboardRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        onboard::handle_onboard(self, onboard_request, request).await
    }

    // 刷新令牌
    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request).await
    }

    // 验证令牌
    pub async fn verify_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_verify_token(self, request).await
    }

    // 获取当前用户信息
    pub async fn get_user(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_get_user(self, request).await
    }

    // 注销
    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(self, request).await
    }
}

/// 让当前 access token 对应的缓存用户条目立即失效
///
/// 档案或会话变更（入驻、登出）后调用，否则同一令牌在 TTL 内
/// 会继续命中变更前的用户信息。
pub(crate) async fn evict_cached_session(request: &HttpRequest) {
    if let Some(token) = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        && let Some(cache) = request.app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
    {
        cache.remove(&format!("user:{token}")).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheResult;
    use actix_web::{test, web};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapCache {
        entries: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl ObjectCache for MapCache {
        async fn get_raw(&self, key: &str) -> CacheResult<String> {
            match self.entries.lock().unwrap().get(key) {
                Some(value) => CacheResult::Found(value.clone()),
                None => CacheResult::NotFound,
            }
        }

        async fn insert_raw(&self, key: String, value: String, _ttl: u64) {
            self.entries.lock().unwrap().insert(key, value);
        }

        async fn remove(&self, key: &str) {
            self.entries.lock().unwrap().remove(key);
        }

        async fn invalidate_all(&self) {
            self.entries.lock().unwrap().clear();
        }
    }

    #[actix_web::test]
    async fn test_evict_cached_session_removes_token_entry() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MapCache::default());
        cache
            .insert_raw("user:tok-1".to_string(), "{}".to_string(), 0)
            .await;

        let request = test::TestRequest::default()
            .insert_header(("Authorization", "Bearer tok-1"))
            .app_data(web::Data::new(cache.clone()))
            .to_http_request();

        evict_cached_session(&request).await;

        assert_eq!(cache.get_raw("user:tok-1").await, CacheResult::NotFound);
    }

    #[actix_web::test]
    async fn test_evict_cached_session_without_token_keeps_cache() {
        let cache: Arc<dyn ObjectCache> = Arc::new(MapCache::default());
        cache
            .insert_raw("user:tok-1".to_string(), "{}".to_string(), 0)
            .await;

        let request = test::TestRequest::default()
            .app_data(web::Data::new(cache.clone()))
            .to_http_request();

        evict_cached_session(&request).await;

        assert_eq!(
            cache.get_raw("user:tok-1").await,
            CacheResult::Found("{}".to_string())
        );
    }
}
