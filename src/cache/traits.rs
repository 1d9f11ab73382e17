use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheResult<T> {
    /// 命中
    Found(T),
    /// 未命中
    NotFound,
    /// 键存在但取值失败（后端异常时按未命中处理，调用方回源）
    ExistsButNoValue,
}

/// 对象缓存后端统一接口
///
/// 以字符串为值类型，结构化对象由调用方通过 serde_json 自行编解码，
/// 保持 trait 对象安全以便运行期按配置选择后端。
#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;

    /// ttl 为 0 时使用后端的默认 TTL
    async fn insert_raw(&self, key: String, value: String, ttl: u64);

    async fn remove(&self, key: &str);

    async fn invalidate_all(&self);
}
