pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明一个对象缓存插件并在程序启动时注册到全局注册表
///
/// 用法：`declare_object_cache_plugin!("moka", MokaCacheWrapper);`
/// 要求类型提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $plugin:ty) => {
        ::paste::paste! {
            #[ctor::ctor]
            fn [<__register_object_cache_ $plugin:snake>]() {
                $crate::cache::register::register_object_cache_plugin(
                    $name,
                    std::sync::Arc::new(|| {
                        Box::pin(async {
                            let cache = <$plugin>::new()
                                .map_err($crate::errors::AssignHubError::cache_connection)?;
                            Ok(Box::new(cache) as Box<dyn $crate::cache::ObjectCache>)
                        })
                            as $crate::cache::register::BoxedObjectCacheFuture
                    }),
                );
            }
        }
    };
}
