//! 对象缓存
//!
//! 缓存后端以插件形式注册，启动时按 `cache.type` 选择。

pub mod object_cache;
pub mod register;
pub mod traits;

pub use traits::{CacheResult, ObjectCache};

/// 声明一个缓存插件，程序加载时自动注册到插件表
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        #[ctor::ctor]
        unsafe fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                std::sync::Arc::new(|| -> $crate::cache::register::BoxedObjectCacheFuture {
                    Box::pin(async {
                        let cache = <$ty>::new()
                            .map_err($crate::errors::DRLSystemError::cache_connection)?;
                        let boxed: Box<dyn $crate::cache::ObjectCache> = Box::new(cache);
                        Ok::<_, $crate::errors::DRLSystemError>(boxed)
                    })
                }),
            );
        }
    };
}

/// 缓存键
pub mod keys {
    /// 认证后的调用方，按令牌缓存
    pub fn principal(token: &str) -> String {
        format!("principal:{token}")
    }

    /// 启用中的大类与标准结构
    pub const CRITERIA_STRUCTURE: &str = "criteria:structure";
}
