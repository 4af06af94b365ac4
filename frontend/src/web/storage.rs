//! 持久化存储模块
//!
//! 使用 `web_sys::Storage` 提供浏览器 LocalStorage 访问，并通过 `KeyValueStore`
//! 抽象出来，使资料缓存和钱包密钥缓存可以在宿主机测试中替换为内存实现。

/// 抽象键值存储接口
///
/// 所有写入都是整值覆盖，不支持部分更新。
pub trait KeyValueStore {
    /// 获取存储的字符串值，键不存在或发生错误时返回 `None`
    fn get(&self, key: &str) -> Option<String>;
    /// 设置存储值，返回是否成功
    fn set(&self, key: &str, value: &str) -> bool;
    /// 删除存储的键值对，返回是否成功
    fn remove(&self, key: &str) -> bool;
}

/// 浏览器 LocalStorage
///
/// 无法访问 LocalStorage 时（隐私模式、非浏览器环境）所有读取返回 `None`，
/// 写入返回 `false`。
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) -> bool {
        let ok = Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some();
        if !ok {
            tracing::warn!(key, "localStorage write failed");
        }
        ok
    }

    fn remove(&self, key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

// =========================================================
// 测试环境实现 (Mock)
// =========================================================
