//! 用户资料存储
//!
//! 展示身份 `{username, email}` 的唯一来源。启动时从持久化存储加载，
//! 每次写入都持久化完整的合并结果。

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::identity::IdentityProfile;
use crate::web::KeyValueStore;

pub const STORAGE_PROFILE_KEY: &str = "user";
pub const GUEST_USERNAME: &str = "Guest";

/// 展示用的用户资料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            username: GUEST_USERNAME.to_string(),
            email: String::new(),
        }
    }
}

impl UserProfile {
    pub fn is_guest(&self) -> bool {
        *self == Self::default()
    }
}

/// 资料的部分更新，`None` 字段保持原值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfilePatch {
    pub username: Option<String>,
    pub email: Option<String>,
}

impl ProfilePatch {
    pub fn username(value: impl Into<String>) -> Self {
        Self {
            username: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn email(value: impl Into<String>) -> Self {
        Self {
            email: Some(value.into()),
            ..Self::default()
        }
    }
}

impl From<IdentityProfile> for ProfilePatch {
    fn from(profile: IdentityProfile) -> Self {
        Self {
            username: profile.username,
            email: profile.email,
        }
    }
}

/// 用户资料存储
///
/// 单线程共享：内部用 `RefCell` 持有当前值，写入顺序即生效顺序（后写覆盖先写）。
#[derive(Clone)]
pub struct ProfileStore {
    current: Rc<RefCell<UserProfile>>,
    storage: Rc<dyn KeyValueStore>,
}

impl ProfileStore {
    /// 打开存储，若持久化值存在且格式正确则作为初始值
    pub fn open(storage: Rc<dyn KeyValueStore>) -> Self {
        let initial = match storage.get(STORAGE_PROFILE_KEY) {
            Some(raw) => match serde_json_wasm::from_str::<UserProfile>(&raw) {
                Ok(profile) => profile,
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring malformed stored profile");
                    UserProfile::default()
                }
            },
            None => UserProfile::default(),
        };

        Self {
            current: Rc::new(RefCell::new(initial)),
            storage,
        }
    }

    pub fn read(&self) -> UserProfile {
        self.current.borrow().clone()
    }

    /// 合并写入并持久化完整对象，返回合并后的值
    pub fn write(&self, patch: ProfilePatch) -> UserProfile {
        let merged = {
            let mut current = self.current.borrow_mut();
            if let Some(username) = patch.username {
                current.username = username;
            }
            if let Some(email) = patch.email {
                current.email = email;
            }
            current.clone()
        };
        self.persist(&merged);
        merged
    }

    /// 清除持久化资料并恢复访客默认值
    pub fn reset(&self) -> UserProfile {
        let profile = UserProfile::default();
        *self.current.borrow_mut() = profile.clone();
        self.storage.remove(STORAGE_PROFILE_KEY);
        profile
    }

    fn persist(&self, profile: &UserProfile) {
        match serde_json_wasm::to_string(profile) {
            Ok(raw) => {
                self.storage.set(STORAGE_PROFILE_KEY, &raw);
            }
            Err(e) => tracing::error!(error = %e, "failed to serialize profile"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::storage::tests::MemoryStore;

    fn store_with(memory: Rc<MemoryStore>) -> ProfileStore {
        ProfileStore::open(memory)
    }

    #[test]
    fn cold_start_reads_stored_profile() {
        let memory = Rc::new(
            MemoryStore::new().with_entry("user", r#"{"username":"Sam","email":"sam@x.com"}"#),
        );
        let store = store_with(memory);
        assert_eq!(
            store.read(),
            UserProfile {
                username: "Sam".to_string(),
                email: "sam@x.com".to_string(),
            }
        );
    }

    #[test]
    fn malformed_stored_profile_falls_back_to_guest() {
        let memory = Rc::new(MemoryStore::new().with_entry("user", "{not json"));
        let store = store_with(memory);
        assert!(store.read().is_guest());
    }

    #[test]
    fn writes_merge_and_persist_in_call_order() {
        let memory = Rc::new(MemoryStore::new());
        let store = store_with(memory.clone());

        store.write(ProfilePatch::username("A"));
        let merged = store.write(ProfilePatch::email("b@x.com"));

        assert_eq!(merged.username, "A");
        assert_eq!(merged.email, "b@x.com");

        let writes = memory.writes.borrow();
        assert_eq!(writes.len(), 2);
        let first: UserProfile = serde_json_wasm::from_str(&writes[0].1).unwrap();
        let second: UserProfile = serde_json_wasm::from_str(&writes[1].1).unwrap();
        assert_eq!(first.username, "A");
        assert_eq!(first.email, "");
        assert_eq!(second, merged);
    }

    #[test]
    fn repeated_identical_write_is_idempotent() {
        let memory = Rc::new(MemoryStore::new());
        let store = store_with(memory);
        let once = store.write(ProfilePatch::username("A"));
        let twice = store.write(ProfilePatch::username("A"));
        assert_eq!(once, twice);
    }

    #[test]
    fn reset_removes_durable_entry() {
        let memory = Rc::new(
            MemoryStore::new().with_entry("user", r#"{"username":"Sam","email":"sam@x.com"}"#),
        );
        let store = store_with(memory.clone());
        let profile = store.reset();
        assert!(profile.is_guest());
        assert!(store.read().is_guest());
        assert!(memory.get("user").is_none());
    }

    #[test]
    fn clones_share_the_same_profile() {
        let memory = Rc::new(MemoryStore::new());
        let store = store_with(memory);
        let other = store.clone();
        store.write(ProfilePatch::username("A"));
        assert_eq!(other.read().username, "A");
    }
}
