//! 本地钱包密钥缓存
//!
//! 每个邮箱一个键：`stellar_account_{email}`，值为 `{"publicKey": .., "secretKey": ..}`。

use std::rc::Rc;

use felix_shared::WalletKeys;
use serde::{Deserialize, Serialize};

use crate::web::KeyValueStore;

const ACCOUNT_KEY_PREFIX: &str = "stellar_account_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountKeys {
    pub public_key: String,
    pub secret_key: String,
}

impl From<WalletKeys> for AccountKeys {
    fn from(keys: WalletKeys) -> Self {
        Self {
            public_key: keys.public_key,
            secret_key: keys.secret,
        }
    }
}

#[derive(Clone)]
pub struct AccountKeyStore {
    storage: Rc<dyn KeyValueStore>,
}

impl AccountKeyStore {
    pub fn new(storage: Rc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    fn key(email: &str) -> String {
        format!("{ACCOUNT_KEY_PREFIX}{email}")
    }

    /// 读取缓存的密钥，格式损坏时视为不存在
    pub fn get(&self, email: &str) -> Option<AccountKeys> {
        let raw = self.storage.get(&Self::key(email))?;
        match serde_json_wasm::from_str(&raw) {
            Ok(keys) => Some(keys),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed cached account keys");
                None
            }
        }
    }

    pub fn put(&self, email: &str, keys: &AccountKeys) -> bool {
        match serde_json_wasm::to_string(keys) {
            Ok(json) => self.storage.set(&Self::key(email), &json),
            Err(e) => {
                tracing::error!(error = %e, "failed to encode account keys");
                false
            }
        }
    }

    pub fn remove(&self, email: &str) -> bool {
        self.storage.remove(&Self::key(email))
    }

    /// 把导出结果中的第一组密钥写入缓存
    pub fn import(&self, email: &str, exported: Vec<WalletKeys>) -> Option<AccountKeys> {
        let keys: AccountKeys = exported.into_iter().next()?.into();
        self.put(email, &keys).then_some(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::storage::tests::MemoryStore;

    fn store() -> (Rc<MemoryStore>, AccountKeyStore) {
        let memory = Rc::new(MemoryStore::new());
        let keys = AccountKeyStore::new(memory.clone());
        (memory, keys)
    }

    fn sample() -> AccountKeys {
        AccountKeys {
            public_key: "GABC".to_string(),
            secret_key: "SXYZ".to_string(),
        }
    }

    #[test]
    fn put_then_get_uses_email_scoped_key() {
        let (memory, keys) = store();
        assert!(keys.put("Alice@Felix.test", &sample()));

        let raw = memory.get("stellar_account_Alice@Felix.test").unwrap();
        assert_eq!(raw, r#"{"publicKey":"GABC","secretKey":"SXYZ"}"#);
        assert_eq!(keys.get("Alice@Felix.test"), Some(sample()));
        assert_eq!(keys.get("alice@felix.test"), None);
        assert_eq!(keys.get("bob@felix.test"), None);
    }

    #[test]
    fn malformed_entry_reads_as_missing() {
        let memory = Rc::new(MemoryStore::new().with_entry("stellar_account_a@b.c", "{oops"));
        let keys = AccountKeyStore::new(memory);
        assert_eq!(keys.get("a@b.c"), None);
    }

    #[test]
    fn import_takes_first_exported_pair() {
        let (_, keys) = store();
        let exported = vec![
            WalletKeys {
                public_key: "GABC".to_string(),
                secret: "SXYZ".to_string(),
            },
            WalletKeys {
                public_key: "GOTHER".to_string(),
                secret: "SOTHER".to_string(),
            },
        ];
        assert_eq!(keys.import("a@b.c", exported), Some(sample()));
        assert_eq!(keys.get("a@b.c"), Some(sample()));
        assert_eq!(keys.import("x@y.z", Vec::new()), None);
    }

    #[test]
    fn remove_clears_entry() {
        let (_, keys) = store();
        keys.put("a@b.c", &sample());
        keys.remove("a@b.c");
        assert_eq!(keys.get("a@b.c"), None);
    }
}
