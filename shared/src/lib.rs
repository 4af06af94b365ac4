use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const DEFAULT_TENANT: &str = "Felix";
pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const NATIVE_ASSET_TYPE: &str = "native";
pub const NATIVE_ASSET_CODE: &str = "XLM";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 钱包归属类型：个人用户或机构实体
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OwnerKind {
    #[default]
    User,
    Entity,
}

impl OwnerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerKind::User => "user",
            OwnerKind::Entity => "entity",
        }
    }
}

/// 导出的钱包密钥对（后端字段为 snake_case）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletKeys {
    pub public_key: String,
    pub secret: String,
}

/// 单个资产余额
///
/// 原生资产没有 `asset_code`，只有 `asset_type == "native"`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_code: Option<String>,
    /// 发行方公钥，原生资产没有
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_issuer: Option<String>,
    pub asset_type: String,
    pub balance: String,
}

impl Balance {
    /// 用于展示的资产名
    pub fn asset_label(&self) -> &str {
        match &self.asset_code {
            Some(code) => code,
            None if self.asset_type == NATIVE_ASSET_TYPE => NATIVE_ASSET_CODE,
            None => &self.asset_type,
        }
    }

    /// 列表渲染用的唯一键：同一代码可能来自不同发行方
    pub fn key(&self) -> String {
        format!(
            "{}:{}:{}",
            self.asset_type,
            self.asset_code.as_deref().unwrap_or_default(),
            self.asset_issuer.as_deref().unwrap_or_default()
        )
    }
}

/// 交易记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub tx_hash: String,
    #[serde(default)]
    pub actions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// 实体列表条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub name: String,
    pub email: String,
}

/// 市场挂单方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OfferSide {
    #[default]
    Buy,
    Sell,
}

impl OfferSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferSide::Buy => "buy",
            OfferSide::Sell => "sell",
        }
    }
}

// =========================================================
// 响应信封 (Response Envelope)
// =========================================================

/// 后端统一响应格式 `{ success, data?, message? }`
///
/// 部分接口（如交易记录）不返回 `success` 字段，缺省视为成功。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_balance_is_labelled_xlm() {
        let balance = Balance {
            asset_code: None,
            asset_issuer: None,
            asset_type: "native".to_string(),
            balance: "12.5000000".to_string(),
        };
        assert_eq!(balance.asset_label(), "XLM");

        let issued = Balance {
            asset_code: Some("FLX".to_string()),
            asset_issuer: Some("GISSUER".to_string()),
            asset_type: "credit_alphanum4".to_string(),
            balance: "3".to_string(),
        };
        assert_eq!(issued.asset_label(), "FLX");
    }

    #[test]
    fn same_code_from_different_issuers_keys_apart() {
        let body = r#"[
            {"asset_code":"USD","asset_issuer":"GA","asset_type":"credit_alphanum4","balance":"1"},
            {"asset_code":"USD","asset_issuer":"GB","asset_type":"credit_alphanum4","balance":"2"},
            {"asset_type":"native","balance":"3"}
        ]"#;
        let balances: Vec<Balance> = serde_json_wasm::from_str(body).unwrap();
        assert_eq!(balances[0].asset_label(), balances[1].asset_label());
        assert_ne!(balances[0].key(), balances[1].key());
        assert_eq!(balances[2].key(), "native::");
    }

    #[test]
    fn envelope_without_success_flag_counts_as_success() {
        let body = r#"{"data":[{"txHash":"abc","actions":["payment"],"createdAt":"2024-05-01T10:00:00Z"}]}"#;
        let envelope: ApiEnvelope<Vec<TransactionRecord>> = serde_json_wasm::from_str(body).unwrap();
        assert!(envelope.is_success());
        let records = envelope.data.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tx_hash, "abc");
        assert_eq!(records[0].actions, vec!["payment".to_string()]);
    }

    #[test]
    fn envelope_failure_carries_message() {
        let body = r#"{"success":false,"message":"insufficient funds"}"#;
        let envelope: ApiEnvelope<Vec<Balance>> = serde_json_wasm::from_str(body).unwrap();
        assert!(!envelope.is_success());
        assert!(envelope.data.is_none());
        assert_eq!(envelope.message.as_deref(), Some("insufficient funds"));
    }
}
