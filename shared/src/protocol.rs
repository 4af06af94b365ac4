use crate::{Balance, EntitySummary, OfferSide, OwnerKind, TransactionRecord, WalletKeys};
use serde::{Deserialize, Serialize, de::DeserializeOwned, de::IgnoredAny};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

/// 无需关心返回数据的写操作确认
pub type Ack = IgnoredAny;

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Paths are built per request because most endpoints embed an email or tenant.
pub trait ApiRequest: Serialize {
    /// The type carried in the envelope's `data` field.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path including any query string.
    fn path(&self) -> String;
}

fn encode(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

// =========================================================
// Wallet
// =========================================================

/// Export the keypair(s) of a user wallet, or of an entity wallet when `entity_name` is set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportWalletRequest {
    pub email: String,
    #[serde(rename = "entityName", skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
}

impl ApiRequest for ExportWalletRequest {
    type Response = Vec<WalletKeys>;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v1/wallets/export".to_string()
    }
}

/// Balances of a user or entity wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceQuery {
    #[serde(skip)]
    pub owner: OwnerKind,
    #[serde(skip)]
    pub email: String,
    #[serde(skip)]
    pub creator_email: Option<String>,
}

impl ApiRequest for BalanceQuery {
    type Response = Vec<Balance>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        let mut path = format!(
            "/api/v1/wallets/balance/type/{}/{}",
            self.owner.as_str(),
            encode(&self.email)
        );
        if let Some(creator) = &self.creator_email {
            path.push_str("?creatorEmail=");
            path.push_str(&encode(creator));
        }
        path
    }
}

/// Transaction history of a user wallet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsQuery {
    #[serde(skip)]
    pub email: String,
}

impl ApiRequest for TransactionsQuery {
    type Response = Vec<TransactionRecord>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/v1/wallets/transactions/type/user/{}", encode(&self.email))
    }
}

/// Send a payment from the signed-in user's wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendPaymentRequest {
    pub recipient: String,
    pub amount: String,
    pub memo: String,
    pub sender_email: String,
}

impl ApiRequest for SendPaymentRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v1/wallets/send".to_string()
    }
}

/// Issue an amount of a custom asset to a recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueAssetRequest {
    pub asset_code: String,
    pub amount: String,
    pub recipient_email: String,
    pub issuer_email: String,
}

impl ApiRequest for IssueAssetRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v1/wallets/issue".to_string()
    }
}

// =========================================================
// Assets
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetRequest {
    pub asset_code: String,
    pub name: String,
    pub description: String,
    pub creator_email: String,
}

impl ApiRequest for CreateAssetRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/v1/assets/create".to_string()
    }
}

// =========================================================
// Tenant users & entities
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(skip)]
    pub tenant: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl ApiRequest for CreateUserRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/v1/tenants/{}/users", encode(&self.tenant))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntityRequest {
    #[serde(skip)]
    pub tenant: String,
    pub name: String,
    pub email: String,
    pub creator_email: String,
}

impl ApiRequest for CreateEntityRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/v1/tenants/{}/entity/create", encode(&self.tenant))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEntitiesRequest {
    #[serde(skip)]
    pub tenant: String,
    #[serde(skip)]
    pub creator_email: String,
}

impl ApiRequest for ListEntitiesRequest {
    type Response = Vec<EntitySummary>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!(
            "/api/v1/tenants/{}/entity/list?creatorEmail={}",
            encode(&self.tenant),
            encode(&self.creator_email)
        )
    }
}

// =========================================================
// Marketplace
// =========================================================

/// Place a buy or sell offer; the side selects the endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRequest {
    #[serde(skip)]
    pub side: OfferSide,
    pub email: String,
    pub selling_asset: String,
    pub buying_asset: String,
    pub amount: String,
    pub price: String,
}

impl ApiRequest for OfferRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/v1/offers/{}", self.side.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_path_encodes_email_and_creator() {
        let query = BalanceQuery {
            owner: OwnerKind::Entity,
            email: "ops+1@felix.io".to_string(),
            creator_email: Some("sam@x.com".to_string()),
        };
        assert_eq!(
            query.path(),
            "/api/v1/wallets/balance/type/entity/ops%2B1%40felix.io?creatorEmail=sam%40x.com"
        );
    }

    #[test]
    fn user_balance_path_has_no_query() {
        let query = BalanceQuery {
            owner: OwnerKind::User,
            email: "sam@x.com".to_string(),
            creator_email: None,
        };
        assert_eq!(query.path(), "/api/v1/wallets/balance/type/user/sam%40x.com");
    }

    #[test]
    fn tenant_paths_use_tenant_segment() {
        let user = CreateUserRequest {
            tenant: "Felix".to_string(),
            username: "sam".to_string(),
            email: "sam@x.com".to_string(),
            first_name: String::new(),
            last_name: String::new(),
        };
        assert_eq!(user.path(), "/api/v1/tenants/Felix/users");

        let list = ListEntitiesRequest {
            tenant: "Felix".to_string(),
            creator_email: "sam@x.com".to_string(),
        };
        assert_eq!(
            list.path(),
            "/api/v1/tenants/Felix/entity/list?creatorEmail=sam%40x.com"
        );
    }

    #[test]
    fn send_payment_body_uses_camel_case() {
        let req = SendPaymentRequest {
            recipient: "GABC".to_string(),
            amount: "10".to_string(),
            memo: "rent".to_string(),
            sender_email: "sam@x.com".to_string(),
        };
        let body = serde_json_wasm::to_string(&req).unwrap();
        assert_eq!(
            body,
            r#"{"recipient":"GABC","amount":"10","memo":"rent","senderEmail":"sam@x.com"}"#
        );
    }

    #[test]
    fn offer_side_selects_endpoint_and_is_not_serialized() {
        let req = OfferRequest {
            side: OfferSide::Sell,
            email: "sam@x.com".to_string(),
            selling_asset: "FLX".to_string(),
            buying_asset: "XLM".to_string(),
            amount: "5".to_string(),
            price: "0.5".to_string(),
        };
        assert_eq!(req.path(), "/api/v1/offers/sell");
        let body = serde_json_wasm::to_string(&req).unwrap();
        assert!(!body.contains("side"));
    }

    #[test]
    fn export_request_omits_missing_entity() {
        let req = ExportWalletRequest {
            email: "sam@x.com".to_string(),
            entity_name: None,
        };
        assert_eq!(serde_json_wasm::to_string(&req).unwrap(), r#"{"email":"sam@x.com"}"#);
    }
}
