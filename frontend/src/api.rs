use felix_shared::protocol::{
    Ack, ApiRequest, BalanceQuery, CreateAssetRequest, CreateEntityRequest, CreateUserRequest,
    ExportWalletRequest, HttpMethod, IssueAssetRequest, ListEntitiesRequest, OfferRequest,
    SendPaymentRequest, TransactionsQuery,
};
use felix_shared::{
    ApiEnvelope, Balance, EntitySummary, HEADER_AUTHORIZATION, OwnerKind, TransactionRecord,
    WalletKeys,
};
use gloo_net::http::Request;
use leptos::prelude::*;
use serde::de::value::{Error as ValueError, UnitDeserializer};
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use crate::error::ApiError;
use crate::session::SessionContext;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FelixApi {
    pub base_url: String,
    pub tenant: String,
    pub token: Option<String>,
}

impl FelixApi {
    pub fn new(base_url: String, tenant: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            base_url,
            tenant,
            token: None,
        }
    }

    /// 携带当前会话令牌的副本
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            token,
            ..self.clone()
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    // 认证头
    fn auth_header(&self) -> Result<String, ApiError> {
        self.token
            .as_ref()
            .map(|t| format!("Bearer {t}"))
            .ok_or(ApiError::Unauthenticated)
    }

    /// 发送任意 `ApiRequest` 并解出信封中的 `data`
    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let url = self.url(&request.path());
        let auth = self.auth_header()?;

        let response = match R::METHOD {
            HttpMethod::Get => Request::get(&url)
                .header(HEADER_AUTHORIZATION, &auth)
                .send()
                .await,
            HttpMethod::Post => {
                let body = serde_json_wasm::to_string(request)
                    .map_err(|e| ApiError::Decode(e.to_string()))?;
                Request::post(&url)
                    .header(HEADER_AUTHORIZATION, &auth)
                    .header("Content-Type", "application/json")
                    .body(body)
                    .map_err(|e| ApiError::Network(e.to_string()))?
                    .send()
                    .await
            }
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let ok = response.ok();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let result = decode_response::<R::Response>(status, ok, &body);
        if let Err(e) = &result {
            tracing::warn!(path = %request.path(), error = %e, "api request failed");
        }
        result
    }

    // =========================================================
    // Wallet
    // =========================================================

    /// 获取余额
    pub async fn balances(
        &self,
        owner: OwnerKind,
        email: &str,
        creator_email: Option<&str>,
    ) -> Result<Vec<Balance>, ApiError> {
        self.send(&BalanceQuery {
            owner,
            email: email.to_string(),
            creator_email: creator_email.map(str::to_string),
        })
        .await
    }

    /// 获取交易记录
    pub async fn transactions(&self, email: &str) -> Result<Vec<TransactionRecord>, ApiError> {
        self.send(&TransactionsQuery {
            email: email.to_string(),
        })
        .await
    }

    /// 导出钱包密钥
    pub async fn export_wallet(
        &self,
        email: &str,
        entity_name: Option<&str>,
    ) -> Result<Vec<WalletKeys>, ApiError> {
        self.send(&ExportWalletRequest {
            email: email.to_string(),
            entity_name: entity_name.map(str::to_string),
        })
        .await
    }

    pub async fn send_payment(&self, request: &SendPaymentRequest) -> Result<Ack, ApiError> {
        self.send(request).await
    }

    pub async fn issue_asset(&self, request: &IssueAssetRequest) -> Result<Ack, ApiError> {
        self.send(request).await
    }

    // =========================================================
    // Admin
    // =========================================================

    pub async fn create_asset(&self, request: &CreateAssetRequest) -> Result<Ack, ApiError> {
        self.send(request).await
    }

    /// 在当前租户下创建用户
    pub async fn create_user(&self, mut request: CreateUserRequest) -> Result<Ack, ApiError> {
        request.tenant = self.tenant.clone();
        self.send(&request).await
    }

    /// 在当前租户下创建实体
    pub async fn create_entity(&self, mut request: CreateEntityRequest) -> Result<Ack, ApiError> {
        request.tenant = self.tenant.clone();
        self.send(&request).await
    }

    pub async fn list_entities(&self, creator_email: &str) -> Result<Vec<EntitySummary>, ApiError> {
        self.send(&ListEntitiesRequest {
            tenant: self.tenant.clone(),
            creator_email: creator_email.to_string(),
        })
        .await
    }

    // =========================================================
    // Marketplace
    // =========================================================

    pub async fn place_offer(&self, request: &OfferRequest) -> Result<Ack, ApiError> {
        self.send(request).await
    }
}

// =========================================================
// Context
// =========================================================

/// 组件侧的 API 入口：每次取客户端时都附上最新的访问令牌
#[derive(Clone, Copy)]
pub struct ApiContext {
    base: StoredValue<FelixApi>,
    session: SessionContext,
}

impl ApiContext {
    pub fn client(&self) -> FelixApi {
        let token = self.session.token();
        self.base.with_value(|api| api.with_token(token))
    }

    /// 当前登录用户的邮箱（未加载资料时为空串）
    pub fn email(&self) -> String {
        self.session.profile().with_untracked(|p| p.email.clone())
    }
}

pub fn provide_api(api: FelixApi, session: SessionContext) -> ApiContext {
    let ctx = ApiContext {
        base: StoredValue::new(api),
        session,
    };
    provide_context(ctx);
    ctx
}

pub fn use_api() -> ApiContext {
    use_context::<ApiContext>().expect("ApiContext not found in context. Ensure provide_api was called.")
}

/// 解析后端响应
///
/// 非 2xx 时尽量取出信封里的 `message`；`success: false` 转为 `Rejected`；
/// `data` 缺失或为 `null` 时只有能从 unit 构造的类型（如 `Ack`）才算成功。
pub fn decode_response<T: DeserializeOwned>(
    status: u16,
    ok: bool,
    body: &str,
) -> Result<T, ApiError> {
    if !ok {
        let message = serde_json_wasm::from_str::<ApiEnvelope<IgnoredAny>>(body)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or_else(|| body.chars().take(200).collect());
        return Err(ApiError::Status { status, message });
    }

    let envelope: ApiEnvelope<T> =
        serde_json_wasm::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;

    if !envelope.is_success() {
        return Err(ApiError::Rejected(
            envelope
                .message
                .unwrap_or_else(|| "request rejected".to_string()),
        ));
    }

    match envelope.data {
        Some(data) => Ok(data),
        None => <T as Deserialize>::deserialize(UnitDeserializer::<ValueError>::new())
            .map_err(|_| ApiError::MissingData),
    }
}
