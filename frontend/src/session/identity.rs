//! 身份提供方客户端抽象
//!
//! 会话控制器只依赖 `IdentityClient` trait，浏览器中由 Keycloak 绑定实现，
//! 测试中由可控的假实现替换。

use std::rc::Rc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 身份提供方推送的生命周期事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityEvent {
    /// 认证成功（登录回跳或静默 SSO）
    AuthSuccess,
    /// 令牌刷新成功
    AuthRefreshSuccess,
    /// 令牌刷新失败
    AuthRefreshError,
    /// 会话被注销
    AuthLogout,
    /// 访问令牌过期，需要刷新
    TokenExpired,
}

impl IdentityEvent {
    pub fn name(&self) -> &'static str {
        match self {
            IdentityEvent::AuthSuccess => "auth_success",
            IdentityEvent::AuthRefreshSuccess => "auth_refresh_success",
            IdentityEvent::AuthRefreshError => "auth_refresh_error",
            IdentityEvent::AuthLogout => "auth_logout",
            IdentityEvent::TokenExpired => "token_expired",
        }
    }
}

/// 事件接收端，客户端只持有一个
pub type IdentitySink = Rc<dyn Fn(IdentityEvent)>;

/// 身份提供方返回的用户资料（只取展示需要的字段）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProfile {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// `init` 选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitOptions {
    pub on_load: String,
    pub pkce_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub silent_check_sso_redirect_uri: Option<String>,
    pub check_login_iframe: bool,
}

impl InitOptions {
    /// 静默检查 SSO 会话，不强制跳转登录页
    pub fn check_sso(silent_redirect_uri: Option<String>) -> Self {
        Self {
            on_load: "check-sso".to_string(),
            pkce_method: "S256".to_string(),
            silent_check_sso_redirect_uri: silent_redirect_uri,
            check_login_iframe: false,
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("identity client init failed: {0}")]
    Init(String),
    #[error("failed to load user profile: {0}")]
    Profile(String),
    #[error("token refresh failed: {0}")]
    Refresh(String),
}

/// 身份提供方客户端
///
/// `init` 每个进程最多调用一次，由 `SessionController` 保证。
/// `login` / `logout` 会把浏览器跳转到身份提供方托管的页面，不返回数据。
#[async_trait(?Send)]
pub trait IdentityClient {
    /// 注册事件接收端，必须在 `init` 之前调用
    fn subscribe(&self, sink: IdentitySink);
    async fn init(&self, options: &InitOptions) -> Result<bool, IdentityError>;
    fn login(&self, redirect_uri: Option<&str>);
    fn logout(&self, redirect_uri: Option<&str>);
    async fn load_profile(&self) -> Result<IdentityProfile, IdentityError>;
    /// 当前访问令牌
    fn token(&self) -> Option<String>;
    /// 令牌剩余有效期不足 `min_validity_secs` 时刷新，返回是否真的刷新了
    async fn update_token(&self, min_validity_secs: u32) -> Result<bool, IdentityError>;
}

// =========================================================
// 测试环境实现 (Mock)
// =========================================================

#[cfg(test)]
pub mod tests {
    use super::*;
    use futures::channel::oneshot;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    type Pending<T> = oneshot::Receiver<Result<T, IdentityError>>;

    /// 可控的身份客户端
    ///
    /// `init` / `load_profile` / `update_token` 依次消费预先排队的 oneshot 接收端，
    /// 测试通过对应的发送端决定结果何时、以何种方式返回。队列为空时立即返回默认结果。
    #[derive(Default)]
    pub struct FakeIdentity {
        pub init_calls: Cell<usize>,
        pub login_calls: Cell<usize>,
        pub logout_calls: Cell<usize>,
        pub profile_calls: Cell<usize>,
        pub refresh_calls: Cell<usize>,
        pub token: RefCell<Option<String>>,
        sink: RefCell<Option<IdentitySink>>,
        init_results: RefCell<VecDeque<Pending<bool>>>,
        profile_results: RefCell<VecDeque<Pending<IdentityProfile>>>,
        refresh_results: RefCell<VecDeque<Pending<bool>>>,
    }

    impl FakeIdentity {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_token(self, token: &str) -> Self {
            *self.token.borrow_mut() = Some(token.to_string());
            self
        }

        pub fn queue_init(&self) -> oneshot::Sender<Result<bool, IdentityError>> {
            let (tx, rx) = oneshot::channel();
            self.init_results.borrow_mut().push_back(rx);
            tx
        }

        pub fn queue_profile(&self) -> oneshot::Sender<Result<IdentityProfile, IdentityError>> {
            let (tx, rx) = oneshot::channel();
            self.profile_results.borrow_mut().push_back(rx);
            tx
        }

        pub fn queue_refresh(&self) -> oneshot::Sender<Result<bool, IdentityError>> {
            let (tx, rx) = oneshot::channel();
            self.refresh_results.borrow_mut().push_back(rx);
            tx
        }

        pub fn is_subscribed(&self) -> bool {
            self.sink.borrow().is_some()
        }

        /// 模拟身份提供方触发事件
        pub fn emit(&self, event: IdentityEvent) {
            let sink = self.sink.borrow().clone();
            if let Some(sink) = sink {
                sink(event);
            }
        }
    }

    async fn resolve<T: Default>(pending: Option<Pending<T>>, what: &str) -> Result<T, IdentityError> {
        match pending {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(IdentityError::Init(format!("{what} sender dropped")))),
            None => Ok(T::default()),
        }
    }

    #[async_trait(?Send)]
    impl IdentityClient for FakeIdentity {
        fn subscribe(&self, sink: IdentitySink) {
            *self.sink.borrow_mut() = Some(sink);
        }

        async fn init(&self, _options: &InitOptions) -> Result<bool, IdentityError> {
            self.init_calls.set(self.init_calls.get() + 1);
            let pending = self.init_results.borrow_mut().pop_front();
            resolve(pending, "init").await
        }

        fn login(&self, _redirect_uri: Option<&str>) {
            self.login_calls.set(self.login_calls.get() + 1);
        }

        fn logout(&self, _redirect_uri: Option<&str>) {
            self.logout_calls.set(self.logout_calls.get() + 1);
        }

        async fn load_profile(&self) -> Result<IdentityProfile, IdentityError> {
            self.profile_calls.set(self.profile_calls.get() + 1);
            let pending = self.profile_results.borrow_mut().pop_front();
            resolve(pending, "profile").await
        }

        fn token(&self) -> Option<String> {
            self.token.borrow().clone()
        }

        async fn update_token(&self, _min_validity_secs: u32) -> Result<bool, IdentityError> {
            self.refresh_calls.set(self.refresh_calls.get() + 1);
            let pending = self.refresh_results.borrow_mut().pop_front();
            resolve(pending, "refresh").await
        }
    }

    #[test]
    fn check_sso_options_serialize_camel_case() {
        let options = InitOptions::check_sso(Some("https://app/silent-check-sso.html".into()));
        let json = serde_json_wasm::to_string(&options).unwrap();
        assert_eq!(
            json,
            r#"{"onLoad":"check-sso","pkceMethod":"S256","silentCheckSsoRedirectUri":"https://app/silent-check-sso.html","checkLoginIframe":false}"#
        );
    }

    #[test]
    fn profile_ignores_unknown_fields() {
        let raw = r#"{"id":"1","username":"sam","email":"sam@x.com","firstName":"Sam","emailVerified":true}"#;
        let profile: IdentityProfile = serde_json_wasm::from_str(raw).unwrap();
        assert_eq!(profile.username.as_deref(), Some("sam"));
        assert_eq!(profile.email.as_deref(), Some("sam@x.com"));
    }
}
