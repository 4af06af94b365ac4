//! keycloak-js 绑定
//!
//! 通过 `wasm-bindgen` 导入页面上全局的 `Keycloak` 类（由 keycloak-js 脚本提供），
//! 并把它适配为 `IdentityClient`。回调槽位（`onAuthSuccess` 等）统一转发到
//! 会话控制器注册的事件接收端。

use std::cell::RefCell;

use async_trait::async_trait;
use js_sys::{Function, JSON, Promise};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::config::KeycloakConfig;
use crate::session::{
    IdentityClient, IdentityError, IdentityEvent, IdentityProfile, IdentitySink, InitOptions,
};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Keycloak)]
    type KeycloakJs;

    #[wasm_bindgen(constructor, js_class = "Keycloak", catch)]
    fn new(config: &JsValue) -> Result<KeycloakJs, JsValue>;

    #[wasm_bindgen(method)]
    fn init(this: &KeycloakJs, options: &JsValue) -> Promise;

    #[wasm_bindgen(method)]
    fn login(this: &KeycloakJs, options: &JsValue) -> Promise;

    #[wasm_bindgen(method)]
    fn logout(this: &KeycloakJs, options: &JsValue) -> Promise;

    #[wasm_bindgen(method, js_name = loadUserProfile)]
    fn load_user_profile(this: &KeycloakJs) -> Promise;

    #[wasm_bindgen(method, js_name = updateToken)]
    fn update_token(this: &KeycloakJs, min_validity: i32) -> Promise;

    #[wasm_bindgen(method, getter)]
    fn token(this: &KeycloakJs) -> Option<String>;

    #[wasm_bindgen(method, setter, js_name = onAuthSuccess)]
    fn set_on_auth_success(this: &KeycloakJs, callback: &Function);

    #[wasm_bindgen(method, setter, js_name = onAuthRefreshSuccess)]
    fn set_on_auth_refresh_success(this: &KeycloakJs, callback: &Function);

    #[wasm_bindgen(method, setter, js_name = onAuthRefreshError)]
    fn set_on_auth_refresh_error(this: &KeycloakJs, callback: &Function);

    #[wasm_bindgen(method, setter, js_name = onAuthLogout)]
    fn set_on_auth_logout(this: &KeycloakJs, callback: &Function);

    #[wasm_bindgen(method, setter, js_name = onTokenExpired)]
    fn set_on_token_expired(this: &KeycloakJs, callback: &Function);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RedirectOptions<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect_uri: Option<&'a str>,
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}

/// 序列化为 JSON 再交给 `JSON.parse`，得到普通 JS 对象
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, String> {
    let json = serde_json_wasm::to_string(value).map_err(|e| e.to_string())?;
    JSON::parse(&json).map_err(|e| describe(&e))
}

/// Keycloak 身份客户端
pub struct KeycloakClient {
    inner: KeycloakJs,
    /// 回调闭包必须与 JS 对象同寿命
    hooks: RefCell<Vec<Closure<dyn Fn()>>>,
}

impl KeycloakClient {
    pub fn new(config: &KeycloakConfig) -> Result<Self, IdentityError> {
        let js_config = to_js(config).map_err(IdentityError::Init)?;
        let inner = KeycloakJs::new(&js_config).map_err(|e| IdentityError::Init(describe(&e)))?;
        Ok(Self {
            inner,
            hooks: RefCell::new(Vec::new()),
        })
    }

    fn redirect_options(redirect_uri: Option<&str>) -> JsValue {
        to_js(&RedirectOptions { redirect_uri }).unwrap_or(JsValue::UNDEFINED)
    }
}

#[async_trait(?Send)]
impl IdentityClient for KeycloakClient {
    fn subscribe(&self, sink: IdentitySink) {
        let slots: [(IdentityEvent, fn(&KeycloakJs, &Function)); 5] = [
            (IdentityEvent::AuthSuccess, KeycloakJs::set_on_auth_success),
            (
                IdentityEvent::AuthRefreshSuccess,
                KeycloakJs::set_on_auth_refresh_success,
            ),
            (
                IdentityEvent::AuthRefreshError,
                KeycloakJs::set_on_auth_refresh_error,
            ),
            (IdentityEvent::AuthLogout, KeycloakJs::set_on_auth_logout),
            (IdentityEvent::TokenExpired, KeycloakJs::set_on_token_expired),
        ];

        let mut hooks = self.hooks.borrow_mut();
        hooks.clear();
        for (event, set_slot) in slots {
            let sink = sink.clone();
            let closure = Closure::<dyn Fn()>::new(move || sink(event));
            set_slot(&self.inner, closure.as_ref().unchecked_ref());
            hooks.push(closure);
        }
    }

    async fn init(&self, options: &InitOptions) -> Result<bool, IdentityError> {
        let options = to_js(options).map_err(IdentityError::Init)?;
        let result = JsFuture::from(self.inner.init(&options))
            .await
            .map_err(|e| IdentityError::Init(describe(&e)))?;
        Ok(result.as_bool().unwrap_or(false))
    }

    fn login(&self, redirect_uri: Option<&str>) {
        let _ = self.inner.login(&Self::redirect_options(redirect_uri));
    }

    fn logout(&self, redirect_uri: Option<&str>) {
        let _ = self.inner.logout(&Self::redirect_options(redirect_uri));
    }

    async fn load_profile(&self) -> Result<IdentityProfile, IdentityError> {
        let value = JsFuture::from(self.inner.load_user_profile())
            .await
            .map_err(|e| IdentityError::Profile(describe(&e)))?;
        let json: String = JSON::stringify(&value)
            .map_err(|e| IdentityError::Profile(describe(&e)))?
            .into();
        serde_json_wasm::from_str(&json).map_err(|e| IdentityError::Profile(e.to_string()))
    }

    fn token(&self) -> Option<String> {
        self.inner.token()
    }

    async fn update_token(&self, min_validity_secs: u32) -> Result<bool, IdentityError> {
        let min_validity = i32::try_from(min_validity_secs).unwrap_or(i32::MAX);
        let refreshed = JsFuture::from(self.inner.update_token(min_validity))
            .await
            .map_err(|e| IdentityError::Refresh(describe(&e)))?;
        Ok(refreshed.as_bool().unwrap_or(false))
    }
}
