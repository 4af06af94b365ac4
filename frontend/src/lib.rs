//! Felix 钱包前端
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义与公开路径判定（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session`: 会话生命周期、资料缓存与渲染闸门
//! - `api`: 后端 REST 客户端
//! - `components`: UI 组件层

mod api;
mod bulk_upload;
mod components {
    pub mod admin;
    pub mod dashboard;
    mod fields;
    mod icons;
    pub mod landing;
    mod layout;
    pub mod login;
    pub mod marketplace;
    pub mod payments;
    pub mod wallet;
}
mod config;
mod error;
mod forms;
pub mod logging;
mod notify;
mod session;
mod wallet;

use std::rc::Rc;

use crate::api::{FelixApi, provide_api};
use crate::components::admin::AdminPage;
use crate::components::dashboard::DashboardPage;
use crate::components::landing::{ConfigNotice, LandingPage, NotFoundPage, WelcomePage};
use crate::components::login::LoginPage;
use crate::components::marketplace::MarketplacePage;
use crate::components::payments::PaymentsPage;
use crate::components::wallet::WalletPage;
use crate::config::AppConfig;
use crate::notify::{Toasts, provide_notifier};
use crate::session::{
    InitOptions, ProfileStore, SessionConfig, SessionController, SessionGate, provide_session,
};

use leptos::prelude::*;

// 浏览器 API 封装模块
pub(crate) mod web {
    mod keycloak;
    pub mod route;
    pub mod router;
    pub mod spawn;
    pub mod storage;

    pub use keycloak::KeycloakClient;
    pub use spawn::BrowserSpawner;
    pub use storage::{BrowserStorage, KeyValueStore};
}

use web::route::{AppRoute, DASHBOARD_PATH};
use web::router::{RouterOutlet, provide_router};
use web::{BrowserSpawner, BrowserStorage, KeycloakClient};

/// 静默 SSO 检查页（需与 index.html 一同部署）
const SILENT_CHECK_SSO_PATH: &str = "/silent-check-sso.html";

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Landing => view! { <LandingPage /> }.into_any(),
        AppRoute::Welcome => view! { <WelcomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::Payments => view! { <PaymentsPage /> }.into_any(),
        AppRoute::Wallet => view! { <WalletPage /> }.into_any(),
        AppRoute::Marketplace => view! { <MarketplacePage /> }.into_any(),
        AppRoute::Admin => view! { <AdminPage /> }.into_any(),
        AppRoute::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

fn session_config() -> SessionConfig {
    let origin = web_sys::window().and_then(|w| w.location().origin().ok());
    let init = InitOptions::check_sso(
        origin
            .as_ref()
            .map(|o| format!("{o}{SILENT_CHECK_SSO_PATH}")),
    );
    SessionConfig {
        login_redirect: origin.as_ref().map(|o| format!("{o}{DASHBOARD_PATH}")),
        logout_redirect: origin,
        ..SessionConfig::new(init)
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 读取编译期配置
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return view! { <ConfigNotice message=e.to_string() /> }.into_any();
        }
    };

    // 2. 路由服务
    let router = provide_router();

    // 3. 身份客户端
    let client = match KeycloakClient::new(&config.keycloak) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to construct identity client");
            return view! { <ConfigNotice message=e.to_string() /> }.into_any();
        }
    };

    // 4. 会话控制器：资料缓存先于任何回调可读
    let controller = SessionController::new(
        Rc::new(client),
        ProfileStore::open(Rc::new(BrowserStorage)),
        Rc::new(router),
        Rc::new(BrowserSpawner),
        session_config(),
    );
    let session = provide_session(controller);
    provide_api(FelixApi::new(config.api_base_url, config.tenant), session);
    provide_notifier();

    // 5. 一次性初始化；之后每次路由变化都重新判定重定向
    session.start();
    router.on_change(Callback::new(move |_path: String| session.on_route_change()));

    view! {
        <Toasts />
        <SessionGate>
            <RouterOutlet matcher=route_matcher />
        </SessionGate>
    }
    .into_any()
}
