//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 路由服务只负责"监听 -> 更新 -> 加载"，守卫判定交给会话控制器：
//! 每次路径变化都会通知注入的回调，控制器据此决定是否重定向。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::{AppRoute, normalize_path};
use crate::session::Navigator;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路径（规范化后）
    path: RwSignal<String>,
    /// 由路径派生的路由
    route: Memo<AppRoute>,
}

impl RouterService {
    fn new() -> Self {
        let path = RwSignal::new(normalize_path(&current_path()).to_string());
        let route = Memo::new(move |_| path.with(|p| AppRoute::from_path(p)));
        Self { path, route }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> Memo<AppRoute> {
        self.route
    }

    /// 获取当前路径信号
    pub fn current_path(&self) -> ReadSignal<String> {
        self.path.read_only()
    }

    /// 用户导航：推入 History 并更新 UI
    pub fn navigate(&self, path: &str) {
        let path = normalize_path(path);
        push_history_state(path);
        self.path.set(path.to_string());
    }

    /// 重定向：替换当前 History 记录，不留下可后退的条目
    pub fn redirect(&self, route: AppRoute) {
        replace_history_state(route.to_path());
        self.path.set(route.to_path().to_string());
    }

    /// 路径变化时调用 `on_change`（包括首次加载）
    pub fn on_change(&self, on_change: Callback<String>) {
        let path = self.path;
        Effect::new(move |_| {
            on_change.run(path.get());
        });
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let path = self.path;

        let closure = Closure::<dyn Fn()>::new(move || {
            path.set(normalize_path(&current_path()).to_string());
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

impl Navigator for RouterService {
    fn current_path(&self) -> String {
        self.path.get_untracked()
    }

    fn replace(&self, route: AppRoute) {
        self.redirect(route);
    }
}

/// 创建路由服务、挂上 popstate 监听并提供到 Context
pub fn provide_router() -> RouterService {
    let router = RouterService::new();
    router.init_popstate_listener();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure provide_router was called.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，拦截点击改走路由服务
#[component]
pub fn Link(
    /// 目标路由
    to: AppRoute,
    #[prop(optional, into)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(to.to_path());
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}
