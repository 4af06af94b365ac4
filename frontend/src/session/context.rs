//! 会话上下文
//!
//! 把 `SessionController` 的状态镜像到 Leptos 信号，通过 Context 在组件间共享。
//! 控制器本身不是 `Send`，保存在本地存储的 `StoredValue` 中。

use std::rc::Rc;

use leptos::prelude::*;

use super::controller::SessionController;
use super::gate::{Gate, gate};
use super::profile::UserProfile;
use super::state::{Session, SessionPhase};
use crate::web::router::use_router;

/// 会话上下文
#[derive(Clone, Copy)]
pub struct SessionContext {
    session: RwSignal<Session>,
    profile: RwSignal<UserProfile>,
    controller: StoredValue<SessionController, LocalStorage>,
}

impl SessionContext {
    pub fn new(controller: SessionController) -> Self {
        let session = RwSignal::new(controller.session());
        let profile = RwSignal::new(controller.profile());

        controller.observe(Rc::new(move |next: &Session, next_profile: &UserProfile| {
            session.set(next.clone());
            if profile.with_untracked(|p| p != next_profile) {
                profile.set(next_profile.clone());
            }
        }));

        Self {
            session,
            profile,
            controller: StoredValue::new_local(controller),
        }
    }

    pub fn session(&self) -> ReadSignal<Session> {
        self.session.read_only()
    }

    pub fn profile(&self) -> ReadSignal<UserProfile> {
        self.profile.read_only()
    }

    pub fn phase(&self) -> Memo<SessionPhase> {
        let session = self.session;
        Memo::new(move |_| session.with(|s| s.phase))
    }

    pub fn is_authenticated(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.is_authenticated()))
    }

    /// 当前访问令牌（不追踪）
    pub fn token(&self) -> Option<String> {
        self.session.with_untracked(|s| s.token.clone())
    }

    pub fn start(&self) -> bool {
        self.controller.with_value(|c| c.start())
    }

    pub fn login(&self) {
        self.controller.with_value(|c| c.login());
    }

    pub fn logout(&self) {
        self.controller.with_value(|c| c.logout());
    }

    pub fn on_route_change(&self) {
        self.controller.with_value(|c| c.on_route_change());
    }
}

/// 创建会话上下文并提供到 Context
pub fn provide_session(controller: SessionController) -> SessionContext {
    let ctx = SessionContext::new(controller);
    provide_context(ctx);
    ctx
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .expect("SessionContext not found in context. Ensure provide_session was called.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 全屏加载占位
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}

/// 渲染闸门
///
/// 会话确定前只显示加载占位；未认证访问受保护路径时同样保持占位，直到重定向生效。
#[component]
pub fn SessionGate(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let phase = session.phase();
    let path = router.current_path();

    let current = Memo::new(move |_| path.with(|p| gate(phase.get(), p)));

    view! {
        <Show when=move || current.get() == Gate::Render fallback=|| view! { <LoadingScreen /> }>
            {children()}
        </Show>
    }
}
