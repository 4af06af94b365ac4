//! 会话控制器
//!
//! 负责：
//! - 每个进程只初始化一次身份客户端（在异步调用开始前同步地检查并置位）
//! - 把身份提供方的回调转换为状态机事件
//! - 执行状态机产生的副作用（拉取/写入/清除资料）
//! - 在阶段变化与路由变化时做重定向判定，每次跳转只执行一次

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::task::{LocalSpawn, LocalSpawnExt};

use super::gate::redirect_target;
use super::identity::{IdentityClient, IdentityEvent, InitOptions};
use super::profile::{ProfileStore, UserProfile};
use super::state::{Session, SessionEffect, SessionEvent, SessionPhase, reduce};
use crate::web::route::{AppRoute, normalize_path};

/// 令牌过期时要求的最短剩余有效期
const TOKEN_MIN_VALIDITY_SECS: u32 = 30;

/// 导航抽象：读取当前路径、以替换方式跳转
pub trait Navigator {
    fn current_path(&self) -> String;
    fn replace(&self, route: AppRoute);
}

/// 每次状态变化后调用
pub type SessionObserver = Rc<dyn Fn(&Session, &UserProfile)>;

/// 控制器配置
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub init: InitOptions,
    /// 登录完成后身份提供方回跳的地址
    pub login_redirect: Option<String>,
    /// 注销完成后身份提供方回跳的地址
    pub logout_redirect: Option<String>,
}

impl SessionConfig {
    pub fn new(init: InitOptions) -> Self {
        Self {
            init,
            login_redirect: None,
            logout_redirect: None,
        }
    }
}

struct Inner {
    client: Rc<dyn IdentityClient>,
    profiles: ProfileStore,
    navigator: Rc<dyn Navigator>,
    spawner: Rc<dyn LocalSpawn>,
    config: SessionConfig,
    session: RefCell<Session>,
    /// 最近一次发出的重定向 `(epoch, path)`，用于去重
    last_redirect: RefCell<Option<(u64, String)>>,
    observers: RefCell<Vec<SessionObserver>>,
}

/// 会话控制器（廉价克隆，共享同一份状态）
#[derive(Clone)]
pub struct SessionController {
    inner: Rc<Inner>,
}

impl SessionController {
    pub fn new(
        client: Rc<dyn IdentityClient>,
        profiles: ProfileStore,
        navigator: Rc<dyn Navigator>,
        spawner: Rc<dyn LocalSpawn>,
        config: SessionConfig,
    ) -> Self {
        Self {
            inner: Rc::new(Inner {
                client,
                profiles,
                navigator,
                spawner,
                config,
                session: RefCell::new(Session::default()),
                last_redirect: RefCell::new(None),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    // =========================================================
    // 快照
    // =========================================================

    pub fn session(&self) -> Session {
        self.inner.session.borrow().clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.inner.session.borrow().phase
    }

    pub fn token(&self) -> Option<String> {
        self.inner.session.borrow().token.clone()
    }

    pub fn profile(&self) -> UserProfile {
        self.inner.profiles.read()
    }

    pub fn observe(&self, observer: SessionObserver) {
        self.inner.observers.borrow_mut().push(observer);
    }

    // =========================================================
    // 生命周期
    // =========================================================

    /// 启动一次性初始化
    ///
    /// 只有第一次调用返回 `true`。事件接收端在 `init` 之前注册，避免丢事件。
    pub fn start(&self) -> bool {
        if self.phase() != SessionPhase::Uninitialized {
            tracing::debug!("session controller already started");
            return false;
        }
        self.dispatch(SessionEvent::InitStarted);

        let weak = Rc::downgrade(&self.inner);
        self.inner.client.subscribe(Rc::new(move |event| {
            if let Some(inner) = weak.upgrade() {
                SessionController { inner }.handle_identity_event(event);
            }
        }));

        let this = self.clone();
        self.spawn(async move {
            let event = match this.inner.client.init(&this.inner.config.init).await {
                Ok(authenticated) => SessionEvent::InitResolved {
                    authenticated,
                    token: if authenticated {
                        this.inner.client.token()
                    } else {
                        None
                    },
                },
                Err(e) => {
                    tracing::error!(error = %e, "identity client init failed, continuing unauthenticated");
                    SessionEvent::InitFailed {
                        reason: e.to_string(),
                    }
                }
            };
            this.dispatch(event);
        });
        true
    }

    /// 跳转到身份提供方登录页
    pub fn login(&self) {
        self.inner
            .client
            .login(self.inner.config.login_redirect.as_deref());
    }

    /// 注销：先在本地清理会话痕迹，再跳转到身份提供方注销页
    pub fn logout(&self) {
        self.dispatch(SessionEvent::AuthLost);
        self.inner
            .client
            .logout(self.inner.config.logout_redirect.as_deref());
    }

    /// 路由变化时调用，重新做重定向判定
    pub fn on_route_change(&self) {
        self.evaluate_route();
    }

    // =========================================================
    // 事件处理
    // =========================================================

    fn handle_identity_event(&self, event: IdentityEvent) {
        tracing::debug!(event = event.name(), "identity event");
        match event {
            IdentityEvent::AuthSuccess => self.dispatch(SessionEvent::AuthSuccess {
                token: self.inner.client.token(),
            }),
            IdentityEvent::AuthRefreshSuccess => self.dispatch(SessionEvent::RefreshSucceeded {
                token: self.inner.client.token(),
            }),
            IdentityEvent::AuthRefreshError | IdentityEvent::AuthLogout => {
                self.dispatch(SessionEvent::AuthLost)
            }
            IdentityEvent::TokenExpired => self.refresh_token(),
        }
    }

    fn refresh_token(&self) {
        let this = self.clone();
        self.spawn(async move {
            // 刷新结果由 AuthRefreshSuccess / AuthRefreshError 事件驱动，
            // 这里只兜底没有触发事件的失败
            match this.inner.client.update_token(TOKEN_MIN_VALIDITY_SECS).await {
                Ok(true) => tracing::debug!("token refreshed"),
                Ok(false) => tracing::debug!("token still valid, no refresh needed"),
                Err(e) if this.phase() == SessionPhase::Authenticated => {
                    tracing::warn!(error = %e, "token refresh failed, signing out");
                    this.dispatch(SessionEvent::AuthLost);
                }
                Err(e) => tracing::debug!(error = %e, "token refresh failed after sign-out"),
            }
        });
    }

    fn dispatch(&self, event: SessionEvent) {
        let is_profile_result = matches!(event, SessionEvent::ProfileLoaded { .. });
        let (before, transition) = {
            let session = self.inner.session.borrow();
            (session.phase, reduce(&session, event))
        };
        let after = transition.next.phase;
        *self.inner.session.borrow_mut() = transition.next;

        if before != after {
            tracing::info!(from = ?before, to = ?after, "session transition");
        }
        if is_profile_result && transition.effects.is_empty() {
            tracing::warn!("dropping stale profile result");
        }

        for effect in transition.effects {
            self.run_effect(effect);
        }
        self.notify();

        if before != after {
            self.evaluate_route();
        }
    }

    fn run_effect(&self, effect: SessionEffect) {
        match effect {
            SessionEffect::LoadProfile { epoch } => {
                let this = self.clone();
                self.spawn(async move {
                    let event = match this.inner.client.load_profile().await {
                        Ok(profile) => SessionEvent::ProfileLoaded { epoch, profile },
                        Err(e) => {
                            tracing::error!(error = %e, "failed to load user profile");
                            SessionEvent::ProfileFailed {
                                epoch,
                                reason: e.to_string(),
                            }
                        }
                    };
                    this.dispatch(event);
                });
            }
            SessionEffect::StoreProfile(profile) => {
                self.inner.profiles.write(profile.into());
            }
            SessionEffect::ResetProfile => {
                self.inner.profiles.reset();
            }
        }
    }

    fn notify(&self) {
        let session = self.session();
        let profile = self.profile();
        let observers = self.inner.observers.borrow().clone();
        for observer in observers {
            observer(&session, &profile);
        }
    }

    fn evaluate_route(&self) {
        let (phase, epoch) = {
            let session = self.inner.session.borrow();
            (session.phase, session.epoch)
        };
        let current = self.inner.navigator.current_path();
        let path = normalize_path(&current).to_string();

        let Some(target) = redirect_target(phase, &path) else {
            // 离开了需要重定向的路径，之后再次访问时允许重新重定向
            if phase.is_resolved() {
                self.inner.last_redirect.borrow_mut().take();
            }
            return;
        };

        let key = (epoch, path);
        {
            let mut last = self.inner.last_redirect.borrow_mut();
            if last.as_ref() == Some(&key) {
                tracing::debug!(path = %key.1, "redirect already issued");
                return;
            }
            *last = Some(key.clone());
        }

        tracing::info!(from = %key.1, to = %target, "redirecting");
        self.inner.navigator.replace(target);
    }

    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        if let Err(e) = self.inner.spawner.spawn_local(future) {
            tracing::error!(error = ?e, "failed to spawn session task");
        }
    }
}
