//! 会话状态机
//!
//! 所有状态变化都经过 `reduce`：输入当前会话与一个事件，输出下一个会话与需要执行的副作用。
//! 这里不做任何 I/O，副作用由 `SessionController` 执行。

use super::identity::IdentityProfile;

/// 会话阶段
///
/// `Uninitialized -> Initializing -> {Authenticated, Unauthenticated}`，
/// 之后只在 `Authenticated` 与 `Unauthenticated` 之间切换。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Uninitialized,
    Initializing,
    Authenticated,
    Unauthenticated,
}

impl SessionPhase {
    /// 初始化握手是否已完成（无论成功与否）
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Authenticated | Self::Unauthenticated)
    }
}

/// 进程级会话快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub phase: SessionPhase,
    /// 镜像的访问令牌，归身份客户端所有
    pub token: Option<String>,
    /// 每次阶段变化或认证丢失时递增，用于识别过期的异步结果
    pub epoch: u64,
}

impl Session {
    pub fn initialized(&self) -> bool {
        self.phase.is_resolved()
    }

    pub fn is_authenticated(&self) -> bool {
        self.phase == SessionPhase::Authenticated
    }
}

/// 状态机输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    InitStarted,
    InitResolved {
        authenticated: bool,
        token: Option<String>,
    },
    InitFailed {
        reason: String,
    },
    AuthSuccess {
        token: Option<String>,
    },
    RefreshSucceeded {
        token: Option<String>,
    },
    /// 注销或令牌刷新失败
    AuthLost,
    ProfileLoaded {
        epoch: u64,
        profile: IdentityProfile,
    },
    ProfileFailed {
        epoch: u64,
        reason: String,
    },
}

/// 状态机输出的副作用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// 拉取用户资料，结果带回 `epoch`
    LoadProfile { epoch: u64 },
    /// 写入资料存储
    StoreProfile(IdentityProfile),
    /// 清除持久化资料并恢复访客默认值
    ResetProfile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: Session,
    pub effects: Vec<SessionEffect>,
}

impl Transition {
    fn unchanged(session: &Session) -> Self {
        Self {
            next: session.clone(),
            effects: Vec::new(),
        }
    }

    fn to(next: Session, effects: Vec<SessionEffect>) -> Self {
        Self { next, effects }
    }
}

/// 会话 reducer
pub fn reduce(session: &Session, event: SessionEvent) -> Transition {
    use SessionPhase::*;

    match (session.phase, event) {
        (Uninitialized, SessionEvent::InitStarted) => Transition::to(
            Session {
                phase: Initializing,
                ..session.clone()
            },
            Vec::new(),
        ),

        (Initializing, SessionEvent::InitResolved { authenticated: true, token }) => {
            let epoch = session.epoch + 1;
            Transition::to(
                Session {
                    phase: Authenticated,
                    token,
                    epoch,
                },
                vec![SessionEffect::LoadProfile { epoch }],
            )
        }

        (Initializing, SessionEvent::InitResolved { authenticated: false, .. })
        | (Initializing, SessionEvent::InitFailed { .. }) => Transition::to(
            Session {
                phase: Unauthenticated,
                token: None,
                epoch: session.epoch + 1,
            },
            Vec::new(),
        ),

        (Unauthenticated, SessionEvent::AuthSuccess { token }) => {
            let epoch = session.epoch + 1;
            Transition::to(
                Session {
                    phase: Authenticated,
                    token,
                    epoch,
                },
                vec![SessionEffect::LoadProfile { epoch }],
            )
        }

        (Authenticated, SessionEvent::AuthSuccess { token })
        | (Authenticated, SessionEvent::RefreshSucceeded { token }) => Transition::to(
            Session {
                token,
                ..session.clone()
            },
            vec![SessionEffect::LoadProfile {
                epoch: session.epoch,
            }],
        ),

        // 注销无条件清理：即使已经是未认证状态，也要让在途的资料请求失效
        (Authenticated | Unauthenticated, SessionEvent::AuthLost) => Transition::to(
            Session {
                phase: Unauthenticated,
                token: None,
                epoch: session.epoch + 1,
            },
            vec![SessionEffect::ResetProfile],
        ),

        // 初始化期间阶段只由 init 结果决定，这里只清理资料
        (Initializing, SessionEvent::AuthLost) => Transition::to(
            Session {
                token: None,
                epoch: session.epoch + 1,
                ..session.clone()
            },
            vec![SessionEffect::ResetProfile],
        ),

        (Authenticated, SessionEvent::ProfileLoaded { epoch, profile }) if epoch == session.epoch => {
            Transition::to(session.clone(), vec![SessionEffect::StoreProfile(profile)])
        }

        _ => Transition::unchanged(session),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(phase: SessionPhase, epoch: u64) -> Session {
        Session {
            phase,
            token: None,
            epoch,
        }
    }

    fn all_events() -> Vec<SessionEvent> {
        vec![
            SessionEvent::InitStarted,
            SessionEvent::InitResolved {
                authenticated: true,
                token: Some("t".into()),
            },
            SessionEvent::InitResolved {
                authenticated: false,
                token: None,
            },
            SessionEvent::InitFailed {
                reason: "offline".into(),
            },
            SessionEvent::AuthSuccess {
                token: Some("t".into()),
            },
            SessionEvent::RefreshSucceeded {
                token: Some("t2".into()),
            },
            SessionEvent::AuthLost,
            SessionEvent::ProfileLoaded {
                epoch: 1,
                profile: IdentityProfile::default(),
            },
            SessionEvent::ProfileFailed {
                epoch: 1,
                reason: "500".into(),
            },
        ]
    }

    #[test]
    fn init_started_only_from_uninitialized() {
        let t = reduce(&Session::default(), SessionEvent::InitStarted);
        assert_eq!(t.next.phase, SessionPhase::Initializing);

        let again = reduce(&t.next, SessionEvent::InitStarted);
        assert_eq!(again.next, t.next);
        assert!(again.effects.is_empty());
    }

    #[test]
    fn init_true_authenticates_and_loads_profile() {
        let t = reduce(
            &session(SessionPhase::Initializing, 0),
            SessionEvent::InitResolved {
                authenticated: true,
                token: Some("abc".into()),
            },
        );
        assert_eq!(t.next.phase, SessionPhase::Authenticated);
        assert_eq!(t.next.token.as_deref(), Some("abc"));
        assert_eq!(t.effects, vec![SessionEffect::LoadProfile { epoch: 1 }]);
    }

    #[test]
    fn init_false_or_failure_is_unauthenticated() {
        for event in [
            SessionEvent::InitResolved {
                authenticated: false,
                token: None,
            },
            SessionEvent::InitFailed {
                reason: "network".into(),
            },
        ] {
            let t = reduce(&session(SessionPhase::Initializing, 0), event);
            assert_eq!(t.next.phase, SessionPhase::Unauthenticated);
            assert!(t.effects.is_empty());
        }
    }

    #[test]
    fn auth_events_ignored_while_initializing() {
        let start = session(SessionPhase::Initializing, 0);
        let t = reduce(&start, SessionEvent::AuthSuccess { token: None });
        assert_eq!(t.next, start);
        let t = reduce(&start, SessionEvent::RefreshSucceeded { token: None });
        assert_eq!(t.next, start);
    }

    #[test]
    fn refresh_keeps_classification_and_reloads_profile() {
        let start = Session {
            phase: SessionPhase::Authenticated,
            token: Some("old".into()),
            epoch: 3,
        };
        let t = reduce(
            &start,
            SessionEvent::RefreshSucceeded {
                token: Some("new".into()),
            },
        );
        assert_eq!(t.next.phase, SessionPhase::Authenticated);
        assert_eq!(t.next.token.as_deref(), Some("new"));
        assert_eq!(t.next.epoch, 3);
        assert_eq!(t.effects, vec![SessionEffect::LoadProfile { epoch: 3 }]);

        let unauth = session(SessionPhase::Unauthenticated, 2);
        let t = reduce(&unauth, SessionEvent::RefreshSucceeded { token: None });
        assert_eq!(t.next, unauth);
    }

    #[test]
    fn auth_lost_resets_unconditionally() {
        for phase in [SessionPhase::Authenticated, SessionPhase::Unauthenticated] {
            let t = reduce(&session(phase, 4), SessionEvent::AuthLost);
            assert_eq!(t.next.phase, SessionPhase::Unauthenticated);
            assert_eq!(t.next.epoch, 5);
            assert_eq!(t.effects, vec![SessionEffect::ResetProfile]);
        }
    }

    #[test]
    fn stale_profile_result_is_dropped() {
        let current = session(SessionPhase::Authenticated, 7);
        let stale = reduce(
            &current,
            SessionEvent::ProfileLoaded {
                epoch: 6,
                profile: IdentityProfile::default(),
            },
        );
        assert!(stale.effects.is_empty());

        let after_logout = session(SessionPhase::Unauthenticated, 7);
        let dropped = reduce(
            &after_logout,
            SessionEvent::ProfileLoaded {
                epoch: 7,
                profile: IdentityProfile::default(),
            },
        );
        assert!(dropped.effects.is_empty());
    }

    #[test]
    fn never_returns_to_initializing_once_resolved() {
        for phase in [SessionPhase::Authenticated, SessionPhase::Unauthenticated] {
            let mut current = session(phase, 1);
            for _ in 0..3 {
                for event in all_events() {
                    current = reduce(&current, event).next;
                    assert!(current.phase.is_resolved(), "left resolved state: {:?}", current);
                }
            }
        }
    }

    #[test]
    fn no_event_moves_back_to_uninitialized() {
        let mut current = session(SessionPhase::Initializing, 0);
        for event in all_events() {
            current = reduce(&current, event).next;
            assert_ne!(current.phase, SessionPhase::Uninitialized);
        }
    }
}
