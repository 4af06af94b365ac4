//! 渲染闸门与重定向判定
//!
//! 两个纯函数：会话未确定时阻止受保护内容挂载；会话确定后决定是否需要重定向。

use super::state::SessionPhase;
use crate::web::route::{AppRoute, LOGIN_PATH, is_public, normalize_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// 只渲染加载占位
    Loading,
    /// 渲染子组件
    Render,
}

/// 当前阶段与路径下闸门的状态
///
/// 未认证访问受保护路径时继续显示加载占位，直到重定向完成。
pub fn gate(phase: SessionPhase, path: &str) -> Gate {
    match phase {
        SessionPhase::Uninitialized | SessionPhase::Initializing => Gate::Loading,
        SessionPhase::Unauthenticated if !is_public(normalize_path(path)) => Gate::Loading,
        _ => Gate::Render,
    }
}

/// 当前阶段与路径下应重定向到的路由
///
/// 初始化完成前从不重定向。
pub fn redirect_target(phase: SessionPhase, path: &str) -> Option<AppRoute> {
    let path = normalize_path(path);
    match phase {
        SessionPhase::Uninitialized | SessionPhase::Initializing => None,
        SessionPhase::Unauthenticated if !is_public(path) => Some(AppRoute::auth_failure_redirect()),
        SessionPhase::Authenticated if path == LOGIN_PATH => Some(AppRoute::auth_success_redirect()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_session_always_loads() {
        for path in ["/", "/login", "/dashboard", "/welcome/a"] {
            assert_eq!(gate(SessionPhase::Uninitialized, path), Gate::Loading);
            assert_eq!(gate(SessionPhase::Initializing, path), Gate::Loading);
            assert_eq!(redirect_target(SessionPhase::Initializing, path), None);
        }
    }

    #[test]
    fn unauthenticated_protected_route_stays_on_loader() {
        assert_eq!(gate(SessionPhase::Unauthenticated, "/admin"), Gate::Loading);
        assert_eq!(gate(SessionPhase::Unauthenticated, "/login"), Gate::Render);
        assert_eq!(gate(SessionPhase::Unauthenticated, "/"), Gate::Render);
    }

    #[test]
    fn authenticated_renders_everything() {
        for path in ["/", "/login", "/dashboard", "/admin"] {
            assert_eq!(gate(SessionPhase::Authenticated, path), Gate::Render);
        }
    }

    #[test]
    fn redirect_table() {
        assert_eq!(
            redirect_target(SessionPhase::Unauthenticated, "/admin"),
            Some(AppRoute::Login)
        );
        assert_eq!(redirect_target(SessionPhase::Unauthenticated, "/welcome/x"), None);
        assert_eq!(
            redirect_target(SessionPhase::Authenticated, "/login"),
            Some(AppRoute::Dashboard)
        );
        assert_eq!(
            redirect_target(SessionPhase::Authenticated, "/login/"),
            Some(AppRoute::Dashboard)
        );
        assert_eq!(redirect_target(SessionPhase::Authenticated, "/"), None);
        assert_eq!(redirect_target(SessionPhase::Authenticated, "/admin"), None);
    }
}
