//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由，以及公开/受保护路径的判定。

use std::fmt::Display;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const WELCOME_PREFIX: &str = "/welcome";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// **核心守卫谓词：路径是否无需认证即可访问**
///
/// 根路径、欢迎页前缀下的任意路径、登录页为公开路由，其余均受保护。
pub fn is_public(path: &str) -> bool {
    path == ROOT_PATH || path.starts_with(WELCOME_PREFIX) || path == LOGIN_PATH
}

/// 去掉末尾的 `/`（根路径除外）
pub fn normalize_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { ROOT_PATH } else { trimmed }
}

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 落地页 (默认路由)
    #[default]
    Landing,
    /// 欢迎/引导页
    Welcome,
    /// 登录页面
    Login,
    /// 余额与交易记录
    Dashboard,
    /// 转账
    Payments,
    /// 钱包导出与导入
    Wallet,
    /// 市场挂单
    Marketplace,
    /// 管理后台
    Admin,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        match normalize_path(path) {
            ROOT_PATH => Self::Landing,
            LOGIN_PATH => Self::Login,
            DASHBOARD_PATH => Self::Dashboard,
            "/payments" => Self::Payments,
            "/wallet" => Self::Wallet,
            "/marketplace" => Self::Marketplace,
            "/admin" => Self::Admin,
            p if p.starts_with(WELCOME_PREFIX) => Self::Welcome,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的规范 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Landing => ROOT_PATH,
            Self::Welcome => WELCOME_PREFIX,
            Self::Login => LOGIN_PATH,
            Self::Dashboard => DASHBOARD_PATH,
            Self::Payments => "/payments",
            Self::Wallet => "/wallet",
            Self::Marketplace => "/marketplace",
            Self::Admin => "/admin",
            Self::NotFound => "/404",
        }
    }

    /// 定义该路由是否需要认证
    pub fn requires_auth(&self) -> bool {
        !is_public(self.to_path())
    }

    /// 导航栏标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Landing => "Felix",
            Self::Welcome => "Welcome",
            Self::Login => "Sign in",
            Self::Dashboard => "Dashboard",
            Self::Payments => "Payments",
            Self::Wallet => "Wallet",
            Self::Marketplace => "Marketplace",
            Self::Admin => "Admin",
            Self::NotFound => "Not found",
        }
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
