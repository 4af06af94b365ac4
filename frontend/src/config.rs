//! 应用配置
//!
//! 配置在编译期通过环境变量注入（`option_env!`），构建时例如：
//!
//! ```text
//! FELIX_API_BASE_URL=https://api.felix.example \
//! FELIX_KEYCLOAK_URL=https://id.felix.example \
//! FELIX_KEYCLOAK_REALM=felix FELIX_KEYCLOAK_CLIENT_ID=felix-web trunk build
//! ```
//!
//! 缺失或格式错误时不会 panic，而是由根组件渲染阻断提示。

use felix_shared::DEFAULT_TENANT;
use serde::Serialize;
use thiserror::Error;

pub const ENV_API_BASE_URL: &str = "FELIX_API_BASE_URL";
pub const ENV_KEYCLOAK_URL: &str = "FELIX_KEYCLOAK_URL";
pub const ENV_KEYCLOAK_REALM: &str = "FELIX_KEYCLOAK_REALM";
pub const ENV_KEYCLOAK_CLIENT_ID: &str = "FELIX_KEYCLOAK_CLIENT_ID";
pub const ENV_TENANT: &str = "FELIX_TENANT";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration value {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// keycloak-js 构造参数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeycloakConfig {
    pub url: String,
    pub realm: String,
    pub client_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 后端 API 根地址（不带末尾 `/`）
    pub api_base_url: String,
    pub keycloak: KeycloakConfig,
    /// 租户名，用于 `/api/v1/tenants/{tenant}/...`
    pub tenant: String,
}

impl AppConfig {
    /// 读取编译期注入的配置
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| {
            let value = match name {
                ENV_API_BASE_URL => option_env!("FELIX_API_BASE_URL"),
                ENV_KEYCLOAK_URL => option_env!("FELIX_KEYCLOAK_URL"),
                ENV_KEYCLOAK_REALM => option_env!("FELIX_KEYCLOAK_REALM"),
                ENV_KEYCLOAK_CLIENT_ID => option_env!("FELIX_KEYCLOAK_CLIENT_ID"),
                ENV_TENANT => option_env!("FELIX_TENANT"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    /// 从任意来源读取配置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let api_base_url = parse_base_url(ENV_API_BASE_URL, &required(ENV_API_BASE_URL)?)?;
        let keycloak_url = parse_base_url(ENV_KEYCLOAK_URL, &required(ENV_KEYCLOAK_URL)?)?;

        let tenant = lookup(ENV_TENANT)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_TENANT.to_string());

        Ok(Self {
            api_base_url,
            keycloak: KeycloakConfig {
                url: keycloak_url,
                realm: required(ENV_KEYCLOAK_REALM)?,
                client_id: required(ENV_KEYCLOAK_CLIENT_ID)?,
            },
            tenant,
        })
    }
}

fn parse_base_url(name: &'static str, value: &str) -> Result<String, ConfigError> {
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ConfigError::Invalid {
            name,
            reason: format!("expected an http(s) URL, got {value:?}"),
        });
    }
    Ok(value.trim_end_matches('/').to_string())
}
