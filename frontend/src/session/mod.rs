//! 会话生命周期
//!
//! - `identity`: 身份提供方抽象
//! - `profile`: 本地持久化的用户资料
//! - `state`: 纯状态机
//! - `gate`: 渲染闸门与重定向判定
//! - `controller`: 把以上几部分串起来
//! - `context`: Leptos 绑定

mod context;
mod controller;
mod gate;
mod identity;
mod profile;
mod state;

pub use context::{LoadingScreen, SessionContext, SessionGate, provide_session, use_session};
pub use controller::{Navigator, SessionConfig, SessionController, SessionObserver};
pub use gate::{Gate, gate, redirect_target};
pub use identity::{
    IdentityClient, IdentityError, IdentityEvent, IdentityProfile, IdentitySink, InitOptions,
};
pub use profile::{ProfilePatch, ProfileStore, UserProfile};
pub use state::{Session, SessionPhase};
