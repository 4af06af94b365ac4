//! 前端错误类型
//!
//! - `ApiError`: 调用后端失败，在调用处转换为提示消息，本地状态保持不变
//! - `ValidationError`: 表单校验失败，在发起任何网络请求之前处理

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// 请求构建或网络失败
    #[error("network error: {0}")]
    Network(String),
    /// 非 2xx 状态码
    #[error("request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    /// 响应体无法解析
    #[error("invalid response: {0}")]
    Decode(String),
    /// 后端返回 `success: false`
    #[error("{0}")]
    Rejected(String),
    /// 成功响应中缺少 `data`
    #[error("response carried no data")]
    MissingData,
    /// 尚未登录，没有可用的访问令牌
    #[error("not signed in")]
    Unauthenticated,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} must be a positive amount with at most {max_decimals} decimals")]
    Amount {
        field: &'static str,
        max_decimals: usize,
    },
    #[error("memo must be at most {max} bytes")]
    MemoTooLong { max: usize },
    #[error("{0} is not a valid email address")]
    Email(String),
    #[error("asset code must be 1-12 letters or digits, got {0:?}")]
    AssetCode(String),
    #[error("selling and buying asset must differ")]
    SameAsset,
    /// 当前用户资料未加载，无法确定操作者邮箱
    #[error("your profile is not loaded yet, please sign in again")]
    NoActor,
}
