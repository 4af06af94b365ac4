//! 表单校验
//!
//! 每个表单对应一个只含字符串字段的草稿结构体，`into_request` 在发起网络请求之前
//! 完成全部校验并生成请求对象。

use felix_shared::OfferSide;
use felix_shared::protocol::{
    CreateAssetRequest, CreateEntityRequest, CreateUserRequest, IssueAssetRequest, OfferRequest,
    SendPaymentRequest,
};

use crate::error::ValidationError;

/// Stellar 金额精度
pub const AMOUNT_MAX_DECIMALS: usize = 7;
/// Stellar 文本备注上限（字节）
pub const MEMO_MAX_BYTES: usize = 28;
const ASSET_CODE_MAX_LEN: usize = 12;

// =========================================================
// 字段校验
// =========================================================

pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(value.to_string())
}

/// 正的十进制数，最多 7 位小数
pub fn amount(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = required(field, value)?;
    let invalid = || ValidationError::Amount {
        field,
        max_decimals: AMOUNT_MAX_DECIMALS,
    };

    let (whole, fraction) = match value.split_once('.') {
        Some((w, f)) => (w, f),
        None => (value.as_str(), ""),
    };
    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !digits_only(whole) || !digits_only(fraction) || fraction.len() > AMOUNT_MAX_DECIMALS {
        return Err(invalid());
    }
    if value.contains('.') && fraction.is_empty() {
        return Err(invalid());
    }
    if !whole.chars().chain(fraction.chars()).any(|c| c != '0') {
        return Err(invalid());
    }
    Ok(value)
}

pub fn email(value: &str) -> Result<String, ValidationError> {
    let value = required("email", value)?;
    let invalid = || ValidationError::Email(value.clone());

    let Some((local, domain)) = value.split_once('@') else {
        return Err(invalid());
    };
    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@');
    if local.is_empty() || !domain_ok || value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    Ok(value)
}

/// 操作者邮箱取自会话资料，资料未加载时为空串
fn actor(value: &str) -> Result<String, ValidationError> {
    email(value).map_err(|_| ValidationError::NoActor)
}

pub fn asset_code(value: &str) -> Result<String, ValidationError> {
    let value = required("asset code", value)?;
    if value.len() > ASSET_CODE_MAX_LEN || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::AssetCode(value));
    }
    Ok(value.to_ascii_uppercase())
}

pub fn memo(value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.len() > MEMO_MAX_BYTES {
        return Err(ValidationError::MemoTooLong {
            max: MEMO_MAX_BYTES,
        });
    }
    Ok(value.to_string())
}

// =========================================================
// 草稿
// =========================================================

/// 转账表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentDraft {
    /// 收款人邮箱或公钥
    pub recipient: String,
    pub amount: String,
    pub memo: String,
}

impl PaymentDraft {
    pub fn into_request(self, sender_email: &str) -> Result<SendPaymentRequest, ValidationError> {
        let sender_email = actor(sender_email)?;
        Ok(SendPaymentRequest {
            recipient: required("recipient", &self.recipient)?,
            amount: amount("amount", &self.amount)?,
            memo: memo(&self.memo)?,
            sender_email,
        })
    }
}

/// 资产发行表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueDraft {
    pub asset_code: String,
    pub amount: String,
    pub recipient_email: String,
}

impl IssueDraft {
    pub fn into_request(self, issuer_email: &str) -> Result<IssueAssetRequest, ValidationError> {
        let issuer_email = actor(issuer_email)?;
        Ok(IssueAssetRequest {
            asset_code: asset_code(&self.asset_code)?,
            amount: amount("amount", &self.amount)?,
            recipient_email: email(&self.recipient_email)?,
            issuer_email,
        })
    }
}

/// 新建资产表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetDraft {
    pub asset_code: String,
    pub name: String,
    pub description: String,
}

impl AssetDraft {
    pub fn into_request(self, creator_email: &str) -> Result<CreateAssetRequest, ValidationError> {
        let creator_email = actor(creator_email)?;
        Ok(CreateAssetRequest {
            asset_code: asset_code(&self.asset_code)?,
            name: required("name", &self.name)?,
            description: self.description.trim().to_string(),
            creator_email,
        })
    }
}

/// 新建实体表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityDraft {
    pub name: String,
    pub email: String,
}

impl EntityDraft {
    pub fn into_request(self, creator_email: &str) -> Result<CreateEntityRequest, ValidationError> {
        let creator_email = actor(creator_email)?;
        Ok(CreateEntityRequest {
            tenant: String::new(),
            name: required("name", &self.name)?,
            email: email(&self.email)?,
            creator_email,
        })
    }
}

/// 新建用户表单（也用于批量导入的每一行）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserDraft {
    pub fn into_request(self) -> Result<CreateUserRequest, ValidationError> {
        Ok(CreateUserRequest {
            tenant: String::new(),
            username: required("username", &self.username)?,
            email: email(&self.email)?,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        })
    }
}

/// 挂单表单
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferDraft {
    pub side: OfferSide,
    pub selling_asset: String,
    pub buying_asset: String,
    pub amount: String,
    pub price: String,
}

impl OfferDraft {
    pub fn into_request(self, email: &str) -> Result<OfferRequest, ValidationError> {
        let email = actor(email)?;
        let selling_asset = asset_code(&self.selling_asset)?;
        let buying_asset = asset_code(&self.buying_asset)?;
        if selling_asset == buying_asset {
            return Err(ValidationError::SameAsset);
        }
        Ok(OfferRequest {
            side: self.side,
            email,
            selling_asset,
            buying_asset,
            amount: amount("amount", &self.amount)?,
            price: amount("price", &self.price)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount_error(field: &'static str) -> ValidationError {
        ValidationError::Amount {
            field,
            max_decimals: AMOUNT_MAX_DECIMALS,
        }
    }

    #[test]
    fn amounts() {
        for ok in ["1", "0.5", ".5", "10.0000001", " 42 "] {
            assert!(amount("amount", ok).is_ok(), "{ok} should be accepted");
        }
        assert_eq!(amount("amount", " 42 ").unwrap(), "42");

        for bad in ["0", "0.000", "-1", "1.", "1.12345678", "1e5", "1,5", "."] {
            assert_eq!(amount("amount", bad), Err(amount_error("amount")), "{bad}");
        }
        assert_eq!(amount("amount", "  "), Err(ValidationError::Required("amount")));
    }

    #[test]
    fn emails() {
        assert_eq!(email(" a@b.co ").unwrap(), "a@b.co");
        for bad in ["ab.co", "@b.co", "a@bco", "a@.co", "a@b.", "a b@c.de", "a@b@c.de"] {
            assert!(matches!(email(bad), Err(ValidationError::Email(_))), "{bad}");
        }
    }

    #[test]
    fn asset_codes_are_uppercased() {
        assert_eq!(asset_code("flx").unwrap(), "FLX");
        assert!(matches!(asset_code("TOO-LONG"), Err(ValidationError::AssetCode(_))));
        assert!(matches!(asset_code("ABCDEFGHIJKLM"), Err(ValidationError::AssetCode(_))));
    }

    #[test]
    fn payment_draft_builds_request() {
        let draft = PaymentDraft {
            recipient: " bob@felix.test ".to_string(),
            amount: "12.5".to_string(),
            memo: "rent".to_string(),
        };
        let request = draft.into_request("alice@felix.test").unwrap();
        assert_eq!(request.recipient, "bob@felix.test");
        assert_eq!(request.amount, "12.5");
        assert_eq!(request.sender_email, "alice@felix.test");
    }

    #[test]
    fn payment_draft_rejects_long_memo() {
        let draft = PaymentDraft {
            recipient: "bob".to_string(),
            amount: "1".to_string(),
            memo: "x".repeat(MEMO_MAX_BYTES + 1),
        };
        assert_eq!(
            draft.into_request("a@b.c"),
            Err(ValidationError::MemoTooLong {
                max: MEMO_MAX_BYTES
            })
        );
    }

    #[test]
    fn payment_draft_requires_recipient_first() {
        let draft = PaymentDraft::default();
        assert_eq!(
            draft.into_request("a@b.c"),
            Err(ValidationError::Required("recipient"))
        );
    }

    #[test]
    fn drafts_refuse_missing_actor_email() {
        let payment = PaymentDraft {
            recipient: "bob@felix.test".to_string(),
            amount: "1".to_string(),
            memo: String::new(),
        };
        assert_eq!(payment.clone().into_request(""), Err(ValidationError::NoActor));
        assert_eq!(payment.into_request("guest"), Err(ValidationError::NoActor));

        let issue = IssueDraft {
            asset_code: "FLX".to_string(),
            amount: "5".to_string(),
            recipient_email: "bob@felix.test".to_string(),
        };
        assert_eq!(issue.into_request(""), Err(ValidationError::NoActor));

        let asset = AssetDraft {
            asset_code: "FLX".to_string(),
            name: "Felix".to_string(),
            description: String::new(),
        };
        assert_eq!(asset.clone().into_request(" "), Err(ValidationError::NoActor));
        assert_eq!(
            asset.into_request("admin@felix.test").unwrap().creator_email,
            "admin@felix.test"
        );

        let entity = EntityDraft {
            name: "Shop".to_string(),
            email: "shop@felix.test".to_string(),
        };
        assert_eq!(entity.into_request(""), Err(ValidationError::NoActor));

        let offer = OfferDraft {
            side: OfferSide::Buy,
            selling_asset: "XLM".to_string(),
            buying_asset: "FLX".to_string(),
            amount: "1".to_string(),
            price: "1".to_string(),
        };
        assert_eq!(offer.into_request(""), Err(ValidationError::NoActor));
    }

    #[test]
    fn offer_needs_distinct_assets_and_valid_price() {
        let mut draft = OfferDraft {
            side: OfferSide::Sell,
            selling_asset: "xlm".to_string(),
            buying_asset: "XLM".to_string(),
            amount: "10".to_string(),
            price: "0.25".to_string(),
        };
        assert_eq!(
            draft.clone().into_request("a@b.c"),
            Err(ValidationError::SameAsset)
        );

        draft.buying_asset = "FLX".to_string();
        draft.price = "0".to_string();
        assert_eq!(draft.clone().into_request("a@b.c"), Err(amount_error("price")));

        draft.price = "0.25".to_string();
        let request = draft.into_request("a@b.c").unwrap();
        assert_eq!(request.side, OfferSide::Sell);
        assert_eq!(request.selling_asset, "XLM");
    }

    #[test]
    fn user_draft_trims_optional_names() {
        let request = UserDraft {
            username: "alice".to_string(),
            email: "alice@felix.test".to_string(),
            first_name: " Alice ".to_string(),
            last_name: String::new(),
        }
        .into_request()
        .unwrap();
        assert_eq!(request.first_name, "Alice");
        assert_eq!(request.last_name, "");
    }
}
