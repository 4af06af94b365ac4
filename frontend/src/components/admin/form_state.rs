//! 管理后台表单状态
//!
//! 每个表单一组 `RwSignal`，负责持有、重置以及转换为草稿。

use leptos::prelude::*;

use crate::forms::{AssetDraft, EntityDraft, IssueDraft, UserDraft};

#[derive(Clone, Copy)]
pub struct UserForm {
    pub username: RwSignal<String>,
    pub email: RwSignal<String>,
    pub first_name: RwSignal<String>,
    pub last_name: RwSignal<String>,
}

impl UserForm {
    pub fn new() -> Self {
        Self {
            username: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            first_name: RwSignal::new(String::new()),
            last_name: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        self.username.set(String::new());
        self.email.set(String::new());
        self.first_name.set(String::new());
        self.last_name.set(String::new());
    }

    pub fn draft(&self) -> UserDraft {
        UserDraft {
            username: self.username.get_untracked(),
            email: self.email.get_untracked(),
            first_name: self.first_name.get_untracked(),
            last_name: self.last_name.get_untracked(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct EntityForm {
    pub name: RwSignal<String>,
    pub email: RwSignal<String>,
}

impl EntityForm {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        self.name.set(String::new());
        self.email.set(String::new());
    }

    pub fn draft(&self) -> EntityDraft {
        EntityDraft {
            name: self.name.get_untracked(),
            email: self.email.get_untracked(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct AssetForm {
    pub asset_code: RwSignal<String>,
    pub name: RwSignal<String>,
    pub description: RwSignal<String>,
}

impl AssetForm {
    pub fn new() -> Self {
        Self {
            asset_code: RwSignal::new(String::new()),
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        self.asset_code.set(String::new());
        self.name.set(String::new());
        self.description.set(String::new());
    }

    pub fn draft(&self) -> AssetDraft {
        AssetDraft {
            asset_code: self.asset_code.get_untracked(),
            name: self.name.get_untracked(),
            description: self.description.get_untracked(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct IssueForm {
    pub asset_code: RwSignal<String>,
    pub amount: RwSignal<String>,
    pub recipient_email: RwSignal<String>,
}

impl IssueForm {
    pub fn new() -> Self {
        Self {
            asset_code: RwSignal::new(String::new()),
            amount: RwSignal::new(String::new()),
            recipient_email: RwSignal::new(String::new()),
        }
    }

    pub fn reset(&self) {
        self.amount.set(String::new());
        self.recipient_email.set(String::new());
    }

    pub fn draft(&self) -> IssueDraft {
        IssueDraft {
            asset_code: self.asset_code.get_untracked(),
            amount: self.amount.get_untracked(),
            recipient_email: self.recipient_email.get_untracked(),
        }
    }
}
