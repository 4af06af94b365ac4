//! 通知提示
//!
//! 全局 toast 队列，通过 Context 共享；每条消息 3 秒后自动移除。

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const DISMISS_AFTER_MS: u32 = 3_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// 当前显示中的消息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastList {
    items: Vec<Toast>,
    next_id: u64,
}

impl ToastList {
    pub fn push(&mut self, kind: ToastKind, message: String) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast { id, kind, message });
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

#[derive(Clone, Copy)]
pub struct Notifier {
    toasts: RwSignal<ToastList>,
}

impl Notifier {
    fn new() -> Self {
        Self {
            toasts: RwSignal::new(ToastList::default()),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    fn push(&self, kind: ToastKind, message: String) {
        let mut id = 0;
        self.toasts.update(|list| id = list.push(kind, message));

        let toasts = self.toasts;
        Timeout::new(DISMISS_AFTER_MS, move || {
            toasts.try_update(|list| list.dismiss(id));
        })
        .forget();
    }
}

pub fn provide_notifier() -> Notifier {
    let notifier = Notifier::new();
    provide_context(notifier);
    notifier
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>()
        .expect("Notifier not found in context. Ensure provide_notifier was called.")
}

/// 通知提示框
#[component]
pub fn Toasts() -> impl IntoView {
    let notifier = use_notifier();
    let toasts = notifier.toasts;

    view! {
        <div class="toast toast-top toast-end z-50">
            <For
                each=move || toasts.with(|list| list.items().to_vec())
                key=|toast| toast.id
                children=|toast| {
                    let class = match toast.kind {
                        ToastKind::Success => "alert alert-success shadow-lg",
                        ToastKind::Error => "alert alert-error shadow-lg",
                    };
                    view! {
                        <div class=class>
                            <span>{toast.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_dismiss_targets_one() {
        let mut list = ToastList::default();
        let a = list.push(ToastKind::Success, "saved".to_string());
        let b = list.push(ToastKind::Error, "failed".to_string());
        assert_ne!(a, b);

        list.dismiss(a);
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.items()[0].message, "failed");

        list.dismiss(a);
        assert_eq!(list.items().len(), 1);
    }
}
