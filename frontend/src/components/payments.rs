use crate::api::use_api;
use crate::components::fields::{SubmitButton, TextField};
use crate::components::icons::SendIcon;
use crate::components::layout::AppShell;
use crate::forms::{MEMO_MAX_BYTES, PaymentDraft};
use crate::notify::use_notifier;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 转账表单状态
#[derive(Clone, Copy)]
struct PaymentForm {
    recipient: RwSignal<String>,
    amount: RwSignal<String>,
    memo: RwSignal<String>,
}

impl PaymentForm {
    fn new() -> Self {
        Self {
            recipient: RwSignal::new(String::new()),
            amount: RwSignal::new(String::new()),
            memo: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        self.recipient.set(String::new());
        self.amount.set(String::new());
        self.memo.set(String::new());
    }

    fn draft(&self) -> PaymentDraft {
        PaymentDraft {
            recipient: self.recipient.get_untracked(),
            amount: self.amount.get_untracked(),
            memo: self.memo.get_untracked(),
        }
    }
}

#[component]
pub fn PaymentsPage() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let form = PaymentForm::new();
    let (busy, set_busy) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match form.draft().into_request(&api.email()) {
            Ok(request) => request,
            Err(e) => {
                set_error_msg.set(Some(e.to_string()));
                return;
            }
        };

        set_error_msg.set(None);
        set_busy.set(true);
        let client = api.client();
        spawn_local(async move {
            match client.send_payment(&request).await {
                Ok(_) => {
                    notifier.success(format!("Sent {} to {}", request.amount, request.recipient));
                    form.reset();
                }
                Err(e) => notifier.error(format!("Payment failed: {e}")),
            }
            set_busy.set(false);
        });
    };

    view! {
        <AppShell>
            <div class="card bg-base-100 shadow-xl max-w-xl">
                <form class="card-body" on:submit=on_submit>
                    <h3 class="card-title gap-2">
                        <SendIcon attr:class="h-5 w-5 text-primary" /> "Send payment"
                    </h3>
                    <Show when=move || error_msg.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || error_msg.get().unwrap_or_default()}</span>
                        </div>
                    </Show>
                    <TextField id="recipient" label="Recipient (email or public key)" value=form.recipient placeholder="bob@example.com" />
                    <TextField id="amount" label="Amount (XLM)" value=form.amount placeholder="10.5" />
                    <TextField id="memo" label="Memo (optional)" value=form.memo />
                    <p class="text-xs text-base-content/60">
                        {move || format!("{}/{} bytes", form.memo.with(|m| m.trim().len()), MEMO_MAX_BYTES)}
                    </p>
                    <div class="form-control mt-4">
                        <SubmitButton label="Send" busy=busy />
                    </div>
                </form>
            </div>
        </AppShell>
    }
}
