//! 批量导入用户
//!
//! 粘贴 CSV，先本地解析并预览错误，确认后逐个创建。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::bulk_upload::{CsvLineError, parse_user_csv};
use crate::components::icons::Upload;
use crate::notify::use_notifier;

#[component]
pub fn BulkUploadSection() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let text = RwSignal::new(String::new());
    let (busy, set_busy) = signal(false);
    let (progress, set_progress) = signal((0usize, 0usize));

    let parsed = Memo::new(move |_| text.with(|t| parse_user_csv(t)));
    let errors = move || parsed.with(|p| p.errors.clone());

    let on_upload = move |_| {
        let users = parsed.with_untracked(|p| p.users.clone());
        if users.is_empty() {
            notifier.error("Nothing to upload");
            return;
        }
        let client = api.client();
        set_busy.set(true);
        set_progress.set((0, users.len()));
        spawn_local(async move {
            let total = users.len();
            let mut created = 0;
            for user in users {
                let email = user.email.clone();
                match client.create_user(user).await {
                    Ok(_) => created += 1,
                    Err(e) => notifier.error(format!("{email}: {e}")),
                }
                set_progress.update(|(done, _)| *done += 1);
            }
            tracing::info!(created, total, "bulk user upload finished");
            if created == total {
                notifier.success(format!("Created {created} users"));
                text.set(String::new());
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <div class="card-body">
                <h3 class="card-title gap-2">
                    <Upload attr:class="h-5 w-5 text-primary" /> "Bulk create users"
                </h3>
                <p class="text-sm text-base-content/70">
                    "One user per line: " <code>"username,email[,firstName,lastName]"</code>
                </p>
                <textarea
                    class="textarea textarea-bordered font-mono text-xs h-40"
                    placeholder="username,email,firstName,lastName"
                    on:input=move |ev| text.set(event_target_value(&ev))
                    prop:value=move || text.get()
                ></textarea>
                <div class="text-sm">
                    {move || format!("{} valid rows", parsed.with(|p| p.users.len()))}
                </div>
                <ul class="text-xs text-error space-y-1">
                    <For
                        each=errors
                        key=|e: &CsvLineError| e.line
                        children=|e| view! { <li>{format!("line {}: {}", e.line, e.message)}</li> }
                    />
                </ul>
                <Show when=move || busy.get()>
                    <progress
                        class="progress progress-primary w-full"
                        value=move || progress.get().0
                        max=move || progress.get().1
                    ></progress>
                </Show>
                <div class="card-actions justify-end">
                    <button class="btn btn-primary" disabled=move || busy.get() on:click=on_upload>
                        "Upload"
                    </button>
                </div>
            </div>
        </div>
    }
}
