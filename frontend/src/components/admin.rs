mod bulk_upload_section;
mod form_state;

use std::future::Future;

use crate::api::use_api;
use crate::components::fields::{SubmitButton, TextField};
use crate::components::layout::AppShell;
use crate::error::ApiError;
use crate::notify::{Notifier, use_notifier};
use crate::session::use_session;
use bulk_upload_section::BulkUploadSection;
use felix_shared::EntitySummary;
use felix_shared::protocol::Ack;
use form_state::{AssetForm, EntityForm, IssueForm, UserForm};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 执行一次提交：置忙、等待结果、提示，成功后执行 `on_ok`
fn run_submit<F, K>(
    set_busy: WriteSignal<bool>,
    notifier: Notifier,
    success: String,
    task: F,
    on_ok: K,
) where
    F: Future<Output = Result<Ack, ApiError>> + 'static,
    K: FnOnce() + 'static,
{
    set_busy.set(true);
    spawn_local(async move {
        match task.await {
            Ok(_) => {
                notifier.success(success);
                on_ok();
            }
            Err(e) => notifier.error(e.to_string()),
        }
        set_busy.set(false);
    });
}

#[component]
pub fn AdminPage() -> impl IntoView {
    view! {
        <AppShell>
            <div class="grid md:grid-cols-2 gap-8">
                <CreateUserSection />
                <BulkUploadSection />
                <EntitySection />
                <CreateAssetSection />
                <IssueAssetSection />
            </div>
        </AppShell>
    }
}

#[component]
fn CreateUserSection() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let form = UserForm::new();
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        match form.draft().into_request() {
            Ok(request) => {
                let client = api.client();
                let success = format!("User {} created", request.username);
                run_submit(
                    set_busy,
                    notifier,
                    success,
                    async move { client.create_user(request).await },
                    move || form.reset(),
                );
            }
            Err(e) => notifier.error(e.to_string()),
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body" on:submit=on_submit>
                <h3 class="card-title">"Create user"</h3>
                <TextField id="username" label="Username" value=form.username />
                <TextField id="user_email" label="Email" value=form.email input_type="email" />
                <div class="grid grid-cols-2 gap-4">
                    <TextField id="first_name" label="First name" value=form.first_name />
                    <TextField id="last_name" label="Last name" value=form.last_name />
                </div>
                <div class="card-actions justify-end mt-2">
                    <SubmitButton label="Create" busy=busy />
                </div>
            </form>
        </div>
    }
}

#[component]
fn EntitySection() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let form = EntityForm::new();
    let (busy, set_busy) = signal(false);
    let (entities, set_entities) = signal(Vec::<EntitySummary>::new());

    let load = move || {
        let email = api.email();
        if email.is_empty() {
            return;
        }
        let client = api.client();
        spawn_local(async move {
            match client.list_entities(&email).await {
                Ok(list) => set_entities.set(list),
                Err(e) => notifier.error(format!("Failed to load entities: {e}")),
            }
        });
    };

    let profile = use_session().profile();
    Effect::new(move |_| {
        if !profile.with(|p| p.email.is_empty()) {
            load();
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        match form.draft().into_request(&api.email()) {
            Ok(request) => {
                let client = api.client();
                let success = format!("Entity {} created", request.name);
                run_submit(
                    set_busy,
                    notifier,
                    success,
                    async move { client.create_entity(request).await },
                    move || {
                        form.reset();
                        load();
                    },
                );
            }
            Err(e) => notifier.error(e.to_string()),
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body" on:submit=on_submit>
                <h3 class="card-title">"Entities"</h3>
                <TextField id="entity_name" label="Name" value=form.name />
                <TextField id="entity_email" label="Email" value=form.email input_type="email" />
                <div class="card-actions justify-end mt-2">
                    <SubmitButton label="Create entity" busy=busy />
                </div>
                <ul class="menu bg-base-200 rounded-box mt-4">
                    <For
                        each=move || entities.get()
                        key=|e| e.email.clone()
                        children=|entity| view! {
                            <li><span>{entity.name} " · " <span class="opacity-60">{entity.email}</span></span></li>
                        }
                    />
                </ul>
            </form>
        </div>
    }
}

#[component]
fn CreateAssetSection() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let form = AssetForm::new();
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        match form.draft().into_request(&api.email()) {
            Ok(request) => {
                let client = api.client();
                let success = format!("Asset {} created", request.asset_code);
                run_submit(
                    set_busy,
                    notifier,
                    success,
                    async move { client.create_asset(&request).await },
                    move || form.reset(),
                );
            }
            Err(e) => notifier.error(e.to_string()),
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body" on:submit=on_submit>
                <h3 class="card-title">"Create asset"</h3>
                <TextField id="asset_code" label="Asset code" value=form.asset_code placeholder="FLX" />
                <TextField id="asset_name" label="Name" value=form.name />
                <TextField id="asset_description" label="Description" value=form.description />
                <div class="card-actions justify-end mt-2">
                    <SubmitButton label="Create asset" busy=busy />
                </div>
            </form>
        </div>
    }
}

#[component]
fn IssueAssetSection() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let form = IssueForm::new();
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        match form.draft().into_request(&api.email()) {
            Ok(request) => {
                let client = api.client();
                let success = format!(
                    "Issued {} {} to {}",
                    request.amount, request.asset_code, request.recipient_email
                );
                run_submit(
                    set_busy,
                    notifier,
                    success,
                    async move { client.issue_asset(&request).await },
                    move || form.reset(),
                );
            }
            Err(e) => notifier.error(e.to_string()),
        }
    };

    view! {
        <div class="card bg-base-100 shadow-xl">
            <form class="card-body" on:submit=on_submit>
                <h3 class="card-title">"Issue asset"</h3>
                <TextField id="issue_code" label="Asset code" value=form.asset_code placeholder="FLX" />
                <TextField id="issue_amount" label="Amount" value=form.amount />
                <TextField id="issue_recipient" label="Recipient email" value=form.recipient_email input_type="email" />
                <div class="card-actions justify-end mt-2">
                    <SubmitButton label="Issue" busy=busy />
                </div>
            </form>
        </div>
    }
}
