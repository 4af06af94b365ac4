use std::rc::Rc;

use crate::api::use_api;
use crate::components::fields::{SubmitButton, TextField};
use crate::components::icons::WalletIcon;
use crate::components::layout::AppShell;
use crate::notify::use_notifier;
use crate::session::use_session;
use crate::wallet::{AccountKeyStore, AccountKeys};
use crate::web::BrowserStorage;
use felix_shared::WalletKeys;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn key_store() -> AccountKeyStore {
    AccountKeyStore::new(Rc::new(BrowserStorage))
}

#[component]
pub fn WalletPage() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let profile = use_session().profile();

    let entity_name = RwSignal::new(String::new());
    let (busy, set_busy) = signal(false);
    let (exported, set_exported) = signal(Vec::<WalletKeys>::new());
    let (cached, set_cached) = signal(Option::<AccountKeys>::None);
    let (reveal, set_reveal) = signal(false);

    // 读取本地缓存
    Effect::new(move |_| {
        let email = profile.with(|p| p.email.clone());
        if !email.is_empty() {
            set_cached.set(key_store().get(&email));
        }
    });

    let on_export = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let email = api.email();
        let entity = entity_name.get_untracked();
        let entity = entity.trim().to_string();
        let client = api.client();
        set_busy.set(true);
        spawn_local(async move {
            let entity = (!entity.is_empty()).then_some(entity);
            match client.export_wallet(&email, entity.as_deref()).await {
                Ok(keys) if keys.is_empty() => notifier.error("No wallet found for this account"),
                Ok(keys) => {
                    set_reveal.set(false);
                    set_exported.set(keys);
                }
                Err(e) => notifier.error(format!("Export failed: {e}")),
            }
            set_busy.set(false);
        });
    };

    let on_import = move |_| {
        let email = api.email();
        match key_store().import(&email, exported.get_untracked()) {
            Some(keys) => {
                set_cached.set(Some(keys));
                notifier.success("Keys saved in this browser");
            }
            None => notifier.error("Could not save keys in this browser"),
        }
    };

    let on_forget = move |_| {
        key_store().remove(&api.email());
        set_cached.set(None);
        notifier.success("Keys removed from this browser");
    };

    view! {
        <AppShell>
            <div class="grid md:grid-cols-2 gap-8">
                <div class="card bg-base-100 shadow-xl">
                    <form class="card-body" on:submit=on_export>
                        <h3 class="card-title gap-2">
                            <WalletIcon attr:class="h-5 w-5 text-primary" /> "Export wallet"
                        </h3>
                        <TextField id="entity" label="Entity name (leave empty for your own wallet)" value=entity_name />
                        <div class="form-control mt-4">
                            <SubmitButton label="Export keys" busy=busy />
                        </div>

                        <For
                            each=move || exported.get()
                            key=|k| k.public_key.clone()
                            children=move |keys| {
                                let secret = keys.secret.clone();
                                view! {
                                    <div class="mockup-code text-xs mt-4">
                                        <pre data-prefix="pub"><code>{keys.public_key.clone()}</code></pre>
                                        <pre data-prefix="sec"><code>
                                            {move || if reveal.get() { secret.clone() } else { "•".repeat(16) }}
                                        </code></pre>
                                    </div>
                                }
                            }
                        />
                        <Show when=move || !exported.with(|k| k.is_empty())>
                            <div class="flex gap-2 mt-2">
                                <button type="button" class="btn btn-ghost btn-sm" on:click=move |_| set_reveal.update(|r| *r = !*r)>
                                    {move || if reveal.get() { "Hide secret" } else { "Reveal secret" }}
                                </button>
                                <button type="button" class="btn btn-secondary btn-sm" on:click=on_import>
                                    "Save in this browser"
                                </button>
                            </div>
                        </Show>
                    </form>
                </div>

                <div class="card bg-base-100 shadow-xl">
                    <div class="card-body">
                        <h3 class="card-title">"Saved in this browser"</h3>
                        {move || match cached.get() {
                            Some(keys) => view! {
                                <div class="space-y-2">
                                    <p class="font-mono text-xs break-all">{keys.public_key}</p>
                                    <button class="btn btn-outline btn-error btn-sm" on:click=on_forget>"Forget keys"</button>
                                </div>
                            }.into_any(),
                            None => view! {
                                <p class="text-base-content/60 text-sm">"No keys stored locally."</p>
                            }.into_any(),
                        }}
                    </div>
                </div>
            </div>
        </AppShell>
    }
}
