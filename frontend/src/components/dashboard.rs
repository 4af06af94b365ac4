use crate::api::use_api;
use crate::components::icons::RefreshCw;
use crate::components::layout::AppShell;
use crate::notify::use_notifier;
use crate::session::use_session;
use felix_shared::{Balance, OwnerKind, TransactionRecord};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let profile = use_session().profile();

    let (balances, set_balances) = signal(Vec::<Balance>::new());
    let (transactions, set_transactions) = signal(Vec::<TransactionRecord>::new());
    let (loading, set_loading) = signal(false);

    let load = move || {
        let email = api.email();
        if email.is_empty() {
            return;
        }
        let client = api.client();
        set_loading.set(true);
        spawn_local(async move {
            match client.balances(OwnerKind::User, &email, None).await {
                Ok(data) => set_balances.set(data),
                Err(e) => notifier.error(format!("Failed to load balances: {e}")),
            }
            match client.transactions(&email).await {
                Ok(data) => set_transactions.set(data),
                Err(e) => notifier.error(format!("Failed to load transactions: {e}")),
            }
            set_loading.set(false);
        });
    };

    // 资料加载完成（邮箱可用）后拉取
    Effect::new(move |_| {
        if !profile.with(|p| p.email.is_empty()) {
            load();
        }
    });

    let tx_count = move || transactions.with(|t| t.len());

    view! {
        <AppShell>
            <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                <For
                    each=move || balances.get()
                    key=|b| b.key()
                    children=|balance| {
                        view! {
                            <div class="stat">
                                <div class="stat-title">{balance.asset_label().to_string()}</div>
                                <div class="stat-value text-primary text-2xl font-mono">{balance.balance.clone()}</div>
                                <div class="stat-desc">{balance.asset_type.clone()}</div>
                            </div>
                        }
                    }
                />
                <Show when=move || balances.with(|b| b.is_empty()) && !loading.get()>
                    <div class="stat">
                        <div class="stat-title">"Balance"</div>
                        <div class="stat-value text-base-content/50 text-2xl">"-"</div>
                        <div class="stat-desc">"No funded assets yet"</div>
                    </div>
                </Show>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0">
                    <div class="flex items-center justify-between p-6 pb-2">
                        <div>
                            <h3 class="card-title">"Transactions"</h3>
                            <p class="text-base-content/70 text-sm">{move || format!("{} recent", tx_count())}</p>
                        </div>
                        <button on:click=move |_| load() disabled=move || loading.get() class="btn btn-ghost btn-circle">
                            <RefreshCw attr:class=move || if loading.get() { "h-5 w-5 animate-spin" } else { "h-5 w-5" } />
                        </button>
                    </div>

                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Date"</th>
                                    <th>"Hash"</th>
                                    <th class="hidden md:table-cell">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || tx_count() == 0 && !loading.get()>
                                    <tr>
                                        <td colspan="3" class="text-center py-8 text-base-content/50">
                                            "No transactions yet."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || loading.get() && tx_count() == 0>
                                    <tr>
                                        <td colspan="3" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span> " Loading..."
                                        </td>
                                    </tr>
                                </Show>
                                <For
                                    each=move || transactions.get()
                                    key=|tx| tx.tx_hash.clone()
                                    children=|tx| {
                                        view! {
                                            <tr>
                                                <td class="whitespace-nowrap">{tx.created_at.format("%Y-%m-%d %H:%M").to_string()}</td>
                                                <td class="font-mono text-xs">{short_hash(&tx.tx_hash)}</td>
                                                <td class="hidden md:table-cell text-sm">{tx.actions.join(", ")}</td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </AppShell>
    }
}

fn short_hash(hash: &str) -> String {
    match (hash.get(..8), hash.len().checked_sub(8).and_then(|i| hash.get(i..))) {
        (Some(head), Some(tail)) if hash.len() > 16 => format!("{head}…{tail}"),
        _ => hash.to_string(),
    }
}
