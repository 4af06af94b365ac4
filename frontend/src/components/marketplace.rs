use crate::api::use_api;
use crate::components::fields::{SubmitButton, TextField};
use crate::components::icons::Store;
use crate::components::layout::AppShell;
use crate::forms::OfferDraft;
use crate::notify::use_notifier;
use felix_shared::{NATIVE_ASSET_CODE, OfferSide};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
struct OfferForm {
    side: RwSignal<OfferSide>,
    selling_asset: RwSignal<String>,
    buying_asset: RwSignal<String>,
    amount: RwSignal<String>,
    price: RwSignal<String>,
}

impl OfferForm {
    fn new() -> Self {
        Self {
            side: RwSignal::new(OfferSide::Buy),
            selling_asset: RwSignal::new(NATIVE_ASSET_CODE.to_string()),
            buying_asset: RwSignal::new(String::new()),
            amount: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        self.amount.set(String::new());
        self.price.set(String::new());
    }

    fn draft(&self) -> OfferDraft {
        OfferDraft {
            side: self.side.get_untracked(),
            selling_asset: self.selling_asset.get_untracked(),
            buying_asset: self.buying_asset.get_untracked(),
            amount: self.amount.get_untracked(),
            price: self.price.get_untracked(),
        }
    }
}

#[component]
pub fn MarketplacePage() -> impl IntoView {
    let api = use_api();
    let notifier = use_notifier();
    let form = OfferForm::new();
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let request = match form.draft().into_request(&api.email()) {
            Ok(request) => request,
            Err(e) => {
                notifier.error(e.to_string());
                return;
            }
        };

        set_busy.set(true);
        let client = api.client();
        spawn_local(async move {
            match client.place_offer(&request).await {
                Ok(_) => {
                    notifier.success(format!("{} offer placed", request.side.as_str()));
                    form.reset();
                }
                Err(e) => notifier.error(format!("Offer failed: {e}")),
            }
            set_busy.set(false);
        });
    };

    let side_button = move |side: OfferSide, label: &'static str| {
        view! {
            <button
                type="button"
                class=move || if form.side.get() == side { "btn join-item btn-active" } else { "btn join-item" }
                on:click=move |_| form.side.set(side)
            >
                {label}
            </button>
        }
    };

    view! {
        <AppShell>
            <div class="card bg-base-100 shadow-xl max-w-xl">
                <form class="card-body" on:submit=on_submit>
                    <h3 class="card-title gap-2">
                        <Store attr:class="h-5 w-5 text-primary" /> "Place an offer"
                    </h3>
                    <div class="join">
                        {side_button(OfferSide::Buy, "Buy")}
                        {side_button(OfferSide::Sell, "Sell")}
                    </div>
                    <div class="grid grid-cols-2 gap-4">
                        <TextField id="selling" label="Selling asset" value=form.selling_asset placeholder="XLM" />
                        <TextField id="buying" label="Buying asset" value=form.buying_asset placeholder="FLX" />
                    </div>
                    <div class="grid grid-cols-2 gap-4">
                        <TextField id="offer_amount" label="Amount" value=form.amount placeholder="100" />
                        <TextField id="price" label="Price" value=form.price placeholder="0.25" />
                    </div>
                    <div class="form-control mt-4">
                        <SubmitButton label="Submit offer" busy=busy />
                    </div>
                </form>
            </div>
        </AppShell>
    }
}
