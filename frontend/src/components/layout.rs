use crate::components::icons::{LogOut, WalletIcon};
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

const NAV_ITEMS: [AppRoute; 5] = [
    AppRoute::Dashboard,
    AppRoute::Payments,
    AppRoute::Wallet,
    AppRoute::Marketplace,
    AppRoute::Admin,
];

/// 已登录页面的外框：导航栏 + 内容区
#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let session = use_session();
    let router = use_router();
    let profile = session.profile();
    let current = router.current_route();

    let on_logout = move |_| session.logout();

    view! {
        <div class="min-h-screen bg-base-200 p-4 md:p-8 font-sans">
            <div class="max-w-7xl mx-auto space-y-8">
                <div class="navbar bg-base-100 rounded-box shadow-xl">
                    <div class="flex-1 gap-2">
                        <WalletIcon attr:class="text-primary h-6 w-6" />
                        <Link to=AppRoute::Dashboard class="btn btn-ghost text-xl">"Felix"</Link>
                        <ul class="menu menu-horizontal px-1 hidden md:flex">
                            {NAV_ITEMS
                                .into_iter()
                                .map(|route| {
                                    let class = move || {
                                        if current.get() == route { "active" } else { "" }
                                    };
                                    view! {
                                        <li class=class>
                                            <Link to=route>{route.title()}</Link>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    </div>
                    <div class="flex-none gap-2">
                        <span class="badge badge-neutral hidden md:inline-flex">
                            {move || profile.with(|p| p.username.clone())}
                        </span>
                        <button on:click=on_logout class="btn btn-outline btn-error gap-2">
                            <LogOut attr:class="h-4 w-4" /> "Sign out"
                        </button>
                    </div>
                </div>
                {children()}
            </div>
        </div>
    }
}
