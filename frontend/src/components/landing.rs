//! 公开页面：落地页、欢迎页、404、配置错误提示

use crate::components::icons::WalletIcon;
use crate::session::use_session;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;

#[component]
pub fn LandingPage() -> impl IntoView {
    let session = use_session();
    let signed_in = session.is_authenticated();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content text-center">
                <div class="max-w-md space-y-6">
                    <div class="flex justify-center text-primary">
                        <WalletIcon attr:class="h-12 w-12" />
                    </div>
                    <h1 class="text-5xl font-bold">"Felix"</h1>
                    <p class="text-base-content/70">
                        "Send, receive and trade digital assets on the Stellar network."
                    </p>
                    <Show
                        when=move || signed_in.get()
                        fallback=|| view! {
                            <div class="flex gap-2 justify-center">
                                <Link to=AppRoute::Login class="btn btn-primary">"Sign in"</Link>
                                <Link to=AppRoute::Welcome class="btn btn-ghost">"Learn more"</Link>
                            </div>
                        }
                    >
                        <Link to=AppRoute::Dashboard class="btn btn-primary">"Open dashboard"</Link>
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn WelcomePage() -> impl IntoView {
    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col max-w-2xl">
                <h1 class="text-4xl font-bold">"Welcome to Felix"</h1>
                <ul class="steps steps-vertical">
                    <li class="step step-primary">"Sign in with your Felix account"</li>
                    <li class="step step-primary">"Export your wallet keys and keep them safe"</li>
                    <li class="step">"Send payments or place offers on the marketplace"</li>
                </ul>
                <Link to=AppRoute::Login class="btn btn-primary">"Get started"</Link>
            </div>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
                <Link to=AppRoute::Landing class="btn btn-ghost mt-4">"Back home"</Link>
            </div>
        </div>
    }
}

/// 启动失败时替代整个应用渲染
#[component]
pub fn ConfigNotice(message: String) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200 p-4">
            <div role="alert" class="alert alert-error max-w-xl">
                <div>
                    <h3 class="font-bold">"Felix could not start"</h3>
                    <div class="text-sm font-mono">{message}</div>
                </div>
            </div>
        </div>
    }
}
