use crate::components::icons::ShieldCheck;
use crate::session::use_session;
use leptos::prelude::*;

/// 登录页
///
/// 凭据由身份提供方页面收集，这里只负责跳转。已登录用户访问此页会被会话控制器
/// 重定向到仪表盘。
#[component]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let (is_redirecting, set_is_redirecting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_redirecting.set(true);
        session.login();
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="flex flex-col items-center gap-2">
                        <div class="p-3 bg-primary/10 rounded-2xl text-primary">
                            <ShieldCheck attr:class="h-8 w-8" />
                        </div>
                        <h1 class="text-3xl font-bold">"Felix Wallet"</h1>
                        <p class="text-base-content/70">
                            "Sign in with your Felix account to continue"
                        </p>
                    </div>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <div class="form-control mt-2">
                            <button class="btn btn-primary" disabled=move || is_redirecting.get()>
                                {move || if is_redirecting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Redirecting..." }.into_any()
                                } else {
                                    "Sign in".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
