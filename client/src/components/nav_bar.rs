//! Top navigation bar with section links and sign-out.

use leptos::prelude::*;

use crate::routes::{CUSTOMERS_PATH, FINANCIAL_REPORT_PATH, HOME_PATH};
use crate::state::auth::AuthState;

#[component]
pub fn NavBar() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let busy = RwSignal::new(false);

    #[cfg(feature = "csr")]
    let navigate = leptos_router::hooks::use_navigate();
    #[cfg(feature = "csr")]
    let services = crate::app::use_services();

    let on_sign_out = move |_| {
        if busy.get() {
            return;
        }
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let navigate = navigate.clone();
            let client = services.with_value(|s| s.client.clone());
            leptos::task::spawn_local(async move {
                let next = crate::auth::sign_out(&client).await;
                busy.set(false);
                navigate(next, leptos_router::NavigateOptions::default());
            });
        }
    };

    view! {
        <nav class="nav-bar">
            <a class="nav-bar__brand" href=HOME_PATH>"Linguadesk"</a>
            <Show when=move || auth.get().authenticated>
                <a class="nav-bar__link" href=CUSTOMERS_PATH>"Customers"</a>
                <a class="nav-bar__link" href=FINANCIAL_REPORT_PATH>"Financial report"</a>
            </Show>
            <span class="nav-bar__spacer"></span>
            <span class="nav-bar__user">{move || auth.get().display_name().to_owned()}</span>
            <button
                class="nav-bar__button"
                hidden=move || !auth.get().authenticated
                disabled=move || busy.get()
                on:click=on_sign_out
            >
                "Sign out"
            </button>
        </nav>
    }
}
