//! Authenticated landing page.

use leptos::prelude::*;

use crate::routes::{CUSTOMERS_PATH, FINANCIAL_REPORT_PATH};
use crate::state::auth::AuthState;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();

    view! {
        <section class="home">
            <h1>{move || format!("Welcome, {}", auth.get().display_name())}</h1>
            <div class="home__cards">
                <a class="home__card" href=CUSTOMERS_PATH>
                    <h2>"Customers"</h2>
                    <p>"Browse, add and remove customer records."</p>
                </a>
                <a class="home__card" href=FINANCIAL_REPORT_PATH>
                    <h2>"Financial report"</h2>
                    <p>"Payments by language and month for a date range."</p>
                </a>
            </div>
        </section>
    }
}
