//! Login page: username/password exchange for a session token.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reached directly or via a guard redirect carrying `?redirect=<target>`.
//! On success the session is established and navigation resumes at the
//! hint, the stored pending target, or home.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

const MISSING_CREDENTIALS: &str = "Enter both username and password.";

/// Trim the username and require both fields. The password is kept verbatim.
fn validate_login_input(username: &str, password: &str) -> Result<(String, String), &'static str> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(MISSING_CREDENTIALS);
    }
    Ok((username.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    #[cfg(feature = "csr")]
    let services = crate::app::use_services();
    #[cfg(feature = "csr")]
    let auth = expect_context::<RwSignal<crate::state::auth::AuthState>>();
    #[cfg(feature = "csr")]
    let navigate = leptos_router::hooks::use_navigate();
    #[cfg(feature = "csr")]
    let location = leptos_router::hooks::use_location();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (user_value, password_value) = match validate_login_input(&username.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "csr")]
        {
            let hint = crate::routes::NavigationTarget::new(location.pathname.get_untracked(), location.search.get_untracked())
                .query_param(crate::routes::REDIRECT_QUERY_PARAM);
            let client = services.with_value(|s| s.client.clone());
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match crate::auth::sign_in(&client, &user_value, &password_value, hint.as_deref()).await {
                    Ok(signed_in) => {
                        auth.update(|a| a.username = Some(signed_in.username));
                        info.set(String::new());
                        navigate(&signed_in.destination, leptos_router::NavigateOptions::default());
                    }
                    Err(message) => info.set(message),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (user_value, password_value);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Linguadesk"</h1>
                <p class="login-card__subtitle">"Sign in to continue"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
