//! Root application component with routing and context providers.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::{gate::Gate, nav_bar::NavBar};
use crate::guard::NavigationGuard;
use crate::net::http::{DEFAULT_BASE_URL, DefaultTransport, HttpClient};
use crate::pages::{
    customers::CustomersPage, financial_report::FinancialReportPage, home::HomePage, login::LoginPage,
};
use crate::routes::{CUSTOMERS_ROUTE, FINANCIAL_REPORT_ROUTE, HOME_ROUTE, LOGIN_ROUTE};
use crate::state::auth::AuthState;
use crate::state::session::SessionStore;
use crate::util::navigation::{BrowserLocation, NavigationForcer};
use crate::util::storage::{BrowserStorage, KeyValueStore};

/// The session gate, wired once at startup and shared by every page.
#[derive(Clone)]
pub struct AppServices {
    pub session: SessionStore,
    pub guard: Rc<NavigationGuard>,
    pub client: Rc<HttpClient<DefaultTransport>>,
}

impl AppServices {
    pub fn new(storage: Rc<dyn KeyValueStore>, forcer: Rc<dyn NavigationForcer>, transport: DefaultTransport) -> Self {
        let session = SessionStore::initialize(storage);
        let guard = Rc::new(NavigationGuard::new(session.clone()));
        let client = Rc::new(HttpClient::new(DEFAULT_BASE_URL, session.clone(), forcer, transport));
        Self { session, guard, client }
    }

    /// `localStorage`, `window.location`, and fetch.
    pub fn browser() -> Self {
        Self::new(Rc::new(BrowserStorage), Rc::new(BrowserLocation), DefaultTransport::default())
    }
}

/// Context handle for [`AppServices`]. The services are `Rc`-based, so they
/// live in thread-local arena storage behind a `Copy` handle.
pub type Services = StoredValue<AppServices, LocalStorage>;

pub fn use_services() -> Services {
    expect_context::<Services>()
}

/// Root application component.
///
/// Initializes the session from durable storage, mirrors it into a reactive
/// `AuthState`, and registers every route behind the [`Gate`].
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let services = AppServices::browser();
    let auth = RwSignal::new(AuthState { authenticated: services.session.is_authenticated(), username: None });
    services.session.subscribe(move |value| auth.update(|s| s.apply_session_flag(value)));

    provide_context(auth);
    provide_context::<Services>(StoredValue::new_local(services));

    view! {
        <Title text="Linguadesk"/>

        <Router>
            <NavBar/>
            <main class="page">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("login") view=|| view! { <Gate route=LOGIN_ROUTE><LoginPage/></Gate> }/>
                    <Route
                        path=StaticSegment("customers")
                        view=|| view! { <Gate route=CUSTOMERS_ROUTE><CustomersPage/></Gate> }
                    />
                    <Route
                        path=StaticSegment("financial-report")
                        view=|| view! { <Gate route=FINANCIAL_REPORT_ROUTE><FinancialReportPage/></Gate> }
                    />
                    <Route path=StaticSegment("") view=|| view! { <Gate route=HOME_ROUTE><HomePage/></Gate> }/>
                </Routes>
            </main>
        </Router>
    }
}
