//! Route wrapper that runs the navigation guard before building its child.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every `<Route>` view in `app` is `<Gate route=..><Page/></Gate>`, naming
//! the descriptor of the route it renders. The child page is constructed only
//! when the guard allows the navigation.
//!
//! DESIGN
//! ======
//! The decision is a memo over the current location, so it is computed once
//! per navigation and synchronously. The redirect itself runs in an effect
//! and is dropped if a newer navigation has been evaluated in the meantime.

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::app::use_services;
use crate::guard::{GuardDecision, GuardTicket};
use crate::routes::{NavigationTarget, RouteDescriptor};

#[component]
pub fn Gate(route: RouteDescriptor, children: ChildrenFn) -> impl IntoView {
    let services = use_services();
    let location = use_location();
    let navigate = use_navigate();

    let ticket = Memo::new(move |_| {
        let target = NavigationTarget::new(location.pathname.get(), location.search.get());
        services.with_value(|s| s.guard.evaluate_for(&target, Some(&route)))
    });

    Effect::new(move || {
        let ticket: GuardTicket = ticket.get();
        let Some(path) = ticket.decision.redirect_path() else {
            return;
        };
        if services.with_value(|s| s.guard.is_current(&ticket)) {
            navigate(&path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    move || match ticket.get().decision {
        GuardDecision::Allow => children().into_any(),
        GuardDecision::RedirectToLogin { .. } | GuardDecision::RedirectToHome => ().into_any(),
    }
}
