//! Navigation guard: decides allow / redirect-to-login / redirect-to-home.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every route view is wrapped in `components::gate::Gate`, which calls
//! [`NavigationGuard::evaluate`] before the target view is constructed.
//!
//! DESIGN
//! ======
//! [`decide`] is pure and is the whole access policy. [`NavigationGuard`]
//! adds the two side concerns around it: recording the pending redirect
//! target, and numbering navigations so a superseded decision is never
//! applied over a newer one.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::cell::Cell;

use crate::routes::{HOME_PATH, LOGIN_PATH, NavigationTarget, RouteDescriptor, login_with_redirect};
use crate::state::session::SessionStore;

/// Outcome of one navigation attempt. Exactly one per attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Unauthenticated access to a gated route; `target` is the full path
    /// (with query) to resume after login.
    RedirectToLogin { target: String },
    /// Authenticated user heading to the login view.
    RedirectToHome,
}

impl GuardDecision {
    /// Where the router should go instead, or `None` to proceed.
    pub fn redirect_path(&self) -> Option<String> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin { target } => Some(login_with_redirect(target)),
            Self::RedirectToHome => Some(HOME_PATH.to_owned()),
        }
    }
}

/// Access policy for a single navigation.
///
/// Gated routes without a session go to login; the login route with a
/// session goes home; everything else, including unknown paths, is allowed.
/// The first rule wins if both could apply.
pub fn decide(
    target: &NavigationTarget,
    route: Option<&RouteDescriptor>,
    authenticated: bool,
) -> GuardDecision {
    let requires_auth = route.is_some_and(|r| r.requires_auth);
    if requires_auth && !authenticated {
        return GuardDecision::RedirectToLogin { target: target.full_path() };
    }
    let is_login = route.map_or(target.path == LOGIN_PATH, |r| r.path == LOGIN_PATH);
    if is_login && authenticated {
        return GuardDecision::RedirectToHome;
    }
    GuardDecision::Allow
}

/// A guard decision stamped with the navigation generation that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuardTicket {
    pub generation: u64,
    pub decision: GuardDecision,
}

/// Stateful wrapper around [`decide`] bound to the session store.
#[derive(Debug)]
pub struct NavigationGuard {
    session: SessionStore,
    generation: Cell<u64>,
}

impl NavigationGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session, generation: Cell::new(0) }
    }

    /// Decide `target`, superseding every earlier ticket.
    ///
    /// A denied navigation overwrites the pending redirect target with
    /// `target`'s full path.
    pub fn evaluate(&self, target: &NavigationTarget) -> GuardTicket {
        self.evaluate_for(target, target.route())
    }

    /// [`Self::evaluate`] with the route already resolved by the router, so
    /// the rule checked is the one for the view being built.
    pub fn evaluate_for(&self, target: &NavigationTarget, route: Option<&RouteDescriptor>) -> GuardTicket {
        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let decision = decide(target, route, self.session.is_authenticated());
        if let GuardDecision::RedirectToLogin { target } = &decision {
            self.session.remember_redirect(target);
        }
        GuardTicket { generation, decision }
    }

    /// True if no navigation has been evaluated since `ticket` was issued.
    pub fn is_current(&self, ticket: &GuardTicket) -> bool {
        ticket.generation == self.generation.get()
    }
}
