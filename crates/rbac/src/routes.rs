//! Route → required-action registry.
//!
//! The transport layer declares, at startup, which action each of its routes
//! requires; its guard then looks the action up here before invoking the
//! decision engine. An explicit map instead of handler metadata: no
//! reflection or annotation machinery.

use std::collections::HashMap;

use crate::action::Action;

/// Explicit mapping from route identifiers to required actions.
///
/// Route identifiers are whatever the transport layer uses to name an
/// endpoint (e.g. `"PUT /tasks/:id"`); this registry treats them as opaque.
#[derive(Debug, Clone, Default)]
pub struct RouteActions {
    map: HashMap<String, Action>,
}

impl RouteActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that `route` requires `action`. Re-declaring a route replaces
    /// the earlier requirement.
    pub fn require(mut self, route: impl Into<String>, action: Action) -> Self {
        self.map.insert(route.into(), action);
        self
    }

    /// The action required for `route`, if one was declared.
    ///
    /// An undeclared route yields `None`; the transport layer decides whether
    /// that means "public" or "misconfigured" (it should fail closed).
    pub fn required_action(&self, route: &str) -> Option<Action> {
        self.map.get(route).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_routes_resolve_to_their_action() {
        let routes = RouteActions::new()
            .require("POST /tasks", Action::TaskCreate)
            .require("GET /audit-log", Action::AuditView);

        assert_eq!(routes.required_action("POST /tasks"), Some(Action::TaskCreate));
        assert_eq!(routes.required_action("GET /audit-log"), Some(Action::AuditView));
        assert_eq!(routes.len(), 2);
    }

    #[test]
    fn undeclared_routes_resolve_to_none() {
        let routes = RouteActions::new().require("POST /tasks", Action::TaskCreate);
        assert_eq!(routes.required_action("DELETE /tasks/1"), None);
    }

    #[test]
    fn redeclaration_replaces_the_requirement() {
        let routes = RouteActions::new()
            .require("PATCH /tasks/:id", Action::TaskCreate)
            .require("PATCH /tasks/:id", Action::TaskUpdate);

        assert_eq!(routes.required_action("PATCH /tasks/:id"), Some(Action::TaskUpdate));
    }
}
