use super::core::SessionSnapshot;

/// Capability a protected view requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Any authenticated account.
    Authenticated,
    /// Accounts with the admin flag.
    Admin,
}

/// What the router should do with a capability-gated view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Restore is still in flight: render a neutral placeholder, make no
    /// redirect. Redirecting here would bounce users whose session is about
    /// to be restored.
    Wait,
    /// Render the wrapped view.
    Render,
    /// Send the visitor to the login entry point.
    RedirectToLogin,
    /// Authenticated but not an admin on an admin-gated view: send them to
    /// the standard dashboard.
    RedirectToDashboard,
}

/// Route-guard decision for a view requiring `access`, given the current
/// session snapshot. Pure; the caller re-evaluates whenever the session
/// changes.
pub fn evaluate(snapshot: &SessionSnapshot, access: Access) -> GuardDecision {
    if snapshot.loading {
        return GuardDecision::Wait;
    }
    if !snapshot.authenticated {
        return GuardDecision::RedirectToLogin;
    }
    if access == Access::Admin && !snapshot.is_admin {
        return GuardDecision::RedirectToDashboard;
    }
    GuardDecision::Render
}
