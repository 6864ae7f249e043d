//! # Route table and authorization
//!
//! [`authorize`] decides, from the session and the requested path alone, whether
//! to wait, render a view, or redirect. It holds no state; the router calls it
//! on every navigation.
//!
//! | Path | View |
//! |------|------|
//! | `/login` | [`View::Login`] |
//! | `/dashboard` | [`View::Overview`] |
//! | `/dashboard/certificates` | [`View::Form`]`(`[`FormKind::Certificate`]`)` |
//! | `/dashboard/license-certificates` | [`View::Form`]`(`[`FormKind::LicenseCertificate`]`)` |
//! | `/dashboard/projects` | [`View::Form`]`(`[`FormKind::Project`]`)` |
//!
//! Paths are normalized first: query and fragment dropped, empty segments
//! removed, so `//dashboard/projects/?x=1` is `/dashboard/projects`.

use crate::session::Session;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// The record-entry forms reachable from the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormKind {
    Certificate,
    LicenseCertificate,
    Project,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [
        FormKind::Certificate,
        FormKind::LicenseCertificate,
        FormKind::Project,
    ];

    /// Path segment below `/dashboard`.
    pub fn slug(self) -> &'static str {
        match self {
            FormKind::Certificate => "certificates",
            FormKind::LicenseCertificate => "license-certificates",
            FormKind::Project => "projects",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormKind::Certificate => "Certificates",
            FormKind::LicenseCertificate => "License Certificates",
            FormKind::Project => "Projects",
        }
    }

    pub fn path(self) -> String {
        format!("{DASHBOARD_PATH}/{}", self.slug())
    }

    fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }
}

/// Something the router can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Login,
    Overview,
    Form(FormKind),
}

/// Where a redirect goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    Login,
    DashboardRoot,
}

impl Target {
    pub fn path(self) -> &'static str {
        match self {
            Target::Login => LOGIN_PATH,
            Target::DashboardRoot => DASHBOARD_PATH,
        }
    }
}

/// Outcome of [`authorize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session not resolved yet: show a placeholder, decide nothing.
    Pending,
    Render(View),
    Redirect(Target),
}

/// Canonical form of a requested path.
pub fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Look a normalized path up in the route table.
fn lookup(path: &str) -> Option<View> {
    if path == LOGIN_PATH {
        return Some(View::Login);
    }
    if path == DASHBOARD_PATH {
        return Some(View::Overview);
    }
    path.strip_prefix(DASHBOARD_PATH)
        .and_then(|rest| rest.strip_prefix('/'))
        .and_then(FormKind::from_slug)
        .map(View::Form)
}

/// The view a path maps to, whatever the session.
pub fn view_for(path: &str) -> Option<View> {
    lookup(&normalize(path))
}

/// Decide what to do with a navigation to `path` under `session`.
pub fn authorize(session: &Session, path: &str) -> RouteDecision {
    let signed_in = match session {
        Session::Unknown => return RouteDecision::Pending,
        Session::Authenticated(_) => true,
        Session::Unauthenticated => false,
    };
    let path = normalize(path);

    match (lookup(&path), signed_in) {
        (Some(View::Login), true) => RouteDecision::Redirect(Target::DashboardRoot),
        (Some(View::Login), false) => RouteDecision::Render(View::Login),
        (Some(view), true) => RouteDecision::Render(view),
        (Some(_), false) => RouteDecision::Redirect(Target::Login),
        (None, true) => RouteDecision::Redirect(Target::DashboardRoot),
        (None, false) => RouteDecision::Redirect(Target::Login),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserRef;

    fn signed_in() -> Session {
        Session::Authenticated(UserRef {
            uid: "u1".into(),
            email: "admin@example.com".into(),
            display_name: None,
        })
    }

    #[test]
    fn test_view_for_ignores_trailing_slash() {
        assert_eq!(view_for("/dashboard/"), Some(View::Overview));
        assert_eq!(
            view_for("/dashboard/projects/"),
            Some(View::Form(FormKind::Project))
        );
        assert_eq!(view_for("/dashboard/unknown"), None);
    }

    #[test]
    fn test_unknown_session_defers() {
        for path in ["/login", "/dashboard", "/dashboard/projects", "/", "/nope"] {
            assert_eq!(authorize(&Session::Unknown, path), RouteDecision::Pending);
        }
    }

    #[test]
    fn test_login_redirects_when_signed_in() {
        assert_eq!(
            authorize(&signed_in(), "/login"),
            RouteDecision::Redirect(Target::DashboardRoot)
        );
        assert_eq!(
            authorize(&Session::Unauthenticated, "/login"),
            RouteDecision::Render(View::Login)
        );
    }

    #[test]
    fn test_dashboard_requires_session() {
        for path in [
            "/dashboard",
            "/dashboard/certificates",
            "/dashboard/license-certificates",
            "/dashboard/projects",
            "/dashboard/unknown/deep",
        ] {
            assert_eq!(
                authorize(&Session::Unauthenticated, path),
                RouteDecision::Redirect(Target::Login),
                "{path}"
            );
        }
    }

    #[test]
    fn test_dashboard_table() {
        let s = signed_in();
        assert_eq!(authorize(&s, "/dashboard"), RouteDecision::Render(View::Overview));
        for kind in FormKind::ALL {
            assert_eq!(
                authorize(&s, &kind.path()),
                RouteDecision::Render(View::Form(kind))
            );
        }
        assert_eq!(
            authorize(&s, "/dashboard/users"),
            RouteDecision::Redirect(Target::DashboardRoot)
        );
    }

    #[test]
    fn test_unknown_paths() {
        for path in ["/", "", "/settings", "/dashboards"] {
            assert_eq!(
                authorize(&signed_in(), path),
                RouteDecision::Redirect(Target::DashboardRoot)
            );
            assert_eq!(
                authorize(&Session::Unauthenticated, path),
                RouteDecision::Redirect(Target::Login)
            );
        }
    }

    #[test]
    fn test_normalization() {
        assert_eq!(normalize("/dashboard/"), "/dashboard");
        assert_eq!(normalize("//dashboard//projects/?x=1"), "/dashboard/projects");
        assert_eq!(normalize("/login#top"), "/login");
        assert_eq!(normalize(""), "/");
        assert_eq!(
            authorize(&signed_in(), "//dashboard//projects/?x=1"),
            RouteDecision::Render(View::Form(FormKind::Project))
        );
    }

    #[test]
    fn test_decision_is_repeatable() {
        let sessions = [Session::Unknown, Session::Unauthenticated, signed_in()];
        let paths = ["/login", "/dashboard", "/dashboard/projects", "/x", "/dashboard/x"];
        for session in &sessions {
            for path in paths {
                let first = authorize(session, path);
                for _ in 0..3 {
                    assert_eq!(authorize(session, path), first);
                }
            }
        }
    }
}
