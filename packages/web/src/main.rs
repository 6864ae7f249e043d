use dioxus::prelude::*;

use portfolio::{authorize, AdminConfig, RouteDecision, Target};
use ui::{use_session, SessionProvider};
use views::{Certificates, Dashboard, LicenseCertificates, Login, Overview, Projects};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AuthGate)]
        #[route("/login")]
        Login {},
        #[nest("/dashboard")]
            #[layout(Dashboard)]
                #[route("/")]
                Overview {},
                #[route("/certificates")]
                Certificates {},
                #[route("/license-certificates")]
                LicenseCertificates {},
                #[route("/projects")]
                Projects {},
            #[end_layout]
        #[end_nest]
        #[route("/:..segments")]
        Unmatched { segments: Vec<String> },
}

impl From<Target> for Route {
    fn from(target: Target) -> Self {
        match target {
            Target::Login => Route::Login {},
            Target::DashboardRoot => Route::Overview {},
        }
    }
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Service endpoints, embedded at build time.
const ADMIN_TOML: &str = include_str!("../assets/admin.toml");

fn load_config() -> AdminConfig {
    let config = AdminConfig::from_toml(ADMIN_TOML).unwrap_or_else(|e| {
        tracing::error!("invalid {}: {e}", AdminConfig::filename());
        AdminConfig::default()
    });
    #[cfg(not(target_arch = "wasm32"))]
    let config = config.with_env_overrides();
    config
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| api::Services::new(&load_config()));

    rsx! {
        // Global app resources
        document::Stylesheet { href: ui::ADMIN_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            Router::<Route> {}
        }
    }
}

/// Decides every navigation from the session and the requested path.
#[component]
fn AuthGate() -> Element {
    let session = use_session();
    let route = use_route::<Route>();
    let nav = use_navigator();

    match authorize(&session(), &route.to_string()) {
        RouteDecision::Pending => rsx! {
            div { class: "session-pending", "Loading..." }
        },
        RouteDecision::Render(_) => rsx! {
            Outlet::<Route> {}
        },
        RouteDecision::Redirect(target) => {
            tracing::debug!("redirecting {route} to {}", target.path());
            nav.replace(Route::from(target));
            rsx! {}
        }
    }
}

/// Never rendered: unknown paths always redirect.
#[component]
fn Unmatched(segments: Vec<String>) -> Element {
    rsx! {}
}
