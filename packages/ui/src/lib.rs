//! This crate contains all shared UI for the admin dashboard.

use dioxus::prelude::*;

pub const ADMIN_CSS: Asset = asset!("/assets/admin.css");

mod auth;
pub use auth::{use_services, use_session, LogoutButton, SessionProvider};

mod files;

mod sidebar;
pub use sidebar::AdminSidebar;

pub mod views;
