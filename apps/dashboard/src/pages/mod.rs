//! Page compositions, one per route, rendered as plain text.
pub mod add_job;
pub mod applications;
pub mod home;
pub mod login;
pub mod overview;
pub mod profile;

use chrono::{DateTime, Utc};

use crate::errors::ClientError;
use crate::models::Candidate;
use crate::routes::Route;
use crate::session::SessionState;
use crate::state::AppState;

pub trait View {
    fn render(&self) -> String;
}

/// Dashboard navigation entries, in display order.
pub const SIDEBAR: &[(&str, Route)] = &[
    ("Home", Route::Overview),
    ("Job Applications", Route::Applications),
    ("Candidate Profile", Route::Profile),
];

pub fn sidebar(active: Route) -> String {
    let mut out = String::new();
    for (title, route) in SIDEBAR {
        let marker = if *route == active { ">" } else { " " };
        out.push_str(&format!("{marker} {title:<18} {}\n", route.path()));
    }
    out
}

/// Shared frame for every `/dashboard/*` page.
pub fn dashboard_layout(active: Route, user: Option<&Candidate>, body: &str) -> String {
    let mut out = format!("== {} ==\n", active.title());
    if let Some(user) = user {
        out.push_str(&format!("Signed in as {} <{}>\n", user.display_name(), user.email));
    }
    out.push('\n');
    out.push_str(&sidebar(active));
    out.push('\n');
    out.push_str(body.trim_end());
    out.push('\n');
    out
}

/// `Mar 1, 2025, 09:30 AM`
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Loads whatever data `route` needs and renders it.
pub async fn render_route(
    route: Route,
    state: &AppState,
    session: &SessionState,
) -> Result<String, ClientError> {
    let user = session.user.as_ref();
    let page = match route {
        Route::Home => home::HomePage::new(user.is_some()).render(),
        Route::Login => login::LoginPage::default().render(),
        Route::Overview | Route::DashboardIndex => {
            let page = overview::OverviewPage::load(state, Utc::now()).await?;
            dashboard_layout(Route::Overview, user, &page.render())
        }
        Route::Profile => {
            let page = profile::ProfilePage::load(state).await?;
            dashboard_layout(route, user, &page.render())
        }
        Route::Applications => {
            let page = applications::ApplicationsPage::load(state).await?;
            dashboard_layout(route, user, &page.render())
        }
        Route::AddJob => dashboard_layout(route, user, &add_job::AddJobPage::new().render()),
        Route::NotFound => "Page not found\n".to_string(),
    };
    Ok(page)
}
