use super::View;
use crate::routes::Route;

pub struct HomePage {
    signed_in: bool,
}

impl HomePage {
    pub fn new(signed_in: bool) -> Self {
        Self { signed_in }
    }

    /// Where "Access Dashboard" leads.
    pub fn dashboard_link(&self) -> Route {
        if self.signed_in {
            Route::DashboardIndex
        } else {
            Route::Login
        }
    }
}

impl View for HomePage {
    fn render(&self) -> String {
        let mut out = String::from("JobAgent\n");
        out.push_str("Manage the job search in style!\n\n");
        out.push_str(&format!("[Access Dashboard] -> {}\n\n", self.dashboard_link().path()));
        out.push_str("Data Management\n");
        out.push_str("  View and edit your data with easy-to-use tools.\n");
        out
    }
}
