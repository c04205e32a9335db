use chrono::{DateTime, Utc};

use super::View;
use crate::errors::ClientError;
use crate::features::overview::{Activity, ActivityKind, ApplicationStats, ApplicationsFeed};
use crate::state::AppState;

pub struct OverviewPage {
    stats: ApplicationStats,
    activity: Vec<Activity>,
}

impl OverviewPage {
    pub async fn load(state: &AppState, now: DateTime<Utc>) -> Result<Self, ClientError> {
        let mut feed = ApplicationsFeed::new(state);
        feed.mount().await?;
        Ok(Self {
            stats: feed.stats(),
            activity: feed.recent(now),
        })
    }
}

impl View for OverviewPage {
    fn render(&self) -> String {
        let mut out = String::new();
        for card in self.stats.stat_cards() {
            out.push_str(&format!("{:<20}{:>5}\n", card.title, card.value));
        }

        out.push_str("\nRecent Activity\n");
        if self.activity.is_empty() {
            out.push_str("  Nothing yet.\n");
        }
        for entry in &self.activity {
            let tag = match entry.kind {
                ActivityKind::Offer => "offer",
                ActivityKind::Interview => "interview",
                ActivityKind::Applied => "applied",
                ActivityKind::Rejected => "rejected",
            };
            out.push_str(&format!("  [{tag}] {}\n", entry.title));
            out.push_str(&format!("      {} - {}\n", entry.subtitle, entry.timestamp));
        }
        out
    }
}
