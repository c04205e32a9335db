//! Overview figures derived from the candidate's job applications.
use chrono::{DateTime, Utc};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{ApplicationStatus, JobApplication};
use crate::query::{keys, QueryCache};
use crate::state::AppState;

const RECENT_ACTIVITY_LIMIT: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplicationStats {
    pub total: usize,
    pub pending: usize,
    pub interviews: usize,
    pub offers: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: usize,
}

impl ApplicationStats {
    pub fn from_applications(applications: &[JobApplication]) -> Self {
        let mut stats = ApplicationStats {
            total: applications.len(),
            ..Self::default()
        };
        for application in applications {
            match application.status {
                ApplicationStatus::Pending => stats.pending += 1,
                ApplicationStatus::Interview => stats.interviews += 1,
                ApplicationStatus::Offer => stats.offers += 1,
                ApplicationStatus::Rejected => stats.rejected += 1,
            }
        }
        stats
    }

    pub fn stat_cards(&self) -> [StatCard; 5] {
        [
            StatCard {
                title: "Total Applications",
                value: self.total,
            },
            StatCard {
                title: "Pending",
                value: self.pending,
            },
            StatCard {
                title: "Interviews",
                value: self.interviews,
            },
            StatCard {
                title: "Offers",
                value: self.offers,
            },
            StatCard {
                title: "Rejected",
                value: self.rejected,
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Offer,
    Interview,
    Applied,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub kind: ActivityKind,
    pub title: String,
    pub subtitle: String,
    pub timestamp: String,
}

impl Activity {
    fn from_application(application: &JobApplication, now: DateTime<Utc>) -> Self {
        let job = &application.job_listing;
        let company = if job.company.trim().is_empty() {
            "an unknown company"
        } else {
            job.company.as_str()
        };
        let (kind, title) = match application.status {
            ApplicationStatus::Offer => (ActivityKind::Offer, format!("Offer received from {company}")),
            ApplicationStatus::Interview => (
                ActivityKind::Interview,
                format!("Interview scheduled with {company}"),
            ),
            ApplicationStatus::Pending => (ActivityKind::Applied, format!("Applied to {company}")),
            ApplicationStatus::Rejected => (
                ActivityKind::Rejected,
                format!("Application closed by {company}"),
            ),
        };
        let timestamp = application
            .last_activity()
            .map(|at| relative_time(at, now))
            .unwrap_or_default();

        Self {
            kind,
            title,
            subtitle: format!("{} position", job.title),
            timestamp,
        }
    }
}

/// Most recent applications first, capped at five entries.
pub fn recent_activity(applications: &[JobApplication], now: DateTime<Utc>) -> Vec<Activity> {
    let mut ordered: Vec<&JobApplication> = applications.iter().collect();
    // `None` sorts before `Some`, so undated entries land last once reversed.
    ordered.sort_by_key(|a| std::cmp::Reverse(a.last_activity()));
    ordered
        .into_iter()
        .take(RECENT_ACTIVITY_LIMIT)
        .map(|a| Activity::from_application(a, now))
        .collect()
}

pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {unit} ago")
        } else {
            format!("{n} {unit}s ago")
        }
    };

    if elapsed.num_seconds() < 60 {
        "just now".to_string()
    } else if elapsed.num_minutes() < 60 {
        plural(elapsed.num_minutes(), "minute")
    } else if elapsed.num_hours() < 24 {
        plural(elapsed.num_hours(), "hour")
    } else if elapsed.num_days() < 30 {
        plural(elapsed.num_days(), "day")
    } else {
        at.format("%b %-d, %Y").to_string()
    }
}

/// Cached list of the candidate's applications, shared by overview and list pages.
pub struct ApplicationsFeed {
    api: ApiClient,
    queries: QueryCache,
    applications: Vec<JobApplication>,
}

impl ApplicationsFeed {
    pub fn new(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            queries: state.queries.clone(),
            applications: Vec::new(),
        }
    }

    pub async fn mount(&mut self) -> Result<(), ClientError> {
        let api = self.api.clone();
        self.applications = self
            .queries
            .fetch(&keys::applications(), move || async move {
                api.list_applications().await
            })
            .await?;
        Ok(())
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let api = self.api.clone();
        self.applications = self
            .queries
            .refetch(&keys::applications(), move || async move {
                api.list_applications().await
            })
            .await?;
        Ok(())
    }

    pub fn applications(&self) -> &[JobApplication] {
        &self.applications
    }

    pub fn stats(&self) -> ApplicationStats {
        ApplicationStats::from_applications(&self.applications)
    }

    pub fn recent(&self, now: DateTime<Utc>) -> Vec<Activity> {
        recent_activity(&self.applications, now)
    }
}
