use super::{format_date, View};
use crate::errors::ClientError;
use crate::features::overview::ApplicationsFeed;
use crate::models::JobApplication;
use crate::state::AppState;

pub struct ApplicationsPage {
    applications: Vec<JobApplication>,
}

impl ApplicationsPage {
    pub async fn load(state: &AppState) -> Result<Self, ClientError> {
        let mut feed = ApplicationsFeed::new(state);
        feed.mount().await?;
        Ok(Self {
            applications: feed.applications().to_vec(),
        })
    }
}

impl View for ApplicationsPage {
    fn render(&self) -> String {
        if self.applications.is_empty() {
            return "No applications yet. Add a job from /dashboard/add-job.\n".to_string();
        }

        let mut out = String::new();
        for application in &self.applications {
            let job = &application.job_listing;
            out.push_str(&format!(
                "#{} {} at {} [{}]\n",
                application.id, job.title, job.company, application.status
            ));
            out.push_str(&format!("    {}\n", job.application_url));
            if let Some(resume) = &application.used_resume {
                out.push_str(&format!("    Resume: {}\n", resume.name));
            }
            if let Some(at) = application.last_activity() {
                out.push_str(&format!("    Updated {}\n", format_date(at)));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_points_to_add_job() {
        let page = ApplicationsPage {
            applications: Vec::new(),
        };
        assert!(page.render().contains("/dashboard/add-job"));
    }

    #[test]
    fn test_lists_status_and_resume() {
        let application: JobApplication = serde_json::from_value(serde_json::json!({
            "id": 8,
            "job_listing": {"id": 3, "title": "Engineer", "company": "Acme",
                            "application_url": "https://acme.com/job/3"},
            "used_resume": {"id": 2, "name": "Backend CV"},
            "status": "interview",
            "created_at": "2025-03-01T09:30:00"
        }))
        .unwrap();
        let out = ApplicationsPage {
            applications: vec![application],
        }
        .render();

        assert!(out.contains("#8 Engineer at Acme [Interview]"));
        assert!(out.contains("Resume: Backend CV"));
        assert!(out.contains("Updated Mar 1, 2025, 09:30 AM"));
    }
}
