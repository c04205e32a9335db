//! Add-a-job flow: import from a posting URL or enter the job by hand, preview
//! the created listing, then confirm it to the next step.
use tracing::{error, info};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{CreateJobRequest, JobListing, ScrapeJobRequest};
use crate::validation::{
    self, check_max_len, require_non_empty, FieldError, MAX_COMPANY_LEN, MAX_TITLE_LEN,
    MAX_URL_LEN,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    UrlImport,
    Manual,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlImportDraft {
    pub job_url: String,
}

impl UrlImportDraft {
    pub fn can_submit(&self) -> bool {
        validation::is_valid_url(&self.job_url)
    }

    pub fn validate(&self) -> Result<ScrapeJobRequest, FieldError> {
        let job_url = require_non_empty("job_url", &self.job_url)?;
        validation::check_url("job_url", job_url)?;
        Ok(ScrapeJobRequest {
            job_url: job_url.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualJobDraft {
    pub title: String,
    pub company: String,
    pub application_url: String,
    pub description: String,
}

impl ManualJobDraft {
    /// Trimmed request, with a blank description left out of the body.
    pub fn validate(&self) -> Result<CreateJobRequest, FieldError> {
        let title = require_non_empty("title", &self.title)?;
        check_max_len("title", title, MAX_TITLE_LEN)?;

        let company = require_non_empty("company", &self.company)?;
        check_max_len("company", company, MAX_COMPANY_LEN)?;

        let application_url = require_non_empty("application_url", &self.application_url)?;
        check_max_len("application_url", application_url, MAX_URL_LEN)?;
        validation::check_url("application_url", application_url)?;

        let description = self.description.trim();
        Ok(CreateJobRequest {
            title: title.to_string(),
            company: company.to_string(),
            application_url: application_url.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Either input path; both resolve to a single created `JobListing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobInput {
    FromUrl(ScrapeJobRequest),
    Manual(CreateJobRequest),
}

impl JobInput {
    pub async fn submit(&self, api: &ApiClient) -> Result<JobListing, ClientError> {
        match self {
            JobInput::FromUrl(request) => api.create_job_from_url(request).await,
            JobInput::Manual(request) => api.create_job_manual(request).await,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowStage {
    Input,
    Preview(JobListing),
}

#[derive(Debug, Clone)]
pub struct JobCreationFlow {
    pub tab: Tab,
    pub url_draft: UrlImportDraft,
    pub manual_draft: ManualJobDraft,
    stage: FlowStage,
    pending: bool,
    error: Option<String>,
}

impl Default for JobCreationFlow {
    fn default() -> Self {
        Self {
            tab: Tab::default(),
            url_draft: UrlImportDraft::default(),
            manual_draft: ManualJobDraft::default(),
            stage: FlowStage::Input,
            pending: false,
            error: None,
        }
    }
}

impl JobCreationFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &FlowStage {
        &self.stage
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.error = None;
    }

    /// The input the active tab would submit, if its fields are valid.
    pub fn input(&self) -> Result<JobInput, FieldError> {
        match self.tab {
            Tab::UrlImport => self.url_draft.validate().map(JobInput::FromUrl),
            Tab::Manual => self.manual_draft.validate().map(JobInput::Manual),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.pending && self.stage == FlowStage::Input && self.input().is_ok()
    }

    /// Creates the listing from the active tab. Invalid input never reaches the network;
    /// a failed call keeps the flow on the input stage with an inline message.
    pub async fn submit(&mut self, api: &ApiClient) -> Result<JobListing, ClientError> {
        if self.stage != FlowStage::Input {
            return Err(ClientError::Validation(
                "A job listing is already awaiting confirmation".to_string(),
            ));
        }
        let input = self.input().map_err(|e| {
            self.error = Some(e.to_string());
            ClientError::Validation(e.to_string())
        })?;

        self.pending = true;
        self.error = None;
        let result = input.submit(api).await;
        self.pending = false;

        match result {
            Ok(listing) => {
                info!("Job listing {} ready for preview", listing.id);
                self.stage = FlowStage::Preview(listing.clone());
                Ok(listing)
            }
            Err(e) => {
                error!("Failed to create job listing: {e}");
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    pub fn back(&mut self) {
        self.stage = FlowStage::Input;
        self.error = None;
    }

    /// Hands the previewed listing to `on_complete` unchanged. Returns `false`
    /// when there is nothing to confirm.
    pub fn confirm<F: FnOnce(JobListing)>(&mut self, on_complete: F) -> bool {
        match std::mem::replace(&mut self.stage, FlowStage::Input) {
            FlowStage::Preview(listing) => {
                on_complete(listing);
                *self = Self::default();
                true
            }
            FlowStage::Input => false,
        }
    }
}
