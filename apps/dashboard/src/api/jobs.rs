use tracing::info;

use super::ApiClient;
use crate::errors::ClientError;
use crate::http::ApiRequest;
use crate::models::{
    CreateJobApplicationRequest, CreateJobRequest, JobApplication, JobListing, ScrapeJobRequest,
};

impl ApiClient {
    /// POST /job-listings/from-url
    ///
    /// The backend scrapes the page and returns a fully populated listing.
    pub async fn create_job_from_url(
        &self,
        request: &ScrapeJobRequest,
    ) -> Result<JobListing, ClientError> {
        let job: JobListing = self
            .call(ApiRequest::post("/job-listings/from-url").json(request)?)
            .await?;
        info!("Imported job listing {} from {}", job.id, request.job_url);
        Ok(job)
    }

    /// POST /job-listings/
    pub async fn create_job_manual(
        &self,
        request: &CreateJobRequest,
    ) -> Result<JobListing, ClientError> {
        let job: JobListing = self
            .call(ApiRequest::post("/job-listings/").json(request)?)
            .await?;
        info!("Created job listing {} ({})", job.id, job.title);
        Ok(job)
    }

    /// POST /job-applications/
    pub async fn apply_to_job(
        &self,
        request: &CreateJobApplicationRequest,
    ) -> Result<JobApplication, ClientError> {
        self.call(ApiRequest::post("/job-applications/").json(request)?)
            .await
    }

    /// GET /job-applications/
    pub async fn list_applications(&self) -> Result<Vec<JobApplication>, ClientError> {
        self.call(ApiRequest::get("/job-applications/")).await
    }
}
