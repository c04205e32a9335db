//! Stateful dashboard components. Each owns its drafts and pending/error flags,
//! talks to the backend through `ApiClient` and refreshes via the query cache.
pub mod auth_forms;
pub mod job_creation;
pub mod overview;
pub mod personal_info;
pub mod resumes;
pub mod social_links;
