pub mod application;
pub mod auth;
pub mod job;
pub mod resume;
pub mod social;
pub mod timestamp;
pub mod user;

pub use application::{ApplicationStatus, CreateJobApplicationRequest, JobApplication};
pub use auth::{CreateCandidateRequest, HealthStatus, TokenResponse};
pub use job::{CreateJobRequest, JobListing, ScrapeJobRequest};
pub use resume::{PresignedUrl, Resume, ResumeSummary, ResumeUpload};
pub use social::{SocialLink, UpsertSocialRequest};
pub use user::{Candidate, UpdatePersonalInfoRequest};
