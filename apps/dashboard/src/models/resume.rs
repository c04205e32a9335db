use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub id: i64,
    pub name: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_key: Option<String>,
}

/// Resume reference embedded in a job application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresignedUrl {
    pub presigned_url: Option<String>,
}

/// Multipart payload of `POST /me/resumes`: display name plus exactly one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    pub name: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}
