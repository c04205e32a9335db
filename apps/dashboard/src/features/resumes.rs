//! Resume management card: list, view through a presigned link, delete, and
//! upload a single PDF.
use std::path::Path;

use bytes::Bytes;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{Resume, ResumeUpload};
use crate::query::{keys, QueryCache};
use crate::state::AppState;

pub const MIN_RESUME_BYTES: usize = 1024;
pub const MAX_RESUME_BYTES: usize = 10 * 1024 * 1024;
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(file_name: &str, content_type: &str, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, typing it from its extension.
    pub async fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        let content_type = if is_pdf {
            PDF_CONTENT_TYPE
        } else {
            "application/octet-stream"
        };
        Ok(Self::new(&file_name, content_type, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("No file selected")]
    NoFile,

    #[error("Only one file can be uploaded at a time")]
    TooManyFiles,

    #[error("Only PDF files are accepted")]
    UnsupportedType,

    #[error("File is too small ({size} bytes, minimum {min})", min = MIN_RESUME_BYTES)]
    TooSmall { size: usize },

    #[error("File is too large ({size} bytes, maximum {max})", max = MAX_RESUME_BYTES)]
    TooLarge { size: usize },

    #[error("Resume name is required")]
    MissingName,
}

/// Upload form: a display name plus at most one accepted file.
#[derive(Debug, Clone, Default)]
pub struct UploadDraft {
    pub name: String,
    file: Option<ResumeFile>,
    rejection: Option<UploadRejection>,
}

impl UploadDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Accepts a drop of exactly one PDF within the size window. A rejected drop
    /// clears any previously accepted file.
    pub fn drop_files(&mut self, mut files: Vec<ResumeFile>) -> Result<(), UploadRejection> {
        let checked = match files.len() {
            0 => Err(UploadRejection::NoFile),
            1 => {
                let file = files.remove(0);
                check_file(&file).map(|_| file)
            }
            _ => Err(UploadRejection::TooManyFiles),
        };

        match checked {
            Ok(file) => {
                self.file = Some(file);
                self.rejection = None;
                Ok(())
            }
            Err(rejection) => {
                self.file = None;
                self.rejection = Some(rejection.clone());
                Err(rejection)
            }
        }
    }

    pub fn file(&self) -> Option<&ResumeFile> {
        self.file.as_ref()
    }

    pub fn rejection(&self) -> Option<&UploadRejection> {
        self.rejection.as_ref()
    }

    pub fn validate(&self) -> Result<ResumeUpload, UploadRejection> {
        let file = self.file.as_ref().ok_or_else(|| {
            self.rejection
                .clone()
                .unwrap_or(UploadRejection::NoFile)
        })?;
        let name = self.name.trim();
        if name.is_empty() {
            return Err(UploadRejection::MissingName);
        }
        Ok(ResumeUpload {
            name: name.to_string(),
            file_name: file.file_name.clone(),
            content_type: file.content_type.clone(),
            bytes: file.bytes.clone(),
        })
    }

    pub fn can_upload(&self) -> bool {
        self.validate().is_ok()
    }
}

fn check_file(file: &ResumeFile) -> Result<(), UploadRejection> {
    if !file.content_type.eq_ignore_ascii_case(PDF_CONTENT_TYPE) {
        return Err(UploadRejection::UnsupportedType);
    }
    let size = file.len();
    if size < MIN_RESUME_BYTES {
        return Err(UploadRejection::TooSmall { size });
    }
    if size > MAX_RESUME_BYTES {
        return Err(UploadRejection::TooLarge { size });
    }
    Ok(())
}

pub struct ResumeManager {
    api: ApiClient,
    queries: QueryCache,
    resumes: Vec<Resume>,
    is_editing: bool,
    pending: bool,
    error: Option<String>,
    pub upload: UploadDraft,
}

impl ResumeManager {
    pub fn new(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            queries: state.queries.clone(),
            resumes: Vec::new(),
            is_editing: false,
            pending: false,
            error: None,
            upload: UploadDraft::default(),
        }
    }

    pub async fn mount(&mut self) -> Result<(), ClientError> {
        let api = self.api.clone();
        self.resumes = self
            .queries
            .fetch(&keys::resumes(), move || async move { api.list_resumes().await })
            .await?;
        Ok(())
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let api = self.api.clone();
        self.resumes = self
            .queries
            .refetch(&keys::resumes(), move || async move { api.list_resumes().await })
            .await?;
        Ok(())
    }

    pub fn resumes(&self) -> &[Resume] {
        &self.resumes
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toggle_edit(&mut self) {
        self.is_editing = !self.is_editing;
        if !self.is_editing {
            self.upload = UploadDraft::default();
        }
    }

    /// Short-lived link for viewing the stored PDF, if the backend issued one.
    pub async fn view(&mut self, resume_id: i64) -> Result<Option<String>, ClientError> {
        match self.api.resume_presigned_url(resume_id).await {
            Ok(presigned) => Ok(presigned.presigned_url),
            Err(e) => {
                error!("Failed to get presigned URL for resume {resume_id}: {e}");
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Deletes immediately, then refetches the list.
    pub async fn delete(&mut self, resume_id: i64) -> Result<(), ClientError> {
        self.pending = true;
        self.error = None;
        let result = self.api.delete_resume(resume_id).await;
        self.pending = false;

        if let Err(e) = result {
            error!("Failed to delete resume {resume_id}: {e}");
            self.error = Some(e.user_message());
            return Err(e);
        }
        info!("Deleted resume {resume_id}");
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// Uploads the current draft. Rejected drafts never reach the network.
    pub async fn upload(&mut self) -> Result<Resume, ClientError> {
        let upload = self.upload.validate().map_err(|rejection| {
            self.error = Some(rejection.to_string());
            ClientError::Validation(rejection.to_string())
        })?;

        self.pending = true;
        self.error = None;
        let result = self.api.upload_resume(&upload).await;
        self.pending = false;

        let resume = result.map_err(|e| {
            error!("Failed to upload resume: {e}");
            self.error = Some(e.user_message());
            e
        })?;
        info!("Uploaded resume {} ({} bytes)", resume.id, upload.bytes.len());
        self.upload = UploadDraft::default();
        self.refresh_after_mutation().await;
        Ok(resume)
    }

    async fn refresh_after_mutation(&mut self) {
        if let Err(e) = self.refresh().await {
            warn!("Refetch of resumes failed: {e}");
        }
    }
}
