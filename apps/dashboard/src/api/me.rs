use super::ApiClient;
use crate::errors::ClientError;
use crate::http::{ApiRequest, MultipartPart};
use crate::models::{
    Candidate, PresignedUrl, Resume, ResumeUpload, SocialLink, UpdatePersonalInfoRequest,
    UpsertSocialRequest,
};

impl ApiClient {
    /// GET /me/
    pub async fn get_me(&self) -> Result<Candidate, ClientError> {
        self.call(ApiRequest::get("/me/")).await
    }

    /// PATCH /me/
    pub async fn update_me(
        &self,
        request: &UpdatePersonalInfoRequest,
    ) -> Result<Candidate, ClientError> {
        self.call(ApiRequest::patch("/me/").json(request)?).await
    }

    /// GET /me/socials
    pub async fn list_socials(&self) -> Result<Vec<SocialLink>, ClientError> {
        self.call(ApiRequest::get("/me/socials")).await
    }

    /// PUT /me/socials
    ///
    /// Upsert: the same call creates (no id) and updates (id present).
    pub async fn upsert_social(
        &self,
        request: &UpsertSocialRequest,
    ) -> Result<SocialLink, ClientError> {
        self.call(ApiRequest::put("/me/socials").json(request)?)
            .await
    }

    /// DELETE /me/socials/:id
    pub async fn delete_social(&self, social_id: i64) -> Result<(), ClientError> {
        self.call(ApiRequest::delete(format!("/me/socials/{social_id}")))
            .await
    }

    /// GET /me/resumes
    pub async fn list_resumes(&self) -> Result<Vec<Resume>, ClientError> {
        self.call(ApiRequest::get("/me/resumes")).await
    }

    /// POST /me/resumes
    ///
    /// Single multipart submission; no chunking.
    pub async fn upload_resume(&self, upload: &ResumeUpload) -> Result<Resume, ClientError> {
        let parts = vec![
            MultipartPart::text("name", &upload.name),
            MultipartPart::file(
                "file",
                &upload.file_name,
                &upload.content_type,
                upload.bytes.clone(),
            ),
        ];
        self.call(ApiRequest::post("/me/resumes").multipart(parts))
            .await
    }

    /// DELETE /me/resumes/:id
    pub async fn delete_resume(&self, resume_id: i64) -> Result<(), ClientError> {
        self.call(ApiRequest::delete(format!("/me/resumes/{resume_id}")))
            .await
    }

    /// GET /me/resumes/:id/presigned-url
    pub async fn resume_presigned_url(&self, resume_id: i64) -> Result<PresignedUrl, ClientError> {
        self.call(ApiRequest::get(format!(
            "/me/resumes/{resume_id}/presigned-url"
        )))
        .await
    }
}
