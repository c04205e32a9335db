//! Edit-in-place card for the candidate's name and phone. Email is read-only.
use tracing::{error, info, warn};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{Candidate, UpdatePersonalInfoRequest};
use crate::query::{keys, QueryCache};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonalField {
    FirstName,
    LastName,
    Phone,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonalInfoDraft {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl From<&Candidate> for PersonalInfoDraft {
    fn from(candidate: &Candidate) -> Self {
        Self {
            first_name: candidate.first_name.clone(),
            last_name: candidate.last_name.clone(),
            phone: candidate.phone.clone(),
        }
    }
}

impl PersonalInfoDraft {
    fn trimmed(&self) -> UpdatePersonalInfoRequest {
        UpdatePersonalInfoRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            phone: self.phone.trim().to_string(),
        }
    }
}

pub struct PersonalInfoEditor {
    api: ApiClient,
    queries: QueryCache,
    snapshot: Option<Candidate>,
    draft: PersonalInfoDraft,
    is_editing: bool,
    pending: bool,
    error: Option<String>,
}

impl PersonalInfoEditor {
    pub fn new(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            queries: state.queries.clone(),
            snapshot: None,
            draft: PersonalInfoDraft::default(),
            is_editing: false,
            pending: false,
            error: None,
        }
    }

    pub async fn mount(&mut self) -> Result<(), ClientError> {
        let api = self.api.clone();
        let candidate = self
            .queries
            .fetch(&keys::me(), move || async move { api.get_me().await })
            .await?;
        self.apply_snapshot(candidate);
        Ok(())
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let api = self.api.clone();
        let candidate = self
            .queries
            .refetch(&keys::me(), move || async move { api.get_me().await })
            .await?;
        self.apply_snapshot(candidate);
        Ok(())
    }

    /// Takes a fresh server value. An open edit keeps its draft.
    pub fn apply_snapshot(&mut self, candidate: Candidate) {
        if !self.is_editing {
            self.draft = PersonalInfoDraft::from(&candidate);
        }
        self.snapshot = Some(candidate);
    }

    pub fn snapshot(&self) -> Option<&Candidate> {
        self.snapshot.as_ref()
    }

    pub fn draft(&self) -> &PersonalInfoDraft {
        &self.draft
    }

    pub fn email(&self) -> Option<&str> {
        self.snapshot.as_ref().map(|c| c.email.as_str())
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

    pub fn begin_edit(&mut self) {
        self.is_editing = true;
        self.error = None;
        if let Some(candidate) = &self.snapshot {
            self.draft = PersonalInfoDraft::from(candidate);
        }
    }

    pub fn toggle_edit(&mut self) {
        if self.is_editing {
            self.cancel();
        } else {
            self.begin_edit();
        }
    }

    pub fn set_field(&mut self, field: PersonalField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PersonalField::FirstName => self.draft.first_name = value,
            PersonalField::LastName => self.draft.last_name = value,
            PersonalField::Phone => self.draft.phone = value,
        }
    }

    /// Restores every field to the latest server snapshot and leaves edit mode.
    pub fn cancel(&mut self) {
        self.draft = self
            .snapshot
            .as_ref()
            .map(PersonalInfoDraft::from)
            .unwrap_or_default();
        self.is_editing = false;
        self.error = None;
    }

    pub fn has_changes(&self) -> bool {
        match &self.snapshot {
            Some(candidate) => self.draft != PersonalInfoDraft::from(candidate),
            None => self.draft != PersonalInfoDraft::default(),
        }
    }

    pub fn can_save(&self) -> bool {
        self.is_editing
            && !self.pending
            && self.has_changes()
            && !self.draft.first_name.trim().is_empty()
            && !self.draft.last_name.trim().is_empty()
    }

    /// Sends the trimmed fields. `Ok(false)` means there was nothing valid to save.
    pub async fn save(&mut self) -> Result<bool, ClientError> {
        if !self.can_save() {
            return Ok(false);
        }

        let request = self.draft.trimmed();
        self.pending = true;
        self.error = None;
        let result = self.api.update_me(&request).await;
        self.pending = false;

        let updated = match result {
            Ok(updated) => updated,
            Err(e) => {
                error!("Failed to update personal info: {e}");
                self.error = Some(e.user_message());
                return Err(e);
            }
        };

        info!("Personal info updated for candidate {}", updated.id);
        self.is_editing = false;
        if let Err(e) = self.refresh().await {
            warn!("Refetch after personal info update failed: {e}");
            self.apply_snapshot(updated);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::{json, Value};

    use super::*;
    use crate::http::mock::{client, MockDispatcher};

    fn me(first: &str, last: &str, phone: &str) -> Value {
        json!({
            "id": 1,
            "first_name": first,
            "last_name": last,
            "full_name": format!("{first} {last}"),
            "email": "jane@example.com",
            "phone": phone
        })
    }

    async fn mounted(mock: &std::sync::Arc<MockDispatcher>) -> PersonalInfoEditor {
        let mut editor = PersonalInfoEditor::new(&AppState::new(client(mock)));
        editor.mount().await.unwrap();
        editor
    }

    #[tokio::test]
    async fn test_cancel_restores_snapshot() {
        let mock = MockDispatcher::new();
        mock.respond_json(Method::GET, "/me/", 200, me("Jane", "Doe", "555"));
        let mut editor = mounted(&mock).await;

        editor.begin_edit();
        editor.set_field(PersonalField::FirstName, "Janet");
        editor.set_field(PersonalField::Phone, "");
        assert!(editor.has_changes());

        editor.cancel();
        assert!(!editor.is_editing());
        assert!(!editor.has_changes());
        assert_eq!(editor.draft().first_name, "Jane");
        assert_eq!(editor.draft().phone, "555");
    }

    #[tokio::test]
    async fn test_can_save_requires_changes_and_names() {
        let mock = MockDispatcher::new();
        mock.respond_json(Method::GET, "/me/", 200, me("Jane", "Doe", "555"));
        let mut editor = mounted(&mock).await;

        editor.begin_edit();
        assert!(!editor.can_save());

        editor.set_field(PersonalField::LastName, "   ");
        assert!(editor.has_changes());
        assert!(!editor.can_save());

        editor.set_field(PersonalField::LastName, "Smith");
        assert!(editor.can_save());
    }

    #[tokio::test]
    async fn test_save_trims_and_refetches() {
        let mock = MockDispatcher::new();
        mock.respond_json(Method::GET, "/me/", 200, me("Jane", "Doe", "555"));
        mock.respond_json(Method::GET, "/me/", 200, me("Janet", "Doe", "555"));
        mock.respond_json(Method::PATCH, "/me/", 200, me("Janet", "Doe", "555"));
        let mut editor = mounted(&mock).await;

        editor.begin_edit();
        editor.set_field(PersonalField::FirstName, "  Janet ");
        assert!(editor.save().await.unwrap());

        let body = mock
            .last_request_to(Method::PATCH, "/me/")
            .unwrap()
            .json_body()
            .cloned()
            .unwrap();
        assert_eq!(
            body,
            json!({"first_name": "Janet", "last_name": "Doe", "phone": "555"})
        );
        assert_eq!(mock.calls_to(Method::GET, "/me/"), 2);
        assert!(!editor.is_editing());
        assert_eq!(editor.snapshot().unwrap().first_name, "Janet");
    }

    #[tokio::test]
    async fn test_failed_save_stays_editing() {
        let mock = MockDispatcher::new();
        mock.respond_json(Method::GET, "/me/", 200, me("Jane", "Doe", "555"));
        mock.respond_json(Method::PATCH, "/me/", 500, json!({}));
        let mut editor = mounted(&mock).await;

        editor.begin_edit();
        editor.set_field(PersonalField::Phone, "556");
        assert!(editor.save().await.is_err());

        assert!(editor.is_editing());
        assert_eq!(editor.draft().phone, "556");
        assert_eq!(editor.error(), Some("Something went wrong"));
    }

    #[tokio::test]
    async fn test_refetch_during_edit_keeps_draft() {
        let mock = MockDispatcher::new();
        mock.respond_json(Method::GET, "/me/", 200, me("Jane", "Doe", "555"));
        let mut editor = mounted(&mock).await;

        editor.begin_edit();
        editor.set_field(PersonalField::FirstName, "Janet");

        let newer: Candidate = serde_json::from_value(me("Jane", "Roe", "555")).unwrap();
        editor.apply_snapshot(newer);

        assert_eq!(editor.draft().first_name, "Janet");
        assert_eq!(editor.draft().last_name, "Doe");
        editor.cancel();
        assert_eq!(editor.draft().last_name, "Roe");
    }
}
