//! Social links card: a list editor where each row edits in place, plus an
//! "add new" row. Every mutation refetches the whole list afterwards.
use tracing::{error, info, warn};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::{SocialLink, UpsertSocialRequest};
use crate::query::{keys, QueryCache};
use crate::state::AppState;
use crate::validation;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialDraft {
    pub name: String,
    pub link: String,
}

impl SocialDraft {
    pub fn can_save(&self) -> bool {
        !self.name.trim().is_empty() && validation::is_valid_url(&self.link)
    }

    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            link: self.link.trim().to_string(),
        }
    }

    fn request(&self, id: Option<i64>) -> UpsertSocialRequest {
        UpsertSocialRequest {
            id,
            name: self.name.trim().to_string(),
            link: self.link.trim().to_string(),
        }
    }
}

impl From<&SocialLink> for SocialDraft {
    fn from(link: &SocialLink) -> Self {
        Self {
            name: link.name.clone(),
            link: link.link.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialItem {
    pub social: SocialLink,
    pub draft: SocialDraft,
    pub is_editing_this: bool,
}

impl SocialItem {
    fn new(social: SocialLink) -> Self {
        Self {
            draft: SocialDraft::from(&social),
            social,
            is_editing_this: false,
        }
    }
}

pub struct SocialLinksEditor {
    api: ApiClient,
    queries: QueryCache,
    items: Vec<SocialItem>,
    is_editing: bool,
    is_adding_new: bool,
    new_draft: SocialDraft,
    pending: bool,
    error: Option<String>,
}

impl SocialLinksEditor {
    pub fn new(state: &AppState) -> Self {
        Self {
            api: state.api.clone(),
            queries: state.queries.clone(),
            items: Vec::new(),
            is_editing: false,
            is_adding_new: false,
            new_draft: SocialDraft::default(),
            pending: false,
            error: None,
        }
    }

    pub async fn mount(&mut self) -> Result<(), ClientError> {
        let api = self.api.clone();
        let socials = self
            .queries
            .fetch(&keys::socials(), move || async move { api.list_socials().await })
            .await?;
        self.apply_list(socials);
        Ok(())
    }

    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let api = self.api.clone();
        let socials = self
            .queries
            .refetch(&keys::socials(), move || async move { api.list_socials().await })
            .await?;
        self.apply_list(socials);
        Ok(())
    }

    /// Replaces the list with the server's. Rows being edited keep their draft.
    pub fn apply_list(&mut self, socials: Vec<SocialLink>) {
        let mut previous = std::mem::take(&mut self.items);
        self.items = socials
            .into_iter()
            .map(|social| {
                let open = previous
                    .iter()
                    .position(|item| item.social.id == social.id && item.is_editing_this)
                    .map(|i| previous.swap_remove(i));
                match open {
                    Some(item) => SocialItem { social, ..item },
                    None => SocialItem::new(social),
                }
            })
            .collect();
    }

    pub fn items(&self) -> &[SocialItem] {
        &self.items
    }

    pub fn item(&self, id: i64) -> Option<&SocialItem> {
        self.items.iter().find(|item| item.social.id == id)
    }

    fn item_mut(&mut self, id: i64) -> Option<&mut SocialItem> {
        self.items.iter_mut().find(|item| item.social.id == id)
    }

    pub fn is_editing(&self) -> bool {
        self.is_editing
    }

    pub fn is_adding_new(&self) -> bool {
        self.is_adding_new
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn new_draft(&self) -> &SocialDraft {
        &self.new_draft
    }

    /// "Edit" / "Done". Always drops the add-new row.
    pub fn toggle_edit(&mut self) {
        self.is_editing = !self.is_editing;
        self.is_adding_new = false;
        if !self.is_editing {
            for item in &mut self.items {
                item.draft = SocialDraft::from(&item.social);
                item.is_editing_this = false;
            }
        }
    }

    pub fn begin_add(&mut self) {
        self.is_adding_new = true;
        self.is_editing = true;
        self.new_draft = SocialDraft::default();
    }

    /// Drops the add-new row. With no saved links there is nothing left to edit.
    pub fn cancel_add(&mut self) {
        self.is_adding_new = false;
        self.new_draft = SocialDraft::default();
        if self.items.is_empty() {
            self.is_editing = false;
        }
    }

    pub fn set_new_name(&mut self, name: impl Into<String>) {
        self.new_draft.name = name.into();
    }

    pub fn set_new_link(&mut self, link: impl Into<String>) {
        self.new_draft.link = link.into();
    }

    pub fn begin_item_edit(&mut self, id: i64) -> bool {
        if !self.is_editing {
            return false;
        }
        match self.item_mut(id) {
            Some(item) => {
                item.draft = SocialDraft::from(&item.social);
                item.is_editing_this = true;
                true
            }
            None => false,
        }
    }

    pub fn set_item_name(&mut self, id: i64, name: impl Into<String>) {
        if let Some(item) = self.item_mut(id) {
            item.draft.name = name.into();
        }
    }

    pub fn set_item_link(&mut self, id: i64, link: impl Into<String>) {
        if let Some(item) = self.item_mut(id) {
            item.draft.link = link.into();
        }
    }

    pub fn cancel_item(&mut self, id: i64) {
        if let Some(item) = self.item_mut(id) {
            item.draft = SocialDraft::from(&item.social);
            item.is_editing_this = false;
        }
    }

    /// Valid and different from the last-fetched row.
    pub fn item_can_save(&self, id: i64) -> bool {
        self.item(id).is_some_and(|item| {
            item.is_editing_this
                && item.draft.can_save()
                && item.draft.trimmed() != SocialDraft::from(&item.social).trimmed()
        })
    }

    /// Upserts one edited row (with its id) and refetches the list.
    pub async fn save_item(&mut self, id: i64) -> Result<bool, ClientError> {
        if self.pending || !self.item_can_save(id) {
            return Ok(false);
        }
        let request = match self.item(id) {
            Some(item) => item.draft.request(Some(id)),
            None => return Ok(false),
        };

        self.upsert(&request).await?;
        if let Some(item) = self.item_mut(id) {
            item.is_editing_this = false;
        }
        self.refresh_after_mutation().await;
        Ok(true)
    }

    /// Creates a link from the add-new row and refetches the list.
    pub async fn save_new(&mut self) -> Result<bool, ClientError> {
        if self.pending || !self.is_adding_new || !self.new_draft.can_save() {
            return Ok(false);
        }
        let request = self.new_draft.request(None);

        self.upsert(&request).await?;
        self.is_adding_new = false;
        self.new_draft = SocialDraft::default();
        self.refresh_after_mutation().await;
        Ok(true)
    }

    /// Deletes immediately, without confirmation, then refetches the list.
    pub async fn delete(&mut self, id: i64) -> Result<(), ClientError> {
        self.pending = true;
        self.error = None;
        let result = self.api.delete_social(id).await;
        self.pending = false;

        if let Err(e) = result {
            error!("Failed to delete social link {id}: {e}");
            self.error = Some(e.user_message());
            return Err(e);
        }
        info!("Deleted social link {id}");
        self.refresh_after_mutation().await;
        Ok(())
    }

    /// The mutation already landed; a failed refetch only leaves the list stale.
    async fn refresh_after_mutation(&mut self) {
        if let Err(e) = self.refresh().await {
            warn!("Refetch of social links failed: {e}");
        }
    }

    async fn upsert(&mut self, request: &UpsertSocialRequest) -> Result<SocialLink, ClientError> {
        self.pending = true;
        self.error = None;
        let result = self.api.upsert_social(request).await;
        self.pending = false;

        result
            .map(|saved| {
                info!("Saved social link {}", saved.id);
                saved
            })
            .map_err(|e| {
                error!("Failed to save social link: {e}");
                self.error = Some(e.user_message());
                e
            })
    }
}

#[cfg(test)]
mod tests {
    use reqwest::Method;
    use serde_json::json;

    use super::*;
    use crate::http::mock::{client, MockDispatcher};

    fn editor(mock: &std::sync::Arc<MockDispatcher>) -> SocialLinksEditor {
        SocialLinksEditor::new(&AppState::new(client(mock)))
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_that_item() {
        let mock = MockDispatcher::new();
        mock.respond_json(
            Method::GET,
            "/me/socials",
            200,
            json!([
                {"id": 1, "name": "GitHub", "link": "https://github.com/jane"},
                {"id": 2, "name": "LinkedIn", "link": "https://linkedin.com/in/jane"},
                {"id": 3, "name": "Blog", "link": "https://jane.dev"}
            ]),
        );
        mock.respond_json(
            Method::GET,
            "/me/socials",
            200,
            json!([
                {"id": 1, "name": "GitHub", "link": "https://github.com/jane"},
                {"id": 3, "name": "Blog", "link": "https://jane.dev"}
            ]),
        );
        mock.respond_empty(Method::DELETE, "/me/socials/2", 204);
        let mut editor = editor(&mock);
        editor.mount().await.unwrap();

        editor.delete(2).await.unwrap();

        let ids: Vec<i64> = editor.items().iter().map(|i| i.social.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(mock.calls_to(Method::DELETE, "/me/socials/2"), 1);
    }

    #[tokio::test]
    async fn test_item_save_requires_valid_url() {
        let mock = MockDispatcher::new();
        mock.respond_json(
            Method::GET,
            "/me/socials",
            200,
            json!([{"id": 7, "name": "GitHub", "link": "https://github.com/jane"}]),
        );
        let mut editor = editor(&mock);
        editor.mount().await.unwrap();

        editor.toggle_edit();
        assert!(editor.begin_item_edit(7));
        editor.set_item_link(7, "github.com/jane");
        assert!(!editor.item_can_save(7));
        assert!(!editor.save_item(7).await.unwrap());
        assert_eq!(mock.calls_to(Method::PUT, "/me/socials"), 0);

        editor.set_item_link(7, "");
        assert!(!editor.item_can_save(7));
        editor.set_item_link(7, "https://github.com/janedoe");
        assert!(editor.item_can_save(7));
    }

    #[tokio::test]
    async fn test_save_item_upserts_with_id() {
        let mock = MockDispatcher::new();
        mock.respond_json(
            Method::GET,
            "/me/socials",
            200,
            json!([{"id": 7, "name": "GitHub", "link": "https://github.com/jane"}]),
        );
        mock.respond_json(
            Method::PUT,
            "/me/socials",
            200,
            json!({"id": 7, "name": "GitHub", "link": "https://github.com/janedoe"}),
        );
        let mut editor = editor(&mock);
        editor.mount().await.unwrap();

        editor.toggle_edit();
        editor.begin_item_edit(7);
        editor.set_item_link(7, " https://github.com/janedoe ");
        assert!(editor.save_item(7).await.unwrap());

        let body = mock
            .last_request_to(Method::PUT, "/me/socials")
            .unwrap()
            .json_body()
            .cloned()
            .unwrap();
        assert_eq!(
            body,
            json!({"id": 7, "name": "GitHub", "link": "https://github.com/janedoe"})
        );
        assert!(!editor.item(7).unwrap().is_editing_this);
        assert_eq!(mock.calls_to(Method::GET, "/me/socials"), 2);
    }

    #[tokio::test]
    async fn test_save_new_omits_id() {
        let mock = MockDispatcher::new();
        mock.respond_json(Method::GET, "/me/socials", 200, json!([]));
        mock.respond_json(
            Method::GET,
            "/me/socials",
            200,
            json!([{"id": 9, "name": "Blog", "link": "https://jane.dev"}]),
        );
        mock.respond_json(
            Method::PUT,
            "/me/socials",
            200,
            json!({"id": 9, "name": "Blog", "link": "https://jane.dev"}),
        );
        let mut editor = editor(&mock);
        editor.mount().await.unwrap();

        editor.begin_add();
        editor.set_new_name("Blog");
        editor.set_new_link("https://jane.dev");
        assert!(editor.save_new().await.unwrap());

        let request = mock.last_request_to(Method::PUT, "/me/socials").unwrap();
        assert!(request.json_body().unwrap().get("id").is_none());
        assert!(!editor.is_adding_new());
        assert!(editor.is_editing());
        assert_eq!(editor.items().len(), 1);
    }

    #[tokio::test]
    async fn test_cancel_add_on_empty_list_leaves_edit_mode() {
        let mock = MockDispatcher::new();
        mock.respond_json(Method::GET, "/me/socials", 200, json!([]));
        let mut editor = editor(&mock);
        editor.mount().await.unwrap();

        editor.begin_add();
        assert!(editor.is_editing());
        editor.cancel_add();
        assert!(!editor.is_editing());
        assert!(!editor.is_adding_new());
    }

    fn three_links() -> Vec<SocialLink> {
        serde_json::from_value(json!([
            {"id": 1, "name": "GitHub", "link": "https://github.com/jane"},
            {"id": 2, "name": "LinkedIn", "link": "https://linkedin.com/in/jane"},
            {"id": 3, "name": "Blog", "link": "https://jane.dev"}
        ]))
        .unwrap()
    }

    #[tokio::test]
    async fn test_delete_refetches_past_an_older_fetch_in_flight() {
        let mock = MockDispatcher::new();
        mock.respond_json(
            Method::GET,
            "/me/socials",
            200,
            json!([
                {"id": 1, "name": "GitHub", "link": "https://github.com/jane"},
                {"id": 3, "name": "Blog", "link": "https://jane.dev"}
            ]),
        );
        mock.respond_empty(Method::DELETE, "/me/socials/2", 204);
        let state = AppState::new(client(&mock));
        let mut editor = SocialLinksEditor::new(&state);
        editor.apply_list(three_links());

        let queries = state.queries.clone();
        let key = keys::socials();
        let (earlier, deleted) = tokio::join!(
            queries.fetch::<Vec<SocialLink>, _, _>(&key, || async {
                tokio::time::sleep(std::time::Duration::from_millis(50)).await;
                Ok(three_links())
            }),
            async {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                editor.delete(2).await
            },
        );

        assert_eq!(earlier.unwrap().len(), 3);
        deleted.unwrap();
        let ids: Vec<i64> = editor.items().iter().map(|i| i.social.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(mock.calls_to(Method::GET, "/me/socials"), 1);
        let cached: Vec<SocialLink> = state.queries.peek(&keys::socials()).unwrap();
        assert_eq!(cached.len(), 2);
    }

    #[tokio::test]
    async fn test_unchanged_row_cannot_be_saved() {
        let mock = MockDispatcher::new();
        mock.respond_json(
            Method::GET,
            "/me/socials",
            200,
            json!([{"id": 7, "name": "GitHub", "link": "https://github.com/jane"}]),
        );
        let mut editor = editor(&mock);
        editor.mount().await.unwrap();

        editor.toggle_edit();
        assert!(editor.begin_item_edit(7));
        assert!(!editor.item_can_save(7));
        assert!(!editor.save_item(7).await.unwrap());

        editor.set_item_name(7, "  GitHub ");
        assert!(!editor.item_can_save(7));
        editor.set_item_name(7, "GitHub (work)");
        assert!(editor.item_can_save(7));
        assert_eq!(mock.calls_to(Method::PUT, "/me/socials"), 0);
    }

    #[tokio::test]
    async fn test_done_restores_every_edited_field() {
        let mock = MockDispatcher::new();
        let mut editor = editor(&mock);
        editor.apply_list(three_links());

        editor.toggle_edit();
        assert!(editor.begin_item_edit(2));
        editor.set_item_name(2, "LinkedIn (old)");
        editor.set_item_link(2, "https://linkedin.com/in/jane-doe");
        editor.toggle_edit();

        let item = editor.item(2).unwrap();
        assert_eq!(item.draft, SocialDraft::from(&item.social));
        assert_eq!(item.draft.name, "LinkedIn");
        assert!(!item.is_editing_this);
        assert!(!editor.is_editing());
    }

    #[tokio::test]
    async fn test_save_succeeds_when_refetch_fails() {
        let mock = MockDispatcher::new();
        mock.respond_json(
            Method::GET,
            "/me/socials",
            200,
            json!([{"id": 7, "name": "GitHub", "link": "https://github.com/jane"}]),
        );
        mock.respond_json(
            Method::GET,
            "/me/socials",
            500,
            json!({"detail": "Internal server error"}),
        );
        mock.respond_json(
            Method::PUT,
            "/me/socials",
            200,
            json!({"id": 7, "name": "GitHub", "link": "https://github.com/janedoe"}),
        );
        mock.respond_empty(Method::DELETE, "/me/socials/7", 204);
        let mut editor = editor(&mock);
        editor.mount().await.unwrap();

        editor.toggle_edit();
        editor.begin_item_edit(7);
        editor.set_item_link(7, "https://github.com/janedoe");
        assert!(editor.save_item(7).await.unwrap());
        editor.delete(7).await.unwrap();

        assert_eq!(editor.error(), None);
        assert_eq!(mock.calls_to(Method::GET, "/me/socials"), 3);
    }

    #[tokio::test]
    async fn test_toggle_edit_discards_add_row() {
        let mock = MockDispatcher::new();
        let mut editor = editor(&mock);
        editor.apply_list(vec![SocialLink {
            id: 1,
            name: "GitHub".to_string(),
            link: "https://github.com/jane".to_string(),
        }]);

        editor.begin_add();
        editor.toggle_edit();
        assert!(!editor.is_editing());
        assert!(!editor.is_adding_new());

        editor.toggle_edit();
        editor.begin_add();
        editor.cancel_add();
        assert!(editor.is_editing());
    }
}
