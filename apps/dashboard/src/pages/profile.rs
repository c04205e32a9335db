use super::{format_date, View};
use crate::errors::ClientError;
use crate::features::personal_info::PersonalInfoEditor;
use crate::features::resumes::ResumeManager;
use crate::features::social_links::SocialLinksEditor;
use crate::state::AppState;

/// Personal information, social links and resumes on one page.
pub struct ProfilePage {
    pub personal: PersonalInfoEditor,
    pub socials: SocialLinksEditor,
    pub resumes: ResumeManager,
}

impl ProfilePage {
    pub fn new(state: &AppState) -> Self {
        Self {
            personal: PersonalInfoEditor::new(state),
            socials: SocialLinksEditor::new(state),
            resumes: ResumeManager::new(state),
        }
    }

    pub async fn load(state: &AppState) -> Result<Self, ClientError> {
        let mut page = Self::new(state);
        let (personal, socials, resumes) = tokio::join!(
            page.personal.mount(),
            page.socials.mount(),
            page.resumes.mount()
        );
        personal?;
        socials?;
        resumes?;
        Ok(page)
    }
}

impl View for ProfilePage {
    fn render(&self) -> String {
        let mut out = self.personal.render();
        out.push('\n');
        out.push_str(&self.socials.render());
        out.push('\n');
        out.push_str(&self.resumes.render());
        out
    }
}

impl View for PersonalInfoEditor {
    fn render(&self) -> String {
        let mut out = String::from("Personal Information\n");
        let draft = self.draft();
        out.push_str(&format!("  First Name: {}\n", draft.first_name));
        out.push_str(&format!("  Last Name:  {}\n", draft.last_name));
        out.push_str(&format!("  Email:      {}\n", self.email().unwrap_or_default()));
        out.push_str(&format!("  Phone:      {}\n", draft.phone));
        if self.is_editing() && self.has_changes() {
            out.push_str("  (unsaved changes)\n");
        }
        if let Some(error) = self.error() {
            out.push_str(&format!("  ! {error}\n"));
        }
        out
    }
}

impl View for SocialLinksEditor {
    fn render(&self) -> String {
        let mut out = String::from("Social Links\n");
        if self.items().is_empty() && !self.is_adding_new() {
            out.push_str("  No social links added yet.\n");
        }
        for item in self.items() {
            let (marker, name, link) = if item.is_editing_this {
                ("*", &item.draft.name, &item.draft.link)
            } else {
                ("-", &item.social.name, &item.social.link)
            };
            out.push_str(&format!("  {marker} [{}] {name}: {link}\n", item.social.id));
        }
        if self.is_adding_new() {
            let draft = self.new_draft();
            out.push_str(&format!("  + new: {} {}\n", draft.name, draft.link));
        }
        if let Some(error) = self.error() {
            out.push_str(&format!("  ! {error}\n"));
        }
        out
    }
}

impl View for ResumeManager {
    fn render(&self) -> String {
        let mut out = String::from("Resume Management\n");
        if self.resumes().is_empty() {
            out.push_str("  No resumes uploaded yet.\n");
        }
        for resume in self.resumes() {
            out.push_str(&format!(
                "  - [{}] {} (Uploaded {})\n",
                resume.id,
                resume.name,
                format_date(resume.created_at)
            ));
        }
        if let Some(rejection) = self.upload.rejection() {
            out.push_str(&format!("  ! {rejection}\n"));
        } else if let Some(error) = self.error() {
            out.push_str(&format!("  ! {error}\n"));
        }
        out
    }
}
