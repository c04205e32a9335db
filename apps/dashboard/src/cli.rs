//! `dashboard` command line: each subcommand drives one page or component.
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use crate::features::auth_forms::{LoginForm, SignupForm};
use crate::features::job_creation::{JobCreationFlow, Tab};
use crate::features::personal_info::{PersonalField, PersonalInfoEditor};
use crate::features::resumes::{ResumeFile, ResumeManager};
use crate::features::social_links::SocialLinksEditor;
use crate::pages::{self, add_job::AddJobPage, View};
use crate::routes::{Navigation, Navigator};
use crate::session::Session;
use crate::state::AppState;
use crate::storage::{Storage, SESSION_TOKEN_KEY};
use crate::theme::ThemePreference;

#[derive(Debug, Parser)]
#[command(name = "dashboard", about = "JobAgent candidate dashboard", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Navigate to a path and print the page it settles on.
    Open {
        #[arg(default_value = "/dashboard")]
        path: String,
    },
    /// Log in with email and password.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create a candidate account.
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
        /// Defaults to `--password`.
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Forget the stored session token.
    Logout,
    /// Edit personal information.
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Manage social links.
    Socials {
        #[command(subcommand)]
        action: SocialAction,
    },
    /// Manage resumes.
    Resumes {
        #[command(subcommand)]
        action: ResumeAction,
    },
    /// Create a job listing and preview it.
    AddJob {
        #[command(subcommand)]
        action: AddJobAction,
    },
    /// Read or change the stored theme preference.
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    Set {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum SocialAction {
    Add {
        name: String,
        link: String,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        link: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum ResumeAction {
    Upload {
        path: PathBuf,
        #[arg(long)]
        name: String,
    },
    Delete {
        id: i64,
    },
    /// Print a short-lived link to the stored PDF.
    View {
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
pub enum AddJobAction {
    /// Import from a job posting URL.
    Url { url: String },
    /// Enter the job by hand.
    Manual {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    Get,
    Set { theme: ThemePreference },
}

/// Everything a command needs: shared client state plus local storage.
pub struct Context {
    pub state: AppState,
    pub storage: Storage,
}

pub async fn run(command: Command, ctx: &mut Context) -> Result<()> {
    match command {
        Command::Open { path } => open(&path, ctx).await,
        Command::Login { email, password } => login(email, password, ctx).await,
        Command::Register {
            first_name,
            last_name,
            email,
            phone,
            password,
            confirm_password,
        } => {
            let mut form = SignupForm::default();
            form.confirm_password = confirm_password.unwrap_or_else(|| password.clone());
            form.first_name = first_name;
            form.last_name = last_name;
            form.email = email;
            form.phone = phone;
            form.password = password;
            let candidate = form.submit(&ctx.state.api).await?;
            println!("Registered {} <{}>", candidate.display_name(), candidate.email);
            Ok(())
        }
        Command::Logout => {
            ctx.state.api.logout();
            ctx.state.queries.clear();
            ctx.storage.remove(SESSION_TOKEN_KEY)?;
            println!("Signed out");
            Ok(())
        }
        Command::Profile { action } => profile(action, ctx).await,
        Command::Socials { action } => socials(action, ctx).await,
        Command::Resumes { action } => resumes(action, ctx).await,
        Command::AddJob { action } => add_job(action, ctx).await,
        Command::Theme { action } => {
            match action {
                ThemeAction::Get => println!("{}", ThemePreference::load(&ctx.storage)),
                ThemeAction::Set { theme } => {
                    theme.save(&mut ctx.storage)?;
                    println!("{theme}");
                }
            }
            Ok(())
        }
    }
}

async fn open(path: &str, ctx: &mut Context) -> Result<()> {
    let mut session = Session::new(ctx.state.identity());
    session.mount().await;

    let mut navigator = Navigator::new();
    let navigation = navigator.navigate(path, session.state());
    println!("Location: {}\n", navigator.current());

    match navigation {
        Navigation::Render(route) => {
            print!(
                "{}",
                pages::render_route(route, &ctx.state, session.state()).await?
            );
        }
        Navigation::Blank(_) => {}
        Navigation::NotFound(location) => println!("Page not found: {location}"),
    }
    Ok(())
}

async fn login(email: String, password: String, ctx: &mut Context) -> Result<()> {
    let mut session = Session::new(ctx.state.identity());
    let mut form = LoginForm::new(email, password);
    let token = form.submit(&ctx.state.api, &mut session).await?;
    ctx.storage.set(SESSION_TOKEN_KEY, token.access_token)?;

    match session.user() {
        Some(user) => println!("Signed in as {}", user.display_name()),
        None => println!("Signed in"),
    }
    Ok(())
}

async fn profile(action: ProfileAction, ctx: &mut Context) -> Result<()> {
    let ProfileAction::Set {
        first_name,
        last_name,
        phone,
    } = action;

    let mut editor = PersonalInfoEditor::new(&ctx.state);
    editor.mount().await?;
    editor.begin_edit();
    let fields = [
        (PersonalField::FirstName, first_name),
        (PersonalField::LastName, last_name),
        (PersonalField::Phone, phone),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            editor.set_field(field, value);
        }
    }

    if !editor.save().await? {
        bail!("Nothing to save: change a field and keep first and last name non-empty");
    }
    print!("{}", editor.render());
    Ok(())
}

async fn socials(action: SocialAction, ctx: &mut Context) -> Result<()> {
    let mut editor = SocialLinksEditor::new(&ctx.state);
    editor.mount().await?;

    match action {
        SocialAction::Add { name, link } => {
            editor.begin_add();
            editor.set_new_name(name);
            editor.set_new_link(link);
            if !editor.save_new().await? {
                bail!("A social link needs a name and a valid http(s) URL");
            }
        }
        SocialAction::Edit { id, name, link } => {
            editor.toggle_edit();
            if !editor.begin_item_edit(id) {
                bail!("No social link with id {id}");
            }
            if let Some(name) = name {
                editor.set_item_name(id, name);
            }
            if let Some(link) = link {
                editor.set_item_link(id, link);
            }
            if !editor.save_item(id).await? {
                bail!("A social link needs a name and a valid http(s) URL");
            }
        }
        SocialAction::Delete { id } => editor.delete(id).await?,
    }

    print!("{}", editor.render());
    Ok(())
}

async fn resumes(action: ResumeAction, ctx: &mut Context) -> Result<()> {
    let mut manager = ResumeManager::new(&ctx.state);

    match action {
        ResumeAction::Upload { path, name } => {
            let file = ResumeFile::read(&path).await?;
            manager.toggle_edit();
            manager.upload.name = name;
            manager.upload.drop_files(vec![file])?;
            let resume = manager.upload().await?;
            info!("Resume {} stored as '{}'", resume.id, resume.name);
        }
        ResumeAction::Delete { id } => manager.delete(id).await?,
        ResumeAction::View { id } => {
            match manager.view(id).await? {
                Some(link) => println!("{link}"),
                None => println!("No link available for resume {id}"),
            }
            return Ok(());
        }
    }

    print!("{}", manager.render());
    Ok(())
}

async fn add_job(action: AddJobAction, ctx: &mut Context) -> Result<()> {
    let mut flow = JobCreationFlow::new();
    match action {
        AddJobAction::Url { url } => {
            flow.select_tab(Tab::UrlImport);
            flow.url_draft.job_url = url;
        }
        AddJobAction::Manual {
            title,
            company,
            url,
            description,
        } => {
            flow.select_tab(Tab::Manual);
            flow.manual_draft.title = title;
            flow.manual_draft.company = company;
            flow.manual_draft.application_url = url;
            flow.manual_draft.description = description.unwrap_or_default();
        }
    }

    flow.submit(&ctx.state.api).await?;
    let mut page = AddJobPage::new();
    page.job = flow;
    print!("{}", page.render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_nested_subcommands() {
        let cli = Cli::try_parse_from([
            "dashboard",
            "add-job",
            "manual",
            "--title",
            "Software Engineer",
            "--company",
            "Acme",
            "--url",
            "https://acme.com/job/1",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::AddJob {
                action: AddJobAction::Manual { description: None, .. }
            }
        ));
    }

    #[test]
    fn test_theme_value_is_parsed() {
        let cli = Cli::try_parse_from(["dashboard", "theme", "set", "light"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Theme {
                action: ThemeAction::Set {
                    theme: ThemePreference::Light
                }
            }
        ));
        assert!(Cli::try_parse_from(["dashboard", "theme", "set", "sepia"]).is_err());
    }

    #[test]
    fn test_open_defaults_to_dashboard() {
        let cli = Cli::try_parse_from(["dashboard", "open"]).unwrap();
        assert!(matches!(cli.command, Command::Open { path } if path == "/dashboard"));
    }
}
