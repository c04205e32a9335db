use super::View;
use crate::features::job_creation::{FlowStage, JobCreationFlow, Tab};
use crate::models::JobListing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Job,
    Resume,
    CoverLetter,
    Apply,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::Job, Step::Resume, Step::CoverLetter, Step::Apply];

    pub fn title(self) -> &'static str {
        match self {
            Step::Job => "Job",
            Step::Resume => "Resume",
            Step::CoverLetter => "Cover Letter",
            Step::Apply => "Apply",
        }
    }
}

/// Linear stepper. "Next" on the last step resets to the first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stepper {
    index: usize,
}

impl Stepper {
    pub fn current(&self) -> Step {
        Step::ALL[self.index]
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == Step::ALL.len()
    }

    pub fn next(&mut self) {
        if self.is_last() {
            self.reset();
        } else {
            self.index += 1;
        }
    }

    pub fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn go_to(&mut self, step: Step) {
        if let Some(index) = Step::ALL.iter().position(|s| *s == step) {
            self.index = index;
        }
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }
}

/// "Apply to a new job": the first step hosts the job creation flow.
#[derive(Debug, Clone, Default)]
pub struct AddJobPage {
    pub stepper: Stepper,
    pub job: JobCreationFlow,
    selected: Option<JobListing>,
}

impl AddJobPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_job(&self) -> Option<&JobListing> {
        self.selected.as_ref()
    }

    /// Confirms the previewed listing and advances to the resume step.
    pub fn confirm_job(&mut self) -> bool {
        let mut confirmed = None;
        if !self.job.confirm(|listing| confirmed = Some(listing)) {
            return false;
        }
        self.selected = confirmed;
        self.stepper.next();
        true
    }
}

impl View for AddJobPage {
    fn render(&self) -> String {
        let mut out = String::from("Apply to a new job\n");
        let steps: Vec<String> = Step::ALL
            .iter()
            .map(|step| {
                if *step == self.stepper.current() {
                    format!("[{}]", step.title())
                } else {
                    step.title().to_string()
                }
            })
            .collect();
        out.push_str(&steps.join(" > "));
        out.push_str("\n\n");

        match self.stepper.current() {
            Step::Job => out.push_str(&self.job.render()),
            step => {
                if let Some(job) = &self.selected {
                    out.push_str(&format!("{} at {}\n", job.title, job.company));
                }
                out.push_str(&format!("{} step\n", step.title()));
            }
        }

        let next = if self.stepper.is_last() { "Reset" } else { "Next" };
        if self.stepper.is_last() {
            out.push_str(&format!("\n[{next}]\n"));
        } else {
            out.push_str(&format!("\n[Previous] [{next}]\n"));
        }
        out
    }
}

impl View for JobCreationFlow {
    fn render(&self) -> String {
        let mut out = String::new();
        match self.stage() {
            FlowStage::Input => {
                let (hiring_cafe, manual) = match self.tab {
                    Tab::UrlImport => ("[Hiring.Cafe]", " Manual "),
                    Tab::Manual => (" Hiring.Cafe ", "[Manual]"),
                };
                out.push_str(&format!("{hiring_cafe} {manual}\n"));
                match self.tab {
                    Tab::UrlImport => {
                        out.push_str(&format!(
                            "Hiring.cafe Job Listing URL: {}\n",
                            self.url_draft.job_url
                        ));
                    }
                    Tab::Manual => {
                        let draft = &self.manual_draft;
                        out.push_str(&format!("Job Title: {}\n", draft.title));
                        out.push_str(&format!("Company: {}\n", draft.company));
                        out.push_str(&format!("Application URL: {}\n", draft.application_url));
                        out.push_str(&format!("Job Description: {}\n", draft.description));
                    }
                }
                if self.is_pending() {
                    out.push_str("Creating job...\n");
                }
                if let Some(error) = self.error() {
                    out.push_str(&format!("! {error}\n"));
                }
            }
            FlowStage::Preview(job) => {
                out.push_str(&format!("{}\n{}\n", job.title, job.company));
                out.push_str(&format!("{}\n", job.application_url));
                if let Some(posted_at) = job.posted_at {
                    out.push_str(&format!("Posted {}\n", posted_at.format("%-m/%-d/%Y")));
                }
                if let Some(description) = &job.description {
                    out.push_str(&format!("\n{description}\n"));
                }
                out.push_str("\n[Back] [Confirm]\n");
            }
        }
        out
    }
}
