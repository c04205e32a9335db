use super::View;
use crate::features::auth_forms::{LoginForm, SignupForm};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthTab {
    #[default]
    SignUp,
    LogIn,
}

#[derive(Debug, Clone, Default)]
pub struct LoginPage {
    pub tab: AuthTab,
    pub login: LoginForm,
    pub signup: SignupForm,
}

impl View for LoginPage {
    fn render(&self) -> String {
        let mut out = String::from("Login or Sign Up\n");
        out.push_str(
            "Access your JobAgent dashboard to manage your candidate profile, \
             job applications, resumes, and more.\n\n",
        );
        let (signup, login) = match self.tab {
            AuthTab::SignUp => ("[Sign Up]", " Log In "),
            AuthTab::LogIn => (" Sign Up ", "[Log In]"),
        };
        out.push_str(&format!("{signup} {login}\n\n"));

        match self.tab {
            AuthTab::SignUp => {
                let form = &self.signup;
                out.push_str(&format!("First Name: {}\n", form.first_name));
                out.push_str(&format!("Last Name: {}\n", form.last_name));
                out.push_str(&format!("Email: {}\n", form.email));
                out.push_str(&format!("Phone: {}\n", form.phone));
                out.push_str(&format!("Password: {}\n", mask(&form.password)));
                out.push_str(&format!("Confirm Password: {}\n", mask(&form.confirm_password)));
                if !form.passwords_match() {
                    out.push_str("  Password does not match.\n");
                }
                if let Some(error) = form.error() {
                    out.push_str(&format!("! {error}\n"));
                }
            }
            AuthTab::LogIn => {
                let form = &self.login;
                out.push_str(&format!("Email: {}\n", form.email));
                out.push_str(&format!("Password: {}\n", mask(&form.password)));
                if let Some(error) = form.error() {
                    out.push_str(&format!("! {error}\n"));
                }
            }
        }
        out
    }
}

fn mask(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}
