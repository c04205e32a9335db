//! Cache keys for every resource the dashboard reads.

use super::QueryKey;

pub fn me() -> QueryKey {
    QueryKey::new("me")
}

pub fn socials() -> QueryKey {
    QueryKey::new("me/socials")
}

pub fn resumes() -> QueryKey {
    QueryKey::new("me/resumes")
}

pub fn applications() -> QueryKey {
    QueryKey::new("job-applications")
}
