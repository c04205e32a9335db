/// Navigation history stack. `replace` overwrites the current entry so the
/// replaced location is unreachable through `back`.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<String>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self {
            entries: vec!["/".to_string()],
            index: 0,
        }
    }
}

impl History {
    pub fn current(&self) -> &str {
        &self.entries[self.index]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries[..=self.index]
    }

    /// Adds an entry, dropping anything forward of the current position.
    pub fn push(&mut self, location: &str) {
        self.entries.truncate(self.index + 1);
        self.entries.push(location.to_string());
        self.index += 1;
    }

    pub fn replace(&mut self, location: &str) {
        self.entries[self.index] = location.to_string();
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_then_back_and_forward() {
        let mut history = History::default();
        history.push("/login");
        history.push("/dashboard/overview");

        assert_eq!(history.back(), Some("/login"));
        assert_eq!(history.forward(), Some("/dashboard/overview"));
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn test_replace_is_not_reachable_by_back() {
        let mut history = History::default();
        history.push("/dashboard/profile");
        history.replace("/login");

        assert_eq!(history.entries(), ["/", "/login"]);
        assert_eq!(history.back(), Some("/"));
        assert_eq!(history.back(), None);
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = History::default();
        history.push("/a");
        history.push("/b");
        history.back();
        history.push("/c");

        assert_eq!(history.forward(), None);
        assert_eq!(history.entries(), ["/", "/a", "/c"]);
    }
}
