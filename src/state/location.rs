// Addressable location.
// The visible path in non-desktop mode, rewritten in place on every tab switch.

/// Visible path plus the history stack behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    history: Vec<String>,
}

impl Location {
    pub fn new(path: &str) -> Self {
        Self {
            history: vec![normalize(path)],
        }
    }

    /// The current path, always starting with `/`.
    pub fn pathname(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or("/")
    }

    /// First non-empty path segment, e.g. `dashboard` for `/dashboard/3`.
    pub fn first_segment(&self) -> Option<&str> {
        self.pathname().split('/').nth(1).filter(|segment| !segment.is_empty())
    }

    /// Replace the current path without adding a history entry.
    pub fn replace_path(&mut self, path: &str) {
        let path = normalize(path);
        match self.history.last_mut() {
            Some(current) => *current = path,
            None => self.history.push(path),
        }
    }

    /// Navigate to a new path, adding a history entry.
    pub fn push_path(&mut self, path: &str) {
        let path = normalize(path);
        if self.pathname() != path {
            self.history.push(path);
        }
    }

    #[cfg(test)]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_segment() {
        assert_eq!(Location::new("/dashboard/3").first_segment(), Some("dashboard"));
        assert_eq!(Location::new("connections").first_segment(), Some("connections"));
        assert_eq!(Location::new("/").first_segment(), None);
        assert_eq!(Location::new("").first_segment(), None);
    }

    #[test]
    fn test_replace_keeps_history_length() {
        let mut location = Location::new("/");
        location.replace_path("/connections");
        location.replace_path("/workspace");
        location.replace_path("/connections");
        assert_eq!(location.pathname(), "/connections");
        assert_eq!(location.history_len(), 1);
    }

    #[test]
    fn test_push_adds_entry() {
        let mut location = Location::new("/workspace");
        location.push_path("/login");
        location.push_path("/login");
        assert_eq!(location.pathname(), "/login");
        assert_eq!(location.history_len(), 2);
    }
}
