//! Session state: the code group most recently opened.
//!
//! The session is a plain value owned by whoever drives the orchestrator and
//! passed into each action, so two sessions never share an active code by
//! accident. It lives for the process only.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    active: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the active code. Blank codes are ignored and leave the
    /// session unchanged; returns whether the code was taken.
    pub fn set_active(&mut self, code: &str) -> bool {
        if code.trim().is_empty() {
            return false;
        }
        self.active = Some(code.to_string());
        true
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Clears the active code only when it is `code`; returns whether it did.
    pub fn clear_if_matches(&mut self, code: &str) -> bool {
        if self.active.as_deref() == Some(code) {
            self.active = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_active_code() {
        assert_eq!(Session::new().active(), None);
    }

    #[test]
    fn set_active_overwrites() {
        let mut session = Session::new();
        assert!(session.set_active("ABC"));
        assert!(session.set_active("XYZ"));
        assert_eq!(session.active(), Some("XYZ"));
    }

    #[test]
    fn blank_code_is_ignored() {
        let mut session = Session::new();
        session.set_active("ABC");
        assert!(!session.set_active("   "));
        assert_eq!(session.active(), Some("ABC"));
    }

    #[test]
    fn clear_if_matches_only_clears_same_code() {
        let mut session = Session::new();
        session.set_active("ABC");

        assert!(!session.clear_if_matches("XYZ"));
        assert_eq!(session.active(), Some("ABC"));

        assert!(session.clear_if_matches("ABC"));
        assert_eq!(session.active(), None);

        assert!(!session.clear_if_matches("ABC"));
    }
}
