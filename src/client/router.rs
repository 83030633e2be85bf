//! In-memory navigation history.

use crate::client::gate::GateDecision;
use crate::shared::routes;

#[derive(Debug, Clone)]
pub struct Navigator {
    history: Vec<String>,
}

impl Navigator {
    pub fn new(initial: &str) -> Self {
        Self {
            history: vec![routes::normalize(initial)],
        }
    }

    pub fn current(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or(routes::HOME)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// New history entry
    pub fn push(&mut self, path: &str) {
        self.history.push(routes::normalize(path));
    }

    /// Overwrite the current entry, so "back" skips it
    pub fn replace(&mut self, path: &str) {
        let path = routes::normalize(path);
        match self.history.last_mut() {
            Some(last) => *last = path,
            None => self.history.push(path),
        }
    }

    /// Go back one entry. The first entry is never popped.
    pub fn back(&mut self) -> Option<&str> {
        if self.history.len() < 2 {
            return None;
        }
        self.history.pop();
        Some(self.current())
    }

    /// Follow a gate redirect. Renders leave history alone.
    pub fn follow(&mut self, decision: &GateDecision) {
        if let GateDecision::Redirect { to, replace } = decision {
            if *replace {
                self.replace(to);
            } else {
                self.push(to);
            }
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(routes::HOME)
    }
}
