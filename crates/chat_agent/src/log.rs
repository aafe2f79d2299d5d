//! Volatile conversation history.

use agent_provider::{Role, Turn};

/// Append-only list of turns in conversation order.
///
/// Lives only as long as the controller that owns it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    turns: Vec<Turn>,
}

impl MessageLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of turns authored by `role`.
    #[must_use]
    pub fn count_role(&self, role: Role) -> usize {
        self.turns.iter().filter(|turn| turn.role() == role).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_preserves_insertion_order() {
        let mut log = MessageLog::new();
        log.append(Turn::user("A"));
        log.append(Turn::model("reply"));

        let rendered: Vec<String> = log.turns().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["user:A", "model:reply"]);
        assert_eq!(log.count_role(Role::User), 1);
        assert_eq!(log.last().map(Turn::text), Some("reply"));
    }
}
