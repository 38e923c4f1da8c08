//! Bounded log of recently applied actions

use crate::actions::catalog::ActionId;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Number of applied actions kept in the history
pub const HISTORY_LIMIT: usize = 10;

/// Most recent actions, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionHistory {
    actions: VecDeque<ActionId>,
    max_len: usize,
}

impl Default for ActionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionHistory {
    pub fn new() -> Self {
        Self {
            actions: VecDeque::with_capacity(HISTORY_LIMIT),
            max_len: HISTORY_LIMIT,
        }
    }

    /// Append an action, dropping the oldest once full
    pub fn push(&mut self, action: ActionId) {
        if self.actions.len() >= self.max_len {
            self.actions.pop_front();
        }
        self.actions.push_back(action);
    }

    pub fn last(&self) -> Option<ActionId> {
        self.actions.back().copied()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ActionId> + '_ {
        self.actions.iter().copied()
    }

    /// Action names in insertion order
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(ActionId::name).collect()
    }
}
