use std::sync::{Arc, RwLock};

/// Single-slot holder for the current session token.
///
/// Clones share the same slot, so every accessor created from one client sees
/// the token set by the last login.
#[derive(Debug, Clone, Default)]
pub struct Token {
    slot: Arc<RwLock<Option<String>>>,
}

impl Token {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token, or an empty string when unauthenticated
    pub fn get(&self) -> String {
        let guard = self.slot.read().unwrap_or_else(|e| e.into_inner());
        guard.clone().unwrap_or_default()
    }

    pub fn set(&self, token: impl Into<String>) {
        let token = token.into();
        let mut guard = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *guard = if token.is_empty() { None } else { Some(token) };
    }

    pub fn clear(&self) {
        self.set("");
    }

    pub fn is_set(&self) -> bool {
        !self.get().is_empty()
    }
}
