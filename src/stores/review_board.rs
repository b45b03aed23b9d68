use crate::access::{self, Actor};
use crate::errors::board::BoardError;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A review held on the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEntry {
    pub username: String,
    pub text: String,
}

/// In-memory, per-game review board
///
/// Reviews posted here live only as long as the process; a restart wipes
/// the board. Keyed by game id, with entries kept in posting order.
#[derive(Debug, Default)]
pub struct ReviewBoard {
    games: RwLock<HashMap<String, Vec<BoardEntry>>>,
}

impl ReviewBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Vec<BoardEntry>>> {
        self.games.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Vec<BoardEntry>>> {
        self.games.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Post a review to a game's board
    ///
    /// One review per user per game; the text is trimmed and must not end
    /// up empty.
    pub fn add_review(
        &self,
        game_id: &str,
        username: &str,
        text: &str,
    ) -> Result<(), BoardError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(BoardError::EmptyReview);
        }

        let mut games = self.write();
        let entries = games.entry(game_id.to_string()).or_default();
        if entries.iter().any(|entry| entry.username == username) {
            return Err(BoardError::DuplicateReview(username.to_string()));
        }

        entries.push(BoardEntry {
            username: username.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    /// Replace the text of a review owned by `owner_username`
    ///
    /// Permitted for the owner and for admins. Edits the first matching
    /// entry; its position on the board is preserved.
    pub fn edit_review(
        &self,
        game_id: &str,
        owner_username: &str,
        actor: &Actor,
        new_text: &str,
    ) -> Result<(), BoardError> {
        if !access::can_mutate(actor, owner_username) {
            return Err(BoardError::Forbidden);
        }

        let new_text = new_text.trim();
        if new_text.is_empty() {
            return Err(BoardError::EmptyReview);
        }

        let mut games = self.write();
        let entries = games
            .get_mut(game_id)
            .ok_or_else(|| BoardError::ReviewNotFound(owner_username.to_string()))?;

        let entry = entries
            .iter_mut()
            .find(|entry| entry.username == owner_username)
            .ok_or_else(|| BoardError::ReviewNotFound(owner_username.to_string()))?;

        entry.text = new_text.to_string();
        Ok(())
    }

    /// Remove every review owned by `owner_username` on a game's board
    ///
    /// Permitted for the owner and for admins. Returns how many entries
    /// were removed.
    pub fn delete_review(
        &self,
        game_id: &str,
        owner_username: &str,
        actor: &Actor,
    ) -> Result<usize, BoardError> {
        if !access::can_mutate(actor, owner_username) {
            return Err(BoardError::Forbidden);
        }

        let mut games = self.write();
        let entries = games
            .get_mut(game_id)
            .ok_or_else(|| BoardError::ReviewNotFound(owner_username.to_string()))?;

        let before = entries.len();
        entries.retain(|entry| entry.username != owner_username);
        let removed = before - entries.len();

        if removed == 0 {
            return Err(BoardError::ReviewNotFound(owner_username.to_string()));
        }
        if entries.is_empty() {
            games.remove(game_id);
        }
        Ok(removed)
    }

    /// Whether the user already has a review on this game's board
    pub fn has_reviewed(&self, game_id: &str, username: &str) -> bool {
        self.read()
            .get(game_id)
            .map(|entries| entries.iter().any(|entry| entry.username == username))
            .unwrap_or(false)
    }

    /// All reviews on a game's board, oldest first
    pub fn reviews_for(&self, game_id: &str) -> Vec<BoardEntry> {
        self.read().get(game_id).cloned().unwrap_or_default()
    }

    /// Remove every review by a user across all games
    ///
    /// Runs when an account is deleted so the board holds no orphans.
    pub fn purge_user(&self, username: &str) {
        let mut games = self.write();
        for entries in games.values_mut() {
            entries.retain(|entry| entry.username != username);
        }
        games.retain(|_, entries| !entries.is_empty());
    }
}
