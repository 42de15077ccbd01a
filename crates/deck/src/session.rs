//! Mutable state for one run of the discovery screen.
//!
//! Pure data and transitions; the [`SwipeOrchestrator`] owns the lock
//! and the async choreography around it.
//!
//! [`SwipeOrchestrator`]: crate::orchestrator::SwipeOrchestrator

use uuid::Uuid;

use dorama_core::quota::QuotaStatus;

use crate::item::DeckItem;

/// Deck, cursor and flags for one discovery session.
pub struct SwipeSession {
    session_id: Uuid,
    deck: Vec<DeckItem>,
    cursor: usize,
    in_flight: bool,
    extending: bool,
    limit_prompt: bool,
    quota: Option<QuotaStatus>,
}

impl SwipeSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            deck: Vec::new(),
            cursor: 0,
            in_flight: false,
            extending: false,
            limit_prompt: false,
            quota: None,
        }
    }

    /// Correlation id carried in every log line this session emits.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    // -- deck and cursor ------------------------------------------------------

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    /// Full deck in display order, for rendering the card stack.
    pub fn deck(&self) -> &[DeckItem] {
        &self.deck
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The card currently facing the user, if the deck is not exhausted.
    pub fn current(&self) -> Option<&DeckItem> {
        self.deck.get(self.cursor)
    }

    /// Cards at or after the cursor, i.e. not yet swiped.
    pub fn remaining_ahead(&self) -> usize {
        self.deck.len().saturating_sub(self.cursor)
    }

    /// Replace the deck wholesale and reset the cursor. Used for the
    /// initial load; a reset also dismisses any stale limit prompt.
    pub fn load_deck(&mut self, items: Vec<DeckItem>) {
        self.deck = items;
        self.cursor = 0;
        self.limit_prompt = false;
    }

    /// Append freshly hydrated cards, re-basing their positions to run
    /// on from the current deck end.
    pub fn append_items(&mut self, items: Vec<DeckItem>) {
        let base = self.deck.len();
        self.deck.extend(items.into_iter().enumerate().map(|(offset, mut item)| {
            item.position = base + offset;
            item
        }));
    }

    /// Ids of every card in the deck, swiped or not. Extension fetches
    /// filter against this so a card cannot appear twice in one session.
    pub fn deck_ids(&self) -> Vec<i64> {
        self.deck.iter().map(|item| item.drama_id).collect()
    }

    /// Optimistically advance past the current card. Returns the cursor
    /// as it was before, for a possible rollback.
    pub fn advance(&mut self) -> usize {
        let previous = self.cursor;
        self.cursor += 1;
        previous
    }

    /// Undo an optimistic advance after an authoritative denial.
    pub fn rollback_to(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    // -- quota snapshot -------------------------------------------------------

    /// Record the latest server-reported quota state. A snapshot that
    /// allows swiping again dismisses the limit prompt.
    pub fn record_quota(&mut self, status: QuotaStatus) {
        if status.can_swipe {
            self.limit_prompt = false;
        }
        self.quota = Some(status);
    }

    pub fn quota(&self) -> Option<&QuotaStatus> {
        self.quota.as_ref()
    }

    /// Entry-guard view of the snapshot. No snapshot means no known
    /// reason to block; the server stays authoritative at settle time.
    pub fn can_swipe(&self) -> bool {
        self.quota.as_ref().map(|q| q.can_swipe).unwrap_or(true)
    }

    // -- flags ----------------------------------------------------------------

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn set_in_flight(&mut self, in_flight: bool) {
        self.in_flight = in_flight;
    }

    pub fn extending(&self) -> bool {
        self.extending
    }

    pub fn set_extending(&mut self, extending: bool) {
        self.extending = extending;
    }

    pub fn limit_prompt_shown(&self) -> bool {
        self.limit_prompt
    }

    pub fn show_limit_prompt(&mut self) {
        self.limit_prompt = true;
    }
}

impl Default for SwipeSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(drama_id: i64, position: usize) -> DeckItem {
        DeckItem {
            position,
            drama_id,
            title: format!("Title {drama_id}"),
            poster_path: None,
            first_air_date: None,
            rating: None,
            episode_count: None,
        }
    }

    fn session_with(ids: &[i64]) -> SwipeSession {
        let mut session = SwipeSession::new();
        session.load_deck(
            ids.iter()
                .enumerate()
                .map(|(position, id)| card(*id, position))
                .collect(),
        );
        session
    }

    #[test]
    fn advance_and_rollback_restore_the_same_card() {
        let mut session = session_with(&[10, 11, 12]);
        assert_eq!(session.current().unwrap().drama_id, 10);

        let previous = session.advance();
        assert_eq!(session.current().unwrap().drama_id, 11);

        session.rollback_to(previous);
        assert_eq!(session.current().unwrap().drama_id, 10);
    }

    #[test]
    fn cursor_past_end_means_exhausted() {
        let mut session = session_with(&[10]);
        session.advance();
        assert!(session.current().is_none());
        assert_eq!(session.remaining_ahead(), 0);
    }

    #[test]
    fn remaining_ahead_counts_unswiped_cards() {
        let mut session = session_with(&[10, 11, 12, 13]);
        assert_eq!(session.remaining_ahead(), 4);
        session.advance();
        session.advance();
        assert_eq!(session.remaining_ahead(), 2);
    }

    #[test]
    fn append_rebases_positions_after_existing_deck() {
        let mut session = session_with(&[10, 11]);
        session.append_items(vec![card(20, 0), card(21, 1)]);

        let positions: Vec<usize> = session.deck().iter().map(|item| item.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
        assert_eq!(session.deck_len(), 4);

        // The appended cards took positions 2 and 3.
        session.advance();
        session.advance();
        assert_eq!(session.current().unwrap().drama_id, 20);
        assert_eq!(session.current().unwrap().position, 2);
    }

    #[test]
    fn unknown_quota_is_permissive() {
        let session = SwipeSession::new();
        assert!(session.can_swipe());
    }

    #[test]
    fn exhausted_snapshot_blocks_and_a_fresh_one_unblocks() {
        let mut session = session_with(&[10]);
        session.record_quota(QuotaStatus::from_counts(20, 20, false));
        assert!(!session.can_swipe());

        session.show_limit_prompt();
        assert!(session.limit_prompt_shown());

        // Next-day (or post-upgrade) snapshot clears the prompt.
        session.record_quota(QuotaStatus::from_counts(0, 20, false));
        assert!(session.can_swipe());
        assert!(!session.limit_prompt_shown());
    }
}
