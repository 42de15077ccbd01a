//! Swipe orchestration: optimistic UI, authoritative server.
//!
//! A swipe advances the cursor immediately and settles in the
//! background: the quota service is asked to consume one swipe, and
//! only an authoritative denial rolls the cursor back (with the limit
//! prompt shown). Side effects of a granted swipe -- the watchlist
//! write or the skip record -- are fire-and-logged, never rolled back.
//!
//! Re-entry is guarded: while a swipe settles, further gestures bounce
//! off [`SwipeRejection::Busy`], and the guard holds for a short settle
//! delay after completion to absorb double-taps. When the deck runs
//! low the orchestrator tops it up from the candidate endpoint, one
//! extension at a time.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use dorama_core::discovery::DEFAULT_DECK_LIMIT;
use dorama_core::quota::{QuotaStatus, SwipeOutcome};
use dorama_core::types::DramaId;

use crate::backend::{SwipeBackend, WatchlistAdd};
use crate::config::DeckConfig;
use crate::hydrator::{DeckHydrator, DetailSource};
use crate::item::DeckItem;
use crate::session::SwipeSession;

/// Gesture meaning: right keeps the title, left suppresses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Right swipe: record the title into the user's watchlist.
    Accept,
    /// Left swipe: suppress the title from future decks.
    Skip,
}

/// Why a swipe gesture was rejected at entry, before any state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeRejection {
    /// A previous swipe is still settling.
    Busy,
    /// No card under the cursor.
    DeckExhausted,
    /// The last known quota snapshot reports the daily limit reached.
    LimitReached,
    /// The session was torn down.
    SessionClosed,
}

/// How a swipe's background settling concluded.
#[derive(Debug)]
pub enum SettleOutcome {
    /// The swipe stood. `quota` carries the server's post-consume
    /// counters, or `None` when the quota service was unreachable and
    /// the optimistic advance was kept.
    Committed { quota: Option<SwipeOutcome> },
    /// The quota service denied the swipe: the cursor was rolled back
    /// and the limit prompt shown.
    Denied { status: QuotaStatus },
    /// The session was torn down before settling finished. State is
    /// left exactly as the optimistic advance put it.
    Abandoned,
}

/// Drives one discovery session. Cheaply cloneable; clones share the
/// session state and cancellation token.
#[derive(Clone)]
pub struct SwipeOrchestrator {
    session: Arc<Mutex<SwipeSession>>,
    backend: Arc<dyn SwipeBackend>,
    hydrator: Arc<DeckHydrator>,
    config: DeckConfig,
    cancel: CancellationToken,
}

impl SwipeOrchestrator {
    pub fn new(
        backend: Arc<dyn SwipeBackend>,
        source: Arc<dyn DetailSource>,
        config: DeckConfig,
    ) -> Self {
        let hydrator = Arc::new(DeckHydrator::new(source, config.clone()));
        Self::with_hydrator(backend, hydrator, config)
    }

    /// Build over an existing hydrator, so successive sessions share
    /// its detail cache.
    pub fn with_hydrator(
        backend: Arc<dyn SwipeBackend>,
        hydrator: Arc<DeckHydrator>,
        config: DeckConfig,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(SwipeSession::new())),
            backend,
            hydrator,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Load the initial deck and quota snapshot. Returns the number of
    /// cards dealt; zero means the UI should offer a retry screen.
    pub async fn start(&self) -> usize {
        let session_id = self.session.lock().await.session_id();

        match self.backend.quota_status().await {
            Ok(status) => self.session.lock().await.record_quota(status),
            Err(error) => {
                tracing::warn!(%session_id, error = %error, "Quota snapshot unavailable, starting permissive");
            }
        }

        let candidate_ids = match self.backend.fetch_candidates(DEFAULT_DECK_LIMIT).await {
            Ok(ids) => ids,
            Err(error) => {
                tracing::error!(%session_id, error = %error, "Candidate fetch failed, deck starts empty");
                Vec::new()
            }
        };

        let items = self.hydrator.hydrate(&candidate_ids).await;
        let mut session = self.session.lock().await;
        session.load_deck(items);
        tracing::info!(%session_id, deck_len = session.deck_len(), "Deck loaded");
        session.deck_len()
    }

    /// Handle one swipe gesture.
    ///
    /// On acceptance the cursor has already advanced when this returns;
    /// the handle resolves once background settling (and the settle
    /// delay holding the re-entry guard) completes. Callers that do not
    /// care about the outcome may drop the handle.
    pub async fn swipe(
        &self,
        direction: SwipeDirection,
    ) -> Result<JoinHandle<SettleOutcome>, SwipeRejection> {
        if self.cancel.is_cancelled() {
            return Err(SwipeRejection::SessionClosed);
        }

        let (session_id, previous_cursor, item) = {
            let mut session = self.session.lock().await;
            if session.in_flight() {
                return Err(SwipeRejection::Busy);
            }
            let Some(item) = session.current().cloned() else {
                return Err(SwipeRejection::DeckExhausted);
            };
            if !session.can_swipe() {
                session.show_limit_prompt();
                return Err(SwipeRejection::LimitReached);
            }

            // Optimistic: the card leaves the screen now, the server
            // catches up in the background.
            session.set_in_flight(true);
            let previous_cursor = session.advance();
            (session.session_id(), previous_cursor, item)
        };

        tracing::debug!(%session_id, drama_id = item.drama_id, ?direction, "Swipe accepted, settling");

        let this = self.clone();
        let handle = tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = this.cancel.cancelled() => SettleOutcome::Abandoned,
                outcome = this.settle(session_id, direction, previous_cursor, &item) => outcome,
            };

            if matches!(outcome, SettleOutcome::Abandoned) {
                // Torn down: no rollback, no guard bookkeeping.
                return outcome;
            }

            // Hold the re-entry guard briefly past completion so a
            // double-tap cannot burn two swipes.
            tokio::time::sleep(this.config.settle_delay).await;
            this.session.lock().await.set_in_flight(false);
            outcome
        });

        Ok(handle)
    }

    /// Cancel background settling and deck extension. Called when the
    /// discovery screen unmounts; in-flight work is discarded without
    /// rollback.
    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    // -- session views --------------------------------------------------------

    pub async fn session_id(&self) -> Uuid {
        self.session.lock().await.session_id()
    }

    pub async fn deck_len(&self) -> usize {
        self.session.lock().await.deck_len()
    }

    pub async fn cursor(&self) -> usize {
        self.session.lock().await.cursor()
    }

    /// The card currently facing the user.
    pub async fn current_card(&self) -> Option<DeckItem> {
        self.session.lock().await.current().cloned()
    }

    pub async fn quota_snapshot(&self) -> Option<QuotaStatus> {
        self.session.lock().await.quota().cloned()
    }

    pub async fn limit_prompt_shown(&self) -> bool {
        self.session.lock().await.limit_prompt_shown()
    }

    // -- settling -------------------------------------------------------------

    /// Settle one optimistic swipe against the server.
    async fn settle(
        &self,
        session_id: Uuid,
        direction: SwipeDirection,
        previous_cursor: usize,
        item: &DeckItem,
    ) -> SettleOutcome {
        let quota = match self.backend.consume_swipe().await {
            Ok(outcome) if !outcome.success => {
                tracing::info!(
                    %session_id,
                    drama_id = item.drama_id,
                    swipes_used = outcome.swipes_used,
                    "Swipe denied by quota service, rolling back",
                );
                let status = outcome.to_status();
                let mut session = self.session.lock().await;
                session.rollback_to(previous_cursor);
                session.record_quota(status.clone());
                session.show_limit_prompt();
                return SettleOutcome::Denied { status };
            }
            Ok(outcome) => {
                self.session.lock().await.record_quota(outcome.to_status());
                Some(outcome)
            }
            Err(error) => {
                // Quota service unreachable. Keep the optimistic swipe;
                // availability wins over strict counting here, same as
                // the server's own posture toward its store.
                tracing::warn!(
                    %session_id,
                    drama_id = item.drama_id,
                    error = %error,
                    "Quota consume unreachable, keeping optimistic swipe",
                );
                None
            }
        };

        // Side effect of the gesture. Failures are logged with full
        // context and never roll the swipe back.
        match direction {
            SwipeDirection::Accept => {
                let entry = WatchlistAdd::from_item(item);
                if let Err(error) = self.backend.add_to_watchlist(&entry).await {
                    tracing::error!(
                        %session_id,
                        drama_id = item.drama_id,
                        error = %error,
                        "Watchlist write failed after granted swipe",
                    );
                }
            }
            SwipeDirection::Skip => {
                if let Err(error) = self.backend.record_skip(item.drama_id).await {
                    tracing::error!(
                        %session_id,
                        drama_id = item.drama_id,
                        error = %error,
                        "Skip record failed after granted swipe",
                    );
                }
            }
        }

        self.maybe_extend().await;

        SettleOutcome::Committed { quota }
    }

    // -- deck extension -------------------------------------------------------

    /// Kick off a background deck extension when the cursor is within
    /// the refetch threshold of the deck end. The `extending` flag
    /// debounces: repeated swipes near the end trigger one fetch, not
    /// one per swipe.
    async fn maybe_extend(&self) {
        {
            let mut session = self.session.lock().await;
            if session.extending() || session.remaining_ahead() > self.config.refetch_threshold {
                return;
            }
            session.set_extending(true);
        }

        let this = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = this.cancel.cancelled() => {} // torn down, discard the refresh
                _ = this.extend_deck() => {}
            }
            this.session.lock().await.set_extending(false);
        });
    }

    async fn extend_deck(&self) {
        let (session_id, dealt) = {
            let session = self.session.lock().await;
            (session.session_id(), session.deck_ids())
        };

        let candidate_ids = match self.backend.fetch_candidates(DEFAULT_DECK_LIMIT).await {
            Ok(ids) => ids,
            Err(error) => {
                tracing::warn!(%session_id, error = %error, "Deck extension fetch failed, keeping current deck");
                return;
            }
        };

        // Unswiped cards are invisible to the server-side exclusion set,
        // so the same title can come back in an extension fetch. Filter
        // against everything already dealt this session.
        let dealt: HashSet<DramaId> = dealt.into_iter().collect();
        let fresh: Vec<DramaId> = candidate_ids
            .into_iter()
            .filter(|id| !dealt.contains(id))
            .collect();
        if fresh.is_empty() {
            tracing::debug!(%session_id, "Deck extension produced no new cards");
            return;
        }

        let items = self.hydrator.hydrate(&fresh).await;
        let added = items.len();
        self.session.lock().await.append_items(items);
        tracing::debug!(%session_id, added, "Deck extended");
    }
}
