use crate::core::{DinnerError, SearchResult};
use crate::engine::MatchEngine;
use crate::query::QueryDescriptor;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// What the terminal should currently show. Exactly one state is visible at
/// a time; a new descriptor always reports `Loading` for its own duration,
/// a previous result is never mixed in while a different fetch is pending.
#[derive(Debug, Clone)]
pub enum View {
    Idle,
    Loading,
    Success(SearchResult),
    Error(String),
}

/// Resolution of one spawned fetch, delivered back to the owning task over
/// the session's outcome channel and applied there only.
pub struct FetchOutcome {
    descriptor: QueryDescriptor,
    result: Result<SearchResult, DinnerError>,
}

/// Orchestrates one logical search: the active term sequence, the current
/// page, and the lifecycle of every descriptor fetched on their behalf.
///
/// Fetches run as spawned tasks; everything else is single-writer. Each
/// request bumps a monotone sequence number, and an arriving outcome is
/// shown only if its descriptor still carries the highest number issued, so
/// a superseded fetch that resolves late can never overwrite a newer view.
/// At most one network call is in flight per distinct descriptor: a repeat
/// trigger re-tags the pending entry instead of fetching again, and a
/// descriptor already resolved this session is served straight from cache.
pub struct SearchSession {
    engine: Arc<dyn MatchEngine>,
    outcome_tx: UnboundedSender<FetchOutcome>,
    terms: Vec<String>,
    page: u32,
    seq: u64,
    view: View,
    total_pages: Option<u32>,
    cache: HashMap<QueryDescriptor, SearchResult>,
    in_flight: HashMap<QueryDescriptor, u64>,
}

impl SearchSession {
    pub fn new(engine: Arc<dyn MatchEngine>, outcome_tx: UnboundedSender<FetchOutcome>) -> Self {
        Self {
            engine,
            outcome_tx,
            terms: Vec::new(),
            page: 1,
            seq: 0,
            view: View::Idle,
            total_pages: None,
            cache: HashMap::new(),
            in_flight: HashMap::new(),
        }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, View::Loading)
    }

    /// Replaces the active term sequence. Always returns to page 1. An empty
    /// sequence means no search is active: nothing is fetched and the view
    /// goes idle.
    pub fn set_terms(&mut self, terms: Vec<String>) {
        self.terms = terms;
        self.page = 1;
        self.total_pages = None;

        if self.terms.is_empty() {
            // Bump past any outstanding fetches so their resolutions are
            // cached but never displayed.
            self.seq += 1;
            self.view = View::Idle;
        } else {
            self.request();
        }
    }

    /// Moves to another page of the current terms. Pages are clamped to the
    /// bounds the engine reported for this term set, once known.
    pub fn set_page(&mut self, page: u32) -> Result<(), DinnerError> {
        if self.terms.is_empty() {
            return Err(DinnerError::EmptySearch);
        }

        let mut page = page.max(1);
        if let Some(total) = self.total_pages {
            page = page.min(total);
        }
        self.page = page;
        self.request();
        Ok(())
    }

    fn request(&mut self) {
        let descriptor = QueryDescriptor::build(&self.terms, self.page);
        self.seq += 1;

        if let Some(result) = self.cache.get(&descriptor) {
            self.total_pages = Some(result.total_pages);
            self.view = View::Success(result.clone());
            return;
        }

        self.view = View::Loading;

        if self.in_flight.contains_key(&descriptor) {
            // Identical fetch already running: adopt it for the new request
            // instead of issuing a second network call.
            self.in_flight.insert(descriptor, self.seq);
            return;
        }
        self.in_flight.insert(descriptor.clone(), self.seq);

        let engine = self.engine.clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = engine.search(&descriptor).await;
            let _ = tx.send(FetchOutcome { descriptor, result });
        });
    }

    /// Applies a resolved fetch. Returns true when the visible view changed.
    pub fn apply(&mut self, outcome: FetchOutcome) -> bool {
        let Some(issued) = self.in_flight.remove(&outcome.descriptor) else {
            return false;
        };

        if let Ok(result) = &outcome.result {
            self.cache.insert(outcome.descriptor.clone(), result.clone());
        }

        if issued != self.seq {
            // A newer descriptor was requested while this one was in
            // flight; keep the cached result but leave the view alone.
            return false;
        }

        match outcome.result {
            Ok(result) => {
                self.total_pages = Some(result.total_pages);
                self.view = View::Success(result);
            }
            Err(e) => self.view = View::Error(e.to_string()),
        }
        true
    }
}
