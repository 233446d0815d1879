//! Location search session.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::Coordinates;
use crate::geocode::{AddressSuggestion, GeocodeError, SuggestionProvider};

use super::config::SearchConfig;

/// Observable state of one location input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchView {
    /// Current input text
    pub text: String,

    /// Suggestions for the latest issued query
    pub suggestions: Vec<AddressSuggestion>,

    /// Whether the suggestion dropdown is shown
    pub dropdown_open: bool,

    /// Whether the text is a resolved selection
    pub selected: bool,

    /// Generation of the latest keystroke or selection whose outcome is
    /// reflected here
    pub settled: u64,
}

/// Debounce and staleness bookkeeping for one input.
#[derive(Debug, Default)]
struct SearchSession {
    /// Timer (and lookup) scheduled by the latest keystroke, if any.
    pending: Option<JoinHandle<()>>,

    /// Bumped on every keystroke and selection. A lookup result is applied
    /// only if the generation it was issued under is still current.
    generation: u64,
}

impl SearchSession {
    /// Start a new generation, cancelling whatever was pending.
    fn advance(&mut self) -> u64 {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.generation += 1;
        self.generation
    }
}

struct Shared {
    session: Mutex<SearchSession>,
    view: watch::Sender<SearchView>,
}

impl Shared {
    fn session(&self) -> MutexGuard<'_, SearchSession> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn apply_suggestions(&self, generation: u64, suggestions: Vec<AddressSuggestion>) {
        let mut session = self.session();

        if session.generation != generation {
            debug!(
                generation,
                current = session.generation,
                "discarding stale suggestions"
            );
            return;
        }
        session.pending = None;

        self.view.send_modify(|view| {
            view.settled = generation;
            view.dropdown_open = !suggestions.is_empty();
            view.suggestions = suggestions;
        });
    }
}

/// Location search for a single input field.
///
/// Must be used from within a Tokio runtime: [`on_input_changed`] spawns
/// the debounce timer as a task.
///
/// [`on_input_changed`]: LocationSearch::on_input_changed
pub struct LocationSearch<P> {
    provider: Arc<P>,
    config: SearchConfig,
    shared: Arc<Shared>,
}

impl<P: SuggestionProvider + 'static> LocationSearch<P> {
    /// Create a search over the given provider.
    pub fn new(provider: Arc<P>, config: SearchConfig) -> Self {
        let (view, _) = watch::channel(SearchView::default());

        Self {
            provider,
            config,
            shared: Arc::new(Shared {
                session: Mutex::new(SearchSession::default()),
                view,
            }),
        }
    }

    /// Subscribe to view updates.
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.shared.view.subscribe()
    }

    /// Snapshot of the current view.
    pub fn view(&self) -> SearchView {
        self.shared.view.borrow().clone()
    }

    /// Debounce and minimum-length settings.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Suggestions currently in the view.
    pub fn suggestions(&self) -> Vec<AddressSuggestion> {
        self.shared.view.borrow().suggestions.clone()
    }

    /// Whether the input holds a resolved selection.
    pub fn is_selected(&self) -> bool {
        self.shared.view.borrow().selected
    }

    /// Wait until the view reflects `generation` or a later one.
    ///
    /// Returns immediately if that outcome has already been applied.
    pub async fn settled(&self, generation: u64) -> SearchView {
        let mut rx = self.subscribe();
        match rx.wait_for(|view| view.settled >= generation).await {
            Ok(view) => view.clone(),
            // The sender lives in `self`
            Err(_) => self.view(),
        }
    }

    /// Handle an edit to the input text.
    ///
    /// Clears the selected flag and restarts the debounce timer. Input
    /// shorter than the minimum length clears the suggestions immediately
    /// and schedules nothing. Returns the generation this edit started,
    /// for use with [`settled`](LocationSearch::settled).
    pub fn on_input_changed(&self, text: &str) -> u64 {
        let mut session = self.shared.session();
        let generation = session.advance();
        let searchable = self.config.is_searchable(text);

        self.shared.view.send_modify(|view| {
            view.text = text.to_string();
            view.selected = false;
            if !searchable {
                view.suggestions.clear();
                view.dropdown_open = false;
                view.settled = generation;
            }
        });

        if !searchable {
            return generation;
        }

        let provider = Arc::clone(&self.provider);
        let shared = Arc::clone(&self.shared);
        let delay = self.config.debounce();
        let query = text.to_string();

        debug!(generation, query = %query, "scheduling suggestion lookup");

        session.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let suggestions = match provider.suggest(&query).await {
                Ok(suggestions) => suggestions,
                Err(e) => {
                    warn!(query = %query, error = %e, "suggestion lookup failed");
                    Vec::new()
                }
            };

            shared.apply_suggestions(generation, suggestions);
        }));

        generation
    }

    /// Handle the user picking a suggestion.
    ///
    /// Cancels any pending lookup, resolves the suggestion, then marks the
    /// input as selected with the suggestion's address as its text. Returns
    /// [`GeocodeError::Superseded`] if the input was edited while the
    /// suggestion was being resolved.
    pub async fn on_suggestion_selected(
        &self,
        suggestion: &AddressSuggestion,
    ) -> Result<Coordinates, GeocodeError> {
        let generation = self.shared.session().advance();

        let resolved = self.provider.resolve(suggestion).await;

        let session = self.shared.session();
        if session.generation != generation {
            return Err(GeocodeError::Superseded);
        }

        self.shared.view.send_modify(|view| {
            view.settled = generation;
            if resolved.is_ok() {
                view.text = suggestion.display_name.clone();
                view.selected = true;
                view.suggestions.clear();
                view.dropdown_open = false;
            }
        });
        drop(session);

        resolved
    }

    /// Reopen the dropdown when the input regains focus.
    pub fn focus(&self) {
        self.shared.view.send_if_modified(|view| {
            let open = !view.suggestions.is_empty();
            let changed = view.dropdown_open != open;
            view.dropdown_open = open;
            changed
        });
    }

    /// Close the dropdown without discarding suggestions.
    pub fn dismiss(&self) {
        self.shared.view.send_if_modified(|view| {
            let changed = view.dropdown_open;
            view.dropdown_open = false;
            changed
        });
    }
}

impl<P> Drop for LocationSearch<P> {
    fn drop(&mut self) {
        let mut session = self.shared.session.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pending) = session.pending.take() {
            pending.abort();
        }
    }
}
