//! The Omnibar widget: input events in, navigation state out.
//!
//! The widget owns the only mutable state. Debounce timers and extension
//! work run on spawned tasks and report back through one channel; every
//! report is applied here, one at a time, so the sequence checks below
//! never race.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::Settings;
use crate::core::search::Aggregator;
use crate::core::state::{NavEvent, NavigationState, Phase};
use crate::core::viewport::{Row, Viewport};
use crate::debounce::Debouncer;
use crate::error::{log_only, ConfigError, ErrorHook, OmnibarError};
use crate::executor::{Action, ActionDispatcher, DispatchOutcome, Linkable, OpenUrl};
use crate::extension::Extension;

/// Keys the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Other,
}

/// Events surfaced by the host's input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Changed(String),
    Key(Key),
    Focus,
    Blur,
}

/// What happened to a settled aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Results replaced the panel contents
    Applied,
    /// The aggregation found nothing; the panel was left alone
    Empty,
    /// A newer query was dispatched (or the input cleared) first
    Stale,
    /// Nothing was waiting to settle
    Idle,
}

enum Update<T> {
    /// The debounce delay elapsed for input generation `input`
    Fired { input: u64, query: String },
    /// Aggregation `seq` finished
    Settled { seq: u64, results: Vec<T> },
}

pub struct Omnibar<T> {
    state: NavigationState<T>,
    viewport: Viewport,
    aggregator: Arc<Aggregator<T>>,
    dispatcher: ActionDispatcher<T>,
    debouncer: Debouncer<(u64, String)>,
    updates_tx: mpsc::UnboundedSender<Update<T>>,
    updates_rx: mpsc::UnboundedReceiver<Update<T>>,
    // Bumped on every text change; a debounce firing for an older
    // generation is dropped.
    input_generation: u64,
    // Sequence of the latest dispatched aggregation. Only that one may
    // update the state.
    dispatched: u64,
    awaiting: Option<u64>,
    // A debounce for the current generation has not reached `process` yet.
    firing: bool,
    // Dispatched aggregations, stale ones included, that have not settled.
    in_flight: usize,
}

impl<T: Send + 'static> Omnibar<T> {
    pub fn builder() -> OmnibarBuilder<T> {
        OmnibarBuilder::default()
    }

    pub fn state(&self) -> &NavigationState<T> {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        if self.firing || self.awaiting.is_some() {
            Phase::Pending
        } else {
            self.state.phase()
        }
    }

    /// Rows the host should draw, limited to the viewport.
    pub fn rows(&self) -> Vec<Row<'_, T>> {
        self.viewport.rows(&self.state)
    }

    /// Apply one input event. Returns the dispatch outcome for Enter.
    pub fn handle(&mut self, event: InputEvent) -> Option<DispatchOutcome> {
        match event {
            InputEvent::Changed(text) => {
                self.on_text(text);
                None
            }
            InputEvent::Key(Key::Up) => {
                self.transition(NavEvent::SelectPrevious);
                None
            }
            InputEvent::Key(Key::Down) => {
                self.transition(NavEvent::SelectNext);
                None
            }
            InputEvent::Key(Key::Enter) => Some(self.dispatcher.dispatch(self.state.selected())),
            InputEvent::Key(Key::Other) => None,
            InputEvent::Focus => {
                self.transition(NavEvent::Focus);
                None
            }
            InputEvent::Blur => {
                self.transition(NavEvent::Blur);
                None
            }
        }
    }

    fn on_text(&mut self, text: String) {
        if text.is_empty() {
            // Synchronous reset: nothing queued or in flight may repopulate it.
            self.debouncer.cancel();
            self.input_generation += 1;
            self.dispatched += 1;
            self.awaiting = None;
            self.firing = false;
            self.transition(NavEvent::QueryCleared);
            return;
        }

        if self.aggregator.is_empty() {
            return;
        }

        self.input_generation += 1;
        self.firing = true;
        self.debouncer.call((self.input_generation, text));
    }

    fn transition(&mut self, event: NavEvent<T>) {
        self.state = self.state.reduce(event);
        self.viewport = self
            .viewport
            .follow(self.state.selected_index(), self.state.results().len());
        tracing::trace!(
            phase = ?self.state.phase(),
            selected = self.state.selected_index(),
            results = self.state.results().len(),
            "navigation state"
        );
    }

    fn dispatch(&mut self, query: String) {
        self.dispatched += 1;
        let seq = self.dispatched;
        self.awaiting = Some(seq);
        self.in_flight += 1;
        tracing::debug!(seq, query = %query, "dispatching aggregation");

        let aggregator = Arc::clone(&self.aggregator);
        let tx = self.updates_tx.clone();
        tokio::spawn(async move {
            let results = aggregator.search(&query).await;
            let _ = tx.send(Update::Settled { seq, results });
        });
    }

    fn settle(&mut self, seq: u64, results: Vec<T>) -> SettleOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        if seq != self.dispatched {
            tracing::debug!(seq, latest = self.dispatched, "discarding stale aggregation");
            return SettleOutcome::Stale;
        }

        self.awaiting = None;
        if results.is_empty() {
            return SettleOutcome::Empty;
        }
        self.transition(NavEvent::ResultsSettled(results));
        SettleOutcome::Applied
    }

    fn process(&mut self, update: Update<T>) -> Option<SettleOutcome> {
        match update {
            Update::Fired { input, query } => {
                if input == self.input_generation {
                    self.firing = false;
                    self.dispatch(query);
                }
                None
            }
            Update::Settled { seq, results } => Some(self.settle(seq, results)),
        }
    }

    /// Wait for the next aggregation to settle and apply it.
    ///
    /// Debounce firings seen on the way are dispatched. Returns
    /// [`SettleOutcome::Idle`] right away when no debounce is waiting and
    /// no aggregation is running.
    pub async fn next_settled(&mut self) -> SettleOutcome {
        loop {
            if !self.firing && self.in_flight == 0 {
                return SettleOutcome::Idle;
            }
            let Some(update) = self.updates_rx.recv().await else {
                return SettleOutcome::Idle;
            };
            if let Some(outcome) = self.process(update) {
                return outcome;
            }
        }
    }

    /// Apply everything that has already arrived, without waiting.
    /// Returns the settle outcomes in arrival order.
    pub fn drain(&mut self) -> Vec<SettleOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(update) = self.updates_rx.try_recv() {
            outcomes.extend(self.process(update));
        }
        outcomes
    }

    /// Drive the widget until the host closes `events`.
    ///
    /// `on_render` runs after every input event and every applied
    /// aggregation.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<InputEvent>,
        mut on_render: impl FnMut(&Self, Option<DispatchOutcome>),
    ) {
        loop {
            tokio::select! {
                event = events.recv() => {
                    let Some(event) = event else { break };
                    let outcome = self.handle(event);
                    on_render(&self, outcome);
                }
                Some(update) = self.updates_rx.recv() => {
                    if self.process(update) == Some(SettleOutcome::Applied) {
                        on_render(&self, None);
                    }
                }
            }
        }
        tracing::debug!("input closed, omnibar stopped");
    }
}

/// Collects the widget configuration. Everything is validated in
/// `build`, and the action is resolved there once.
pub struct OmnibarBuilder<T> {
    extensions: Vec<Arc<dyn Extension<T>>>,
    settings: Settings,
    on_action: Option<Arc<dyn Action<T>>>,
    on_error: Option<ErrorHook>,
}

impl<T> Default for OmnibarBuilder<T> {
    fn default() -> Self {
        Self {
            extensions: Vec::new(),
            settings: Settings::default(),
            on_action: None,
            on_error: None,
        }
    }
}

impl<T: Send + 'static> OmnibarBuilder<T> {
    /// Add an extension. Merge order follows the order of these calls.
    pub fn extension(mut self, extension: impl Extension<T> + 'static) -> Self {
        self.extensions.push(Arc::new(extension));
        self
    }

    pub fn extensions(
        mut self,
        extensions: impl IntoIterator<Item = Arc<dyn Extension<T>>>,
    ) -> Self {
        self.extensions.extend(extensions);
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.settings.max_results = Some(max_results);
        self
    }

    pub fn max_viewable_results(mut self, rows: usize) -> Self {
        self.settings.max_viewable_results = Some(rows);
        self
    }

    pub fn input_delay_ms(mut self, delay_ms: i64) -> Self {
        self.settings.input_delay_ms = delay_ms;
        self
    }

    /// Replace the default action.
    pub fn on_action(mut self, action: impl Action<T> + 'static) -> Self {
        self.on_action = Some(Arc::new(action));
        self
    }

    /// Receive every recovered failure.
    pub fn on_error(mut self, hook: impl Fn(&OmnibarError) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    /// Build with [`OpenUrl`] as the action unless one was configured.
    pub fn build(mut self) -> Result<Omnibar<T>, ConfigError>
    where
        T: Linkable,
    {
        let action = self
            .on_action
            .take()
            .unwrap_or_else(|| Arc::new(OpenUrl::default()));
        self.finish(action)
    }

    /// Build for items without a URL, with `action` as the action.
    pub fn build_with_action(
        self,
        action: impl Action<T> + 'static,
    ) -> Result<Omnibar<T>, ConfigError> {
        self.finish(Arc::new(action))
    }

    fn finish(self, action: Arc<dyn Action<T>>) -> Result<Omnibar<T>, ConfigError> {
        self.settings.validate()?;

        let on_error = self.on_error.unwrap_or_else(log_only);
        let aggregator = Aggregator::new(
            self.extensions,
            self.settings.max_results,
            Arc::clone(&on_error),
        );
        let dispatcher = ActionDispatcher::new(action, on_error);

        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        let fired_tx = updates_tx.clone();
        let debouncer = Debouncer::new(
            self.settings.input_delay(),
            move |(input, query): (u64, String)| {
                let _ = fired_tx.send(Update::Fired { input, query });
            },
        );

        tracing::debug!(
            extensions = aggregator.len(),
            max_results = ?self.settings.max_results,
            delay_ms = self.settings.input_delay_ms,
            "omnibar ready"
        );

        Ok(Omnibar {
            state: NavigationState::default(),
            viewport: Viewport::new(self.settings.max_viewable_results),
            aggregator: Arc::new(aggregator),
            dispatcher,
            debouncer,
            updates_tx,
            updates_rx,
            input_generation: 0,
            dispatched: 0,
            awaiting: None,
            firing: false,
            in_flight: 0,
        })
    }
}
