//! Reference host for the funnel.
//!
//! Executes effects against the visitor store, registration client and
//! conversion tracker, and keeps pending timers on a virtual clock so hosts
//! (and tests) decide how time advances.

use crate::auth::RegistrationClient;
use crate::config::FunnelConfig;
use crate::content::ContentProvider;
use crate::funnel::{Effect, Funnel, FunnelSnapshot, HostEffect, Message};
use crate::liveness::LivenessToken;
use crate::timers::{TimerCommand, TimerToken};
use crate::tracking::{ConversionTracker, NullTracker};
use crate::translation::Translator;
use crate::visitor::{VisitorContext, VisitorStore};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::mpsc::Receiver;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Upper bound on timer fires for a single `run_until_idle`.
const MAX_IDLE_FIRES: usize = 1_000;

type Deadline = (Duration, u64);

pub struct FunnelRuntime {
    funnel: Funnel,
    now: Duration,
    seq: u64,
    queue: BTreeMap<Deadline, TimerToken>,
    deadlines: HashMap<TimerToken, Deadline>,
    store: Box<dyn VisitorStore>,
    store_updates: Receiver<VisitorContext>,
    registration: Box<dyn RegistrationClient>,
    tracker: Box<dyn ConversionTracker>,
    host_effects: Vec<HostEffect>,
}

impl FunnelRuntime {
    pub fn new(
        config: FunnelConfig,
        content: Box<dyn ContentProvider>,
        translator: Box<dyn Translator>,
        mut store: Box<dyn VisitorStore>,
        registration: Box<dyn RegistrationClient>,
        tracker: Box<dyn ConversionTracker>,
    ) -> Self {
        let visitor = store.load();
        let store_updates = store.subscribe();
        let tracker: Box<dyn ConversionTracker> = if config.tracking_enabled {
            tracker
        } else {
            debug!("Conversion tracking disabled");
            Box::new(NullTracker)
        };
        Self {
            funnel: Funnel::new(config, &visitor, content, translator),
            now: Duration::ZERO,
            seq: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
            store,
            store_updates,
            registration,
            tracker,
            host_effects: Vec::new(),
        }
    }

    pub fn with_liveness(mut self, liveness: LivenessToken) -> Self {
        self.funnel = self.funnel.with_liveness(liveness);
        self
    }

    pub fn funnel(&self) -> &Funnel {
        &self.funnel
    }

    pub fn snapshot(&self) -> FunnelSnapshot {
        self.funnel.snapshot()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn is_alive(&self) -> bool {
        self.funnel.liveness().is_alive()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Time left until the earliest pending timer, if any.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_deadline()
            .map(|deadline| deadline.saturating_sub(self.now))
    }

    pub fn pending_timers(&self) -> usize {
        self.queue.len()
    }

    pub fn take_host_effects(&mut self) -> Vec<HostEffect> {
        std::mem::take(&mut self.host_effects)
    }

    pub fn dispatch(&mut self, message: Message) {
        self.sync_visitor();
        self.process(message);
    }

    /// Feed queued store notifications to the funnel.
    pub fn sync_visitor(&mut self) {
        while let Ok(context) = self.store_updates.try_recv() {
            self.process(Message::VisitorContextChanged(context));
        }
    }

    /// Move the clock forward, firing due timers in deadline order.
    pub fn advance(&mut self, by: Duration) {
        let target = self.now.saturating_add(by);
        self.sync_visitor();
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().0 > target {
                break;
            }
            let ((deadline, _), token) = entry.remove_entry();
            self.deadlines.remove(&token);
            self.now = deadline;
            self.process(Message::TimerFired(token));
        }
        self.now = target;
    }

    /// Jump from deadline to deadline until no timers remain.
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(wait) = self.time_until_next() {
            if fired == MAX_IDLE_FIRES {
                warn!(pending = self.queue.len(), "Timer queue did not settle");
                break;
            }
            self.advance(wait);
            fired += 1;
        }
        fired
    }

    /// Tear down; safe to call after the liveness token was disposed elsewhere.
    pub fn unmount(&mut self) {
        if self.is_alive() {
            self.process(Message::Unmounted);
        }
        if !self.queue.is_empty() {
            debug!(pending = self.queue.len(), "Dropping timers on unmount");
        }
        self.queue.clear();
        self.deadlines.clear();
        info!(at_ms = self.now.as_millis() as u64, "Runtime unmounted");
    }

    fn process(&mut self, message: Message) {
        let mut pending = VecDeque::from([message]);
        while let Some(message) = pending.pop_front() {
            for effect in self.funnel.update(message) {
                if let Some(follow_up) = self.execute(effect) {
                    pending.push_back(follow_up);
                }
            }
        }
    }

    fn execute(&mut self, effect: Effect) -> Option<Message> {
        match effect {
            Effect::Timer(TimerCommand::Schedule { token, after }) => {
                self.seq += 1;
                let key = (self.now.saturating_add(after), self.seq);
                self.queue.insert(key, token);
                self.deadlines.insert(token, key);
                None
            }
            Effect::Timer(TimerCommand::Cancel(token)) => {
                if let Some(key) = self.deadlines.remove(&token) {
                    self.queue.remove(&key);
                }
                None
            }
            Effect::PersistVisitor(context) => {
                if let Err(err) = self.store.set(context) {
                    warn!("Failed to persist visitor context: {err:#}");
                }
                None
            }
            Effect::Track(event) => {
                if let Err(err) = self.tracker.track(&event) {
                    warn!(event = event.name(), "Conversion tracking failed: {err:#}");
                }
                None
            }
            Effect::SubmitSignup(request) => Some(Message::SignupFinished(
                self.registration.signup_with_email(&request),
            )),
            Effect::ResolveOAuth(request) => Some(Message::OAuthResolved(
                self.registration.oauth_redirect_url(&request),
            )),
            Effect::Host(effect) => {
                debug!(?effect, "Host effect");
                self.host_effects.push(effect);
                None
            }
        }
    }
}
