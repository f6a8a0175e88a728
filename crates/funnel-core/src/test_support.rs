//! Fakes shared by the runtime and funnel scenario tests.

use crate::auth::{
    OAuthRequest, RegistrationClient, RegistrationError, SignupOutcome, SignupRequest,
    build_oauth_url,
};
use crate::config::FunnelConfig;
use crate::content::StaticContent;
use crate::runtime::FunnelRuntime;
use crate::tracking::{ConversionEvent, ConversionTracker};
use crate::translation::DictionaryTranslator;
use crate::visitor::{MemoryVisitorStore, VisitorContext, VisitorStore};
use anyhow::{Result, anyhow};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Receiver;

pub(crate) type Shared<T> = Rc<RefCell<T>>;

pub(crate) fn test_config() -> FunnelConfig {
    FunnelConfig {
        alphabet_seed: Some(42),
        ..FunnelConfig::default()
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct RecordingTracker {
    pub events: Shared<Vec<ConversionEvent>>,
}

impl ConversionTracker for RecordingTracker {
    fn track(&mut self, event: &ConversionEvent) -> Result<()> {
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct FailingTracker;

impl ConversionTracker for FailingTracker {
    fn track(&mut self, _event: &ConversionEvent) -> Result<()> {
        Err(anyhow!("analytics endpoint unreachable"))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FakeRegistration {
    pub result: Result<SignupOutcome, RegistrationError>,
    pub requests: Shared<Vec<SignupRequest>>,
}

impl FakeRegistration {
    pub fn succeeding() -> Self {
        Self {
            result: Ok(SignupOutcome {
                success: true,
                token: Some("session-token".into()),
            }),
            requests: Rc::default(),
        }
    }

    pub fn failing(error: RegistrationError) -> Self {
        Self {
            result: Err(error),
            requests: Rc::default(),
        }
    }
}

impl RegistrationClient for FakeRegistration {
    fn signup_with_email(&self, request: &SignupRequest) -> Result<SignupOutcome, RegistrationError> {
        self.requests.borrow_mut().push(request.clone());
        self.result.clone()
    }

    fn oauth_redirect_url(&self, request: &OAuthRequest) -> Result<String, RegistrationError> {
        build_oauth_url("https://api.test", request)
    }
}

/// Store handle that tests can also write to, like a second widget would.
#[derive(Debug, Clone)]
pub(crate) struct SharedStore(pub Shared<MemoryVisitorStore>);

impl VisitorStore for SharedStore {
    fn load(&self) -> VisitorContext {
        self.0.borrow().load()
    }

    fn set(&mut self, context: VisitorContext) -> Result<()> {
        self.0.borrow_mut().set(context)
    }

    fn subscribe(&mut self) -> Receiver<VisitorContext> {
        self.0.borrow_mut().subscribe()
    }
}

pub(crate) struct Harness {
    pub runtime: FunnelRuntime,
    pub events: Shared<Vec<ConversionEvent>>,
    pub signups: Shared<Vec<SignupRequest>>,
    pub store: Shared<MemoryVisitorStore>,
}

pub(crate) fn harness(
    config: FunnelConfig,
    visitor: VisitorContext,
    registration: FakeRegistration,
) -> Harness {
    let tracker = RecordingTracker::default();
    let events = tracker.events.clone();
    let signups = registration.requests.clone();
    let store = Rc::new(RefCell::new(MemoryVisitorStore::new(visitor)));
    let runtime = FunnelRuntime::new(
        config,
        Box::new(StaticContent),
        Box::new(DictionaryTranslator::sample()),
        Box::new(SharedStore(store.clone())),
        Box::new(registration),
        Box::new(tracker),
    );
    Harness {
        runtime,
        events,
        signups,
        store,
    }
}

pub(crate) fn runtime_with(config: FunnelConfig) -> (FunnelRuntime, Shared<Vec<ConversionEvent>>) {
    let harness = harness(config, VisitorContext::new("en"), FakeRegistration::succeeding());
    (harness.runtime, harness.events)
}
