use crate::auth::{OAuthRequest, SignupRequest};
use crate::timers::TimerCommand;
use crate::tracking::ConversionEvent;
use crate::visitor::VisitorContext;

mod gate;
mod interstitial;
mod navigation;
mod reducer;
mod reveal;
mod selection;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Timer(TimerCommand),
    PersistVisitor(VisitorContext),
    Track(ConversionEvent),
    SubmitSignup(SignupRequest),
    ResolveOAuth(OAuthRequest),
    Host(HostEffect),
}

/// Presentational requests the embedding page carries out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEffect {
    LockScroll,
    ReleaseScroll,
    ScrollIntoView,
    /// Animate word-count badges with the given per-segment delays.
    RevealBadges { page: u32, delays_ms: Vec<u64> },
    RedirectTo { url: String },
    RegistrationSucceeded { token: Option<String> },
}
