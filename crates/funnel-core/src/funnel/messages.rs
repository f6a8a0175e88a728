use crate::auth::{RegistrationError, SignupOutcome};
use crate::language::Level;
use crate::timers::TimerToken;
use crate::visitor::VisitorContext;

/// Everything the host (or a fired timer) can tell the funnel.
#[derive(Debug, Clone)]
pub enum Message {
    /// Fraction of the widget inside the viewport, sampled on a poll.
    VisibilitySampled { ratio: f32 },
    /// Host finished the auto-scroll that brought the widget into view.
    ScrollSettled,
    NextClicked,
    PreviousClicked,
    PageInputChanged(String),
    PageInputSubmitted,
    LanguageMenuToggled,
    LevelMenuOpened,
    LanguageChosen(String),
    LevelChosen(Level),
    /// Click outside an open dropdown.
    PickerDismissed,
    StartLearningClicked,
    GateContinue,
    GateEditTarget,
    EmailSubmitted(String),
    OAuthRequested(String),
    SignupFinished(Result<SignupOutcome, RegistrationError>),
    OAuthResolved(Result<String, RegistrationError>),
    SignupErrorDismissed,
    GateClosed,
    VisitorContextChanged(VisitorContext),
    TimerFired(TimerToken),
    Unmounted,
}
