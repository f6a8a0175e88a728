use super::*;
use crate::auth::RegistrationError;
use crate::content::{ContentTier, StaticContent};
use crate::language::Level;
use crate::runtime::FunnelRuntime;
use crate::test_support::{FailingTracker, FakeRegistration, Harness, harness, test_config};
use crate::timers::{TimerCommand, TimerKind, TimerToken};
use crate::tracking::ConversionEvent;
use crate::translation::DictionaryTranslator;
use crate::visitor::{MemoryVisitorStore, VisitorContext, VisitorStore};
use std::time::Duration;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn default_harness() -> Harness {
    harness(test_config(), VisitorContext::new("en"), FakeRegistration::succeeding())
}

fn chosen_visitor(code: &str, level: Level) -> VisitorContext {
    VisitorContext {
        native_language: "en".into(),
        target_language: Some(code.into()),
        level: Some(level),
        has_chosen_language: true,
        has_chosen_level: true,
    }
}

fn complete_reveal(h: &mut Harness) {
    h.runtime.dispatch(Message::VisibilitySampled { ratio: 1.0 });
    h.runtime.run_until_idle();
    assert_eq!(h.runtime.funnel().reveal_phase(), RevealPhase::Complete);
}

fn choose(h: &mut Harness, language: &str, level: Level) {
    if !h.runtime.funnel().picker().is_open() {
        h.runtime.dispatch(Message::LanguageMenuToggled);
    }
    h.runtime.dispatch(Message::LanguageChosen(language.into()));
    h.runtime.dispatch(Message::LevelChosen(level));
}

fn open_registration(h: &mut Harness) {
    h.runtime.dispatch(Message::StartLearningClicked);
    h.runtime.dispatch(Message::GateContinue);
    h.runtime.dispatch(Message::GateContinue);
    assert_eq!(h.runtime.funnel().gate().step(), GateStep::Registration);
}

fn scheduled_token(effects: &[Effect], kind: TimerKind) -> Option<TimerToken> {
    effects.iter().find_map(|effect| match effect {
        Effect::Timer(TimerCommand::Schedule { token, .. }) if token.kind == kind => Some(*token),
        _ => None,
    })
}

#[test]
fn three_forward_clicks_lead_to_the_signup_gate() {
    let mut h = default_harness();
    assert_eq!(h.runtime.funnel().cursor().page(), 8);
    assert_eq!(h.runtime.funnel().content_tier(), ContentTier::WordLevel);

    for _ in 0..3 {
        h.runtime.dispatch(Message::NextClicked);
        h.runtime.run_until_idle();
    }

    let funnel = h.runtime.funnel();
    assert!(funnel.gate().is_visible());
    assert_eq!(funnel.engagement().click_count(), 3);
    assert_eq!(funnel.cursor().page(), 11);
    assert_eq!(funnel.alphabet().len(), 26);
    assert!(
        h.events
            .borrow()
            .contains(&ConversionEvent::SignupStarted { manual: false })
    );
}

#[test]
fn committing_french_b1_resets_progress_and_switches_tables() {
    let mut h = default_harness();
    complete_reveal(&mut h);
    h.runtime.dispatch(Message::NextClicked);
    h.runtime.run_until_idle();
    assert!(h.runtime.funnel().tally().total > 0);
    assert_eq!(h.runtime.funnel().alphabet().len(), 13);

    choose(&mut h, "French", Level::B1);

    let funnel = h.runtime.funnel();
    assert_eq!(funnel.tally().total, 0);
    assert!(funnel.alphabet().is_empty());
    assert_eq!(funnel.engagement().click_count(), 0);
    assert_eq!(funnel.content_tier(), ContentTier::SentenceLevel);
    assert!(funnel.selection().is_complete());
    assert_eq!(funnel.pending_timers(), 0);

    let stored = h.store.borrow().load();
    assert_eq!(stored, chosen_visitor("fr", Level::B1));

    // Our own write echoes back through the store and changes nothing.
    h.runtime.sync_visitor();
    assert!(h.runtime.funnel().alphabet().is_empty());
    assert_eq!(h.runtime.funnel().selection().language.code, "fr");
}

#[test]
fn out_of_range_page_input_reverts() {
    let mut h = default_harness();
    h.runtime.dispatch(Message::PageInputChanged("999".into()));
    h.runtime.dispatch(Message::PageInputSubmitted);

    let cursor = h.runtime.funnel().cursor();
    assert_eq!(cursor.total_pages(), 511);
    assert_eq!(cursor.page(), 8);
    assert_eq!(cursor.text(), "8");
    assert_eq!(h.runtime.pending_timers(), 0);
}

#[test]
fn manual_jump_does_not_count_as_engagement() {
    let mut h = default_harness();
    h.runtime.dispatch(Message::PageInputChanged(" 20 ".into()));
    h.runtime.dispatch(Message::PageInputSubmitted);
    assert_eq!(h.runtime.funnel().cursor().page(), 20);
    assert_eq!(h.runtime.funnel().engagement().click_count(), 0);
}

#[test]
fn next_on_last_page_is_a_no_op() {
    let mut config = test_config();
    config.start_page = 511;
    let mut h = harness(config, VisitorContext::new("en"), FakeRegistration::succeeding());
    h.runtime.dispatch(Message::NextClicked);
    assert_eq!(h.runtime.funnel().cursor().page(), 511);
    assert_eq!(h.runtime.funnel().engagement().click_count(), 0);
    assert_eq!(h.runtime.pending_timers(), 0);
}

#[test]
fn clicks_during_an_interstitial_never_move_the_page() {
    let mut h = default_harness();
    h.runtime.dispatch(Message::NextClicked);
    assert_eq!(
        h.runtime.funnel().engagement().sequencer(),
        SequencerState::Showing(InterstitialStage::First)
    );

    for _ in 0..4 {
        h.runtime.dispatch(Message::NextClicked);
        assert_eq!(h.runtime.funnel().cursor().page(), 9);
    }
    assert_eq!(
        h.runtime.funnel().engagement().sequencer(),
        SequencerState::Hiding(InterstitialStage::First)
    );

    h.runtime.dispatch(Message::PreviousClicked);
    assert_eq!(h.runtime.funnel().cursor().page(), 9);

    h.runtime.advance(ms(500));
    assert_eq!(h.runtime.funnel().engagement().sequencer(), SequencerState::Idle);
    h.runtime.dispatch(Message::NextClicked);
    assert_eq!(h.runtime.funnel().cursor().page(), 10);
    assert_eq!(h.runtime.funnel().engagement().click_count(), 2);
}

#[test]
fn superseded_dwell_timer_is_ignored() {
    let mut funnel = Funnel::new(
        test_config(),
        &VisitorContext::new("en"),
        Box::new(StaticContent),
        Box::new(DictionaryTranslator::sample()),
    );
    let effects = funnel.update(Message::NextClicked);
    let dwell = scheduled_token(&effects, TimerKind::InterstitialDwell).unwrap();

    let effects = funnel.update(Message::NextClicked);
    assert!(effects.contains(&Effect::Timer(TimerCommand::Cancel(dwell))));
    let hide = scheduled_token(&effects, TimerKind::InterstitialHide).unwrap();

    assert!(funnel.update(Message::TimerFired(dwell)).is_empty());
    assert_eq!(
        funnel.engagement().sequencer(),
        SequencerState::Hiding(InterstitialStage::First)
    );

    funnel.update(Message::TimerFired(hide));
    assert_eq!(funnel.engagement().sequencer(), SequencerState::Idle);
    assert!(funnel.update(Message::TimerFired(hide)).is_empty());
    assert_eq!(funnel.pending_timers(), 0);
}

#[test]
fn shown_gate_survives_everything_but_close() {
    let mut h = default_harness();
    h.runtime.dispatch(Message::StartLearningClicked);
    h.runtime.dispatch(Message::StartLearningClicked);
    let started = h
        .events
        .borrow()
        .iter()
        .filter(|event| matches!(event, ConversionEvent::SignupStarted { .. }))
        .count();
    assert_eq!(started, 1);

    h.runtime.dispatch(Message::NextClicked);
    assert_eq!(h.runtime.funnel().cursor().page(), 8);

    h.store
        .borrow_mut()
        .set(chosen_visitor("de", Level::A2))
        .unwrap();
    h.runtime.sync_visitor();
    assert!(h.runtime.funnel().gate().is_visible());
    h.runtime.run_until_idle();
    assert!(h.runtime.funnel().gate().is_visible());

    h.runtime.dispatch(Message::GateClosed);
    let funnel = h.runtime.funnel();
    assert!(!funnel.gate().is_visible());
    assert!(!funnel.gate().blocks_funnel());
    assert_eq!(funnel.engagement().click_count(), 0);
    assert!(h.events.borrow().contains(&ConversionEvent::GateClosed));
}

#[test]
fn start_learning_supersedes_the_automatic_path() {
    let mut h = default_harness();
    for _ in 0..3 {
        h.runtime.dispatch(Message::NextClicked);
        h.runtime.advance(ms(4500));
        h.runtime.advance(ms(500));
    }
    assert!(h.runtime.funnel().gate().is_armed());
    assert!(h.runtime.funnel().is_timer_pending(TimerKind::GateShow));

    h.runtime.dispatch(Message::StartLearningClicked);
    assert!(h.runtime.funnel().gate().is_visible());
    assert_eq!(h.runtime.pending_timers(), 0);
}

#[test]
fn intermittent_visibility_restarts_the_dwell() {
    let mut h = default_harness();
    h.runtime.dispatch(Message::VisibilitySampled { ratio: 0.6 });
    h.runtime.advance(ms(1500));
    h.runtime.dispatch(Message::VisibilitySampled { ratio: 0.2 });
    assert_eq!(h.runtime.funnel().reveal_phase(), RevealPhase::AwaitingVisibility);

    h.runtime.dispatch(Message::VisibilitySampled { ratio: 0.8 });
    h.runtime.advance(ms(1500));
    assert_eq!(h.runtime.funnel().reveal_phase(), RevealPhase::Dwelling);
    h.runtime.advance(ms(500));
    assert_eq!(h.runtime.funnel().reveal_phase(), RevealPhase::Calculating);
    assert!(h.runtime.funnel().scroll_lock().is_engaged());
}

#[test]
fn scroll_lock_is_released_exactly_once() {
    let mut h = default_harness();
    h.runtime.dispatch(Message::VisibilitySampled { ratio: 1.0 });
    h.runtime.advance(ms(2000));
    h.runtime.dispatch(Message::ScrollSettled);
    h.runtime.run_until_idle();
    h.runtime.dispatch(Message::ScrollSettled);

    let releases = h
        .runtime
        .take_host_effects()
        .into_iter()
        .filter(|effect| *effect == HostEffect::ReleaseScroll)
        .count();
    assert_eq!(releases, 1);
    assert!(h.runtime.funnel().word_counts_active());
    assert_eq!(h.runtime.funnel().alphabet().len(), 7);
}

#[test]
fn unmount_cancels_timers_and_drops_later_messages() {
    let mut h = default_harness();
    h.runtime.dispatch(Message::VisibilitySampled { ratio: 1.0 });
    h.runtime.advance(ms(2000));
    h.runtime.dispatch(Message::NextClicked);
    h.runtime.unmount();

    let funnel = h.runtime.funnel();
    assert_eq!(funnel.pending_timers(), 0);
    assert_eq!(funnel.engagement().sequencer(), SequencerState::Idle);
    assert_eq!(funnel.reveal_phase(), RevealPhase::AwaitingVisibility);
    assert!(!funnel.scroll_lock().is_engaged());

    h.runtime.dispatch(Message::NextClicked);
    h.runtime.advance(ms(10_000));
    assert_eq!(h.runtime.funnel().cursor().page(), 9);
}

#[test]
fn registration_waits_for_language_and_level() {
    let mut h = default_harness();
    h.runtime.dispatch(Message::StartLearningClicked);
    h.runtime.dispatch(Message::GateContinue);
    assert_eq!(h.runtime.funnel().gate().step(), GateStep::TargetConfirmation);

    h.runtime.dispatch(Message::GateContinue);
    assert_eq!(h.runtime.funnel().gate().step(), GateStep::TargetConfirmation);
    assert_eq!(h.runtime.funnel().picker().menu(), Some(PickerMenu::Language));
    h.runtime.dispatch(Message::EmailSubmitted("reader@example.com".into()));
    assert!(h.signups.borrow().is_empty());

    choose(&mut h, "fr", Level::B1);
    assert!(h.runtime.funnel().gate().is_visible());
    h.runtime.dispatch(Message::GateContinue);
    h.runtime.dispatch(Message::EmailSubmitted("reader@example.com".into()));

    assert_eq!(h.signups.borrow().len(), 1);
    assert_eq!(h.signups.borrow()[0].target_language, "fr");
    assert_eq!(h.signups.borrow()[0].level, Level::B1);
    assert_eq!(h.runtime.funnel().gate().step(), GateStep::Registered);
    assert!(h.runtime.take_host_effects().contains(&HostEffect::RegistrationSucceeded {
        token: Some("session-token".into())
    }));
}

#[test]
fn registration_failure_is_dismissable_and_keeps_selection() {
    let mut h = harness(
        test_config(),
        chosen_visitor("fr", Level::B1),
        FakeRegistration::failing(RegistrationError::Network("timed out".into())),
    );
    open_registration(&mut h);
    h.runtime.dispatch(Message::EmailSubmitted("reader@example.com".into()));

    let gate = h.runtime.funnel().gate();
    assert!(matches!(gate.submission(), Submission::Failed(reason) if reason.contains("timed out")));
    assert_eq!(gate.step(), GateStep::Registration);
    assert!(h.runtime.funnel().selection().is_complete());
    assert_eq!(h.runtime.funnel().selection().level, Some(Level::B1));
    assert!(
        h.events
            .borrow()
            .iter()
            .any(|event| matches!(event, ConversionEvent::SignupFailed { .. }))
    );

    h.runtime.dispatch(Message::SignupErrorDismissed);
    assert_eq!(*h.runtime.funnel().gate().submission(), Submission::Idle);
}

#[test]
fn oauth_redirect_carries_language_context() {
    let mut h = harness(
        test_config(),
        chosen_visitor("de", Level::C1),
        FakeRegistration::succeeding(),
    );
    open_registration(&mut h);
    h.runtime.dispatch(Message::OAuthRequested("myspace".into()));
    assert!(matches!(
        h.runtime.funnel().gate().submission(),
        Submission::Failed(_)
    ));

    h.runtime.dispatch(Message::SignupErrorDismissed);
    h.runtime.dispatch(Message::OAuthRequested("google".into()));
    let redirect = h.runtime.take_host_effects().into_iter().find_map(|effect| match effect {
        HostEffect::RedirectTo { url } => Some(url),
        _ => None,
    });
    let url = redirect.unwrap();
    assert!(url.starts_with("https://api.test/auth/google?"));
    assert!(url.contains("target=de"));
    assert!(url.contains("level=C1"));
}

#[test]
fn tracking_failures_do_not_stall_the_funnel() {
    let mut runtime = FunnelRuntime::new(
        test_config(),
        Box::new(StaticContent),
        Box::new(DictionaryTranslator::sample()),
        Box::new(MemoryVisitorStore::new(VisitorContext::new("en"))),
        Box::new(FakeRegistration::succeeding()),
        Box::new(FailingTracker),
    );
    runtime.dispatch(Message::VisibilitySampled { ratio: 1.0 });
    for _ in 0..3 {
        runtime.run_until_idle();
        runtime.dispatch(Message::NextClicked);
    }
    runtime.run_until_idle();
    assert!(runtime.funnel().gate().is_visible());
}

#[test]
fn external_selection_change_resets_progress() {
    let mut h = default_harness();
    complete_reveal(&mut h);
    h.runtime.dispatch(Message::NextClicked);
    h.runtime.run_until_idle();
    assert!(!h.runtime.funnel().alphabet().is_empty());

    h.store
        .borrow_mut()
        .set(chosen_visitor("it", Level::A2))
        .unwrap();
    h.runtime.advance(ms(10));

    let funnel = h.runtime.funnel();
    assert_eq!(funnel.selection().language.code, "it");
    assert!(funnel.alphabet().is_empty());
    assert_eq!(funnel.tally().total, 0);
    assert_eq!(funnel.content_tier(), ContentTier::WordLevel);
}

#[test]
fn milestones_grow_the_alphabet_as_supersets() {
    let mut h = default_harness();
    complete_reveal(&mut h);
    let mut previous = h.runtime.funnel().alphabet().revealed().clone();
    assert_eq!(previous.len(), 7);

    for expected in [13, 20, 26] {
        h.runtime.dispatch(Message::NextClicked);
        h.runtime.run_until_idle();
        let current = h.runtime.funnel().alphabet().revealed().clone();
        assert_eq!(current.len(), expected);
        assert!(current.is_superset(&previous));
        previous = current;
    }
}

#[test]
fn level_menu_starts_with_language_until_one_is_chosen() {
    let mut h = default_harness();
    h.runtime.dispatch(Message::LevelMenuOpened);
    assert_eq!(h.runtime.funnel().picker().menu(), Some(PickerMenu::Language));
    h.runtime.dispatch(Message::LanguageChosen("ja".into()));
    h.runtime.dispatch(Message::PickerDismissed);
    assert!(!h.runtime.funnel().selection().has_user_chosen_language);

    choose(&mut h, "ja", Level::A1);
    h.runtime.dispatch(Message::LevelMenuOpened);
    assert_eq!(h.runtime.funnel().picker().menu(), Some(PickerMenu::Level));
    assert_eq!(
        h.runtime.funnel().picker().pending_language().map(|l| l.code.as_str()),
        Some("ja")
    );
}

#[test]
fn snapshot_reflects_the_current_view() {
    let mut h = default_harness();
    complete_reveal(&mut h);
    h.runtime.dispatch(Message::NextClicked);

    let snapshot = h.runtime.snapshot();
    assert_eq!(snapshot.page_number, 9);
    assert_eq!(snapshot.click_count, 1);
    assert_eq!(snapshot.interstitial, Some(InterstitialStage::First));
    assert!(!snapshot.interstitial_hiding);
    assert!(snapshot.tally_just_updated);
    assert_eq!(snapshot.revealed_letters.len(), 13);
    assert_eq!(snapshot.alphabet_stage, Some(1));
    assert!(!snapshot.gate.visible);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["reveal_phase"], "complete");
    assert_eq!(json["content_tier"], "word_level");
}

#[test]
fn closing_the_gate_mid_reveal_unlocks_scrolling_and_allows_a_fresh_reveal() {
    let mut h = default_harness();
    h.runtime.dispatch(Message::VisibilitySampled { ratio: 1.0 });
    h.runtime.advance(ms(2000));
    assert_eq!(h.runtime.funnel().reveal_phase(), RevealPhase::Calculating);
    assert!(h.runtime.funnel().scroll_lock().is_engaged());

    h.runtime.dispatch(Message::StartLearningClicked);
    h.runtime.dispatch(Message::GateClosed);

    let funnel = h.runtime.funnel();
    assert_eq!(funnel.reveal_phase(), RevealPhase::AwaitingVisibility);
    assert!(!funnel.scroll_lock().is_engaged());
    assert_eq!(funnel.pending_timers(), 0);
    assert!(h.runtime.take_host_effects().contains(&HostEffect::ReleaseScroll));

    h.runtime.dispatch(Message::VisibilitySampled { ratio: 1.0 });
    h.runtime.run_until_idle();
    let funnel = h.runtime.funnel();
    assert_eq!(funnel.reveal_phase(), RevealPhase::Complete);
    assert!(funnel.word_counts_active());
    assert!(!funnel.scroll_lock().is_engaged());
}

#[test]
fn language_commit_mid_reveal_restarts_the_reveal() {
    let mut h = default_harness();
    h.runtime.dispatch(Message::VisibilitySampled { ratio: 1.0 });
    h.runtime.advance(ms(2000));
    assert_eq!(h.runtime.funnel().reveal_phase(), RevealPhase::Calculating);

    choose(&mut h, "fr", Level::B1);

    let funnel = h.runtime.funnel();
    assert_eq!(funnel.reveal_phase(), RevealPhase::AwaitingVisibility);
    assert!(!funnel.scroll_lock().is_engaged());
    assert!(!funnel.word_counts_active());
    assert_eq!(funnel.pending_timers(), 0);

    h.runtime.dispatch(Message::VisibilitySampled { ratio: 1.0 });
    h.runtime.run_until_idle();
    let funnel = h.runtime.funnel();
    assert_eq!(funnel.reveal_phase(), RevealPhase::Complete);
    assert!(funnel.word_counts_active());
    assert_eq!(funnel.content_tier(), ContentTier::SentenceLevel);
    assert_eq!(funnel.alphabet().len(), 7);
    assert!(!funnel.scroll_lock().is_engaged());
}
