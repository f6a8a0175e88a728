//! Line-oriented commands for driving the funnel from a terminal.

use anyhow::{Result, anyhow, bail};
use funnel_core::Message;
use funnel_core::language::Level;

pub const HELP: &str = "\
commands:
  next | prev              turn the page
  type <page> | go         edit and submit the page field
  visible <ratio>          report widget visibility (0.0-1.0)
  settled                  auto-scroll finished
  lang [<code|name>]       toggle the language menu, or choose a language
  levels | level <A1-C2>   open the level menu, or choose a level
  dismiss                  click outside the picker
  start | continue | edit  signup gate navigation
  email <addr>             register with email
  oauth <provider>         register with google, apple or facebook
  ok                       dismiss a registration error
  close                    close the signup gate
  snapshot | help | quit";

#[derive(Debug)]
pub enum ConsoleCommand {
    Dispatch(Message),
    Snapshot,
    Help,
    Quit,
}

/// `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let verb = verb.to_ascii_lowercase();

    let message = match (verb.as_str(), rest.is_empty()) {
        ("snapshot", _) => return Ok(Some(ConsoleCommand::Snapshot)),
        ("help" | "?", _) => return Ok(Some(ConsoleCommand::Help)),
        ("quit" | "exit" | "q", _) => return Ok(Some(ConsoleCommand::Quit)),
        ("next" | "n", true) => Message::NextClicked,
        ("prev" | "p", true) => Message::PreviousClicked,
        ("type", false) => Message::PageInputChanged(rest.to_string()),
        ("go", true) => Message::PageInputSubmitted,
        ("visible", false) => {
            let ratio = rest
                .parse::<f32>()
                .map_err(|_| anyhow!("visible expects a ratio, got {rest:?}"))?;
            Message::VisibilitySampled { ratio }
        }
        ("settled", true) => Message::ScrollSettled,
        ("lang", true) => Message::LanguageMenuToggled,
        ("lang", false) => Message::LanguageChosen(rest.to_string()),
        ("levels", true) => Message::LevelMenuOpened,
        ("level", false) => {
            let level = Level::parse(rest).ok_or_else(|| anyhow!("unknown level {rest:?}"))?;
            Message::LevelChosen(level)
        }
        ("dismiss", true) => Message::PickerDismissed,
        ("start", true) => Message::StartLearningClicked,
        ("continue", true) => Message::GateContinue,
        ("edit", true) => Message::GateEditTarget,
        ("email", false) => Message::EmailSubmitted(rest.to_string()),
        ("oauth", false) => Message::OAuthRequested(rest.to_ascii_lowercase()),
        ("ok", true) => Message::SignupErrorDismissed,
        ("close", true) => Message::GateClosed,
        (_, _) => bail!("unrecognized command {line:?}; type `help`"),
    };
    Ok(Some(ConsoleCommand::Dispatch(message)))
}
