use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use breakapp_application::{CommandRequest, VoiceOrderingUseCase};
use breakapp_core::geo::Coordinate;
use breakapp_core::language::Language;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use rustyline::history::DefaultHistory;

use crate::render;

const COMMANDS: &[&str] = &[
    "/confirm", "/cancel", "/usual", "/nearby", "/location", "/lang", "/new", "/help", "/quit",
];

/// Rustyline helper completing and hinting slash commands.
#[derive(Clone)]
struct ReplHelper;

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        let candidates = COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        COMMANDS
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for ReplHelper {}

/// One parsed line of REPL input.
#[derive(Debug, Clone, PartialEq)]
enum ReplInput {
    Utterance(String),
    Confirm(bool),
    Usual,
    Nearby(Option<f64>),
    SetLocation(Option<Coordinate>),
    SetLanguage(Language),
    NewSession,
    Help,
    Quit,
    Invalid(String),
}

fn parse_line(line: &str) -> ReplInput {
    let line = line.trim();
    if !line.starts_with('/') {
        return ReplInput::Utterance(line.to_string());
    }

    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (command, args.as_slice()) {
        ("/confirm" | "/yes", []) => ReplInput::Confirm(true),
        ("/cancel" | "/no", []) => ReplInput::Confirm(false),
        ("/usual", []) => ReplInput::Usual,
        ("/nearby", []) => ReplInput::Nearby(None),
        ("/nearby", [radius]) => match radius.parse() {
            Ok(radius) => ReplInput::Nearby(Some(radius)),
            Err(_) => ReplInput::Invalid(format!("Not a radius: {}", radius)),
        },
        ("/location", ["off"]) => ReplInput::SetLocation(None),
        ("/location", [lat, lon]) => match (lat.parse(), lon.parse()) {
            (Ok(lat), Ok(lon)) => ReplInput::SetLocation(Some(Coordinate::new(lat, lon))),
            _ => ReplInput::Invalid("Usage: /location <lat> <lon> | /location off".to_string()),
        },
        ("/lang", [code]) => ReplInput::SetLanguage(Language::from_code(code)),
        ("/new", []) => ReplInput::NewSession,
        ("/help", _) => ReplInput::Help,
        ("/quit" | "/exit", _) => ReplInput::Quit,
        _ => ReplInput::Invalid(format!("Unknown command: {}", line)),
    }
}

/// Conversation state kept between REPL lines.
struct ReplState {
    user_id: String,
    language: Language,
    session_id: Option<String>,
    location: Option<Coordinate>,
}

fn print_help() {
    println!("{}", "Speak naturally, e.g. \"I want a burger\" or \"order my usual\".".bright_black());
    println!("{}", "/confirm, /cancel      answer the confirmation prompt".bright_black());
    println!("{}", "/usual                 preview your usual order".bright_black());
    println!("{}", "/nearby [km]           restaurants near your location".bright_black());
    println!("{}", "/location <lat> <lon>  set your location (/location off clears it)".bright_black());
    println!("{}", "/lang <en|ar>          switch language".bright_black());
    println!("{}", "/new                   start a new conversation".bright_black());
    println!("{}", "/quit                  exit".bright_black());
}

pub async fn run(
    usecase: &VoiceOrderingUseCase,
    user_id: String,
    language: Language,
    location: Option<Coordinate>,
) -> Result<()> {
    let mut rl: Editor<ReplHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ReplHelper));

    let mut state = ReplState {
        user_id,
        language,
        session_id: None,
        location,
    };

    println!("{}", "=== BreakApp ordering assistant ===".bright_magenta().bold());
    println!(
        "{}",
        format!("Ordering as '{}' in {}. Type /help for commands.", state.user_id, state.language)
            .bright_black()
    );
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());

                match parse_line(&line) {
                    ReplInput::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    input => handle(usecase, &mut state, input).await,
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                render::error(&err);
                break;
            }
        }
    }

    Ok(())
}

async fn handle(usecase: &VoiceOrderingUseCase, state: &mut ReplState, input: ReplInput) {
    match input {
        ReplInput::Utterance(text) => {
            let request = CommandRequest {
                user_id: state.user_id.clone(),
                transcript: text,
                language: state.language,
                session_id: state.session_id.clone(),
                location: state.location,
            };
            match usecase.process_command(request).await {
                Ok(response) => {
                    render::response(&response, state.language);
                    state.session_id = Some(response.session_id);
                }
                Err(e) => render::error(&e),
            }
        }
        ReplInput::Confirm(confirmed) => {
            let Some(session_id) = state.session_id.clone() else {
                println!("{}", "Nothing to confirm yet.".yellow());
                return;
            };
            match usecase.confirm(&state.user_id, &session_id, confirmed).await {
                Ok(result) => {
                    render::confirmation(&result);
                    state.session_id = None;
                }
                Err(e) => render::error(&e),
            }
        }
        ReplInput::Usual => match usecase.usual_order(&state.user_id, state.language).await {
            Ok(Some(order)) => println!("{}", format!("Your usual: {}", order.summary()).bright_blue()),
            Ok(None) => println!("{}", "No usual order yet.".yellow()),
            Err(e) => render::error(&e),
        },
        ReplInput::Nearby(radius) => {
            let Some(origin) = state.location else {
                println!("{}", "Set a location first: /location <lat> <lon>".yellow());
                return;
            };
            match usecase.nearby_restaurants(origin, radius).await {
                Ok(found) => render::restaurants(&found),
                Err(e) => render::error(&e),
            }
        }
        ReplInput::SetLocation(location) => {
            state.location = location;
            match location {
                Some(c) => println!(
                    "{}",
                    format!("Location set to {:.4}, {:.4}", c.latitude, c.longitude).bright_black()
                ),
                None => println!("{}", "Location cleared.".bright_black()),
            }
        }
        ReplInput::SetLanguage(language) => {
            state.language = language;
            println!("{}", format!("Language: {}", language).bright_black());
        }
        ReplInput::NewSession => {
            state.session_id = None;
            println!("{}", "Started a new conversation.".bright_black());
        }
        ReplInput::Help => print_help(),
        ReplInput::Invalid(message) => println!("{}", message.yellow()),
        ReplInput::Quit => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_an_utterance() {
        assert_eq!(
            parse_line("  I want a burger "),
            ReplInput::Utterance("I want a burger".to_string())
        );
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(parse_line("/confirm"), ReplInput::Confirm(true));
        assert_eq!(parse_line("/no"), ReplInput::Confirm(false));
        assert_eq!(parse_line("/nearby 1.5"), ReplInput::Nearby(Some(1.5)));
        assert_eq!(
            parse_line("/location 24.7 46.6"),
            ReplInput::SetLocation(Some(Coordinate::new(24.7, 46.6)))
        );
        assert_eq!(parse_line("/lang en"), ReplInput::SetLanguage(Language::English));
        assert_eq!(parse_line("/exit"), ReplInput::Quit);
    }

    #[test]
    fn test_bad_arguments() {
        assert!(matches!(parse_line("/nearby far"), ReplInput::Invalid(_)));
        assert!(matches!(parse_line("/location 24.7"), ReplInput::Invalid(_)));
        assert!(matches!(parse_line("/dance"), ReplInput::Invalid(_)));
    }
}
