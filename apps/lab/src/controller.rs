//! Session command parsing: text lines to lab requests.

use catalog::LabCatalog;
use shared::{
    domain::{ActionId, ReagentId},
    protocol::{LabRequest, QuizSource},
};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  add <reagent>              drop a reagent (id or name) into the beaker
  reset-mix                  empty the beaker
  step <action>              perform the next experiment action
  reset-steps                start the experiment over
  answer mix|experiment <n>  answer a quiz (options are numbered from 1)
  status                     show the current bench
  help                       show this list
  quit                       leave the experiment";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Request(LabRequest),
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command `{0}`; type `help` for the list")]
    Unknown(String),
    #[error("`{command}` needs {what}")]
    MissingArgument {
        command: &'static str,
        what: &'static str,
    },
    #[error("quiz answers are option numbers starting at 1, got `{0}`")]
    InvalidChoice(String),
    #[error("quiz source must be `mix` or `experiment`, got `{0}`")]
    InvalidSource(String),
}

/// Maps free-form input to a reagent id; unresolved input is passed through
/// so the mix bench can report it.
pub fn reagent_id(catalog: &LabCatalog, raw: &str) -> ReagentId {
    catalog
        .find_reagent(raw)
        .map(|reagent| reagent.id.clone())
        .unwrap_or_else(|| ReagentId::new(raw.trim()))
}

/// Returns `Ok(None)` for blank lines.
pub fn parse_command(catalog: &LabCatalog, line: &str) -> Result<Option<SessionCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map(|(verb, rest)| (verb, rest.trim()))
        .unwrap_or((line, ""));

    let command = match verb.to_ascii_lowercase().as_str() {
        "add" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "add",
                    what: "a reagent",
                });
            }
            SessionCommand::Request(LabRequest::AddReagent {
                reagent_id: reagent_id(catalog, rest),
            })
        }
        "reset-mix" => SessionCommand::Request(LabRequest::ResetMix),
        "step" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "step",
                    what: "an action",
                });
            }
            SessionCommand::Request(LabRequest::AdvanceStep {
                action_id: ActionId::new(rest),
            })
        }
        "reset-steps" => SessionCommand::Request(LabRequest::ResetStepper),
        "answer" => parse_answer(rest)?,
        "status" => SessionCommand::Status,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_answer(rest: &str) -> Result<SessionCommand, CommandError> {
    let mut parts = rest.split_whitespace();
    let (Some(source), Some(choice)) = (parts.next(), parts.next()) else {
        return Err(CommandError::MissingArgument {
            command: "answer",
            what: "a quiz source and an option number",
        });
    };
    let source = match source.to_ascii_lowercase().as_str() {
        "mix" => QuizSource::Mix,
        "experiment" | "exp" => QuizSource::Experiment,
        _ => return Err(CommandError::InvalidSource(source.to_string())),
    };
    let choice = choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| CommandError::InvalidChoice(choice.to_string()))?;
    Ok(SessionCommand::Request(LabRequest::AnswerQuiz { source, choice }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> LabCatalog {
        LabCatalog::builtin().expect("builtin catalog")
    }

    fn parse(line: &str) -> Result<Option<SessionCommand>, CommandError> {
        parse_command(&catalog(), line)
    }

    #[test]
    fn add_resolves_display_names() {
        assert_eq!(
            parse("add Baking Soda"),
            Ok(Some(SessionCommand::Request(LabRequest::AddReagent {
                reagent_id: ReagentId::new("baking-soda")
            })))
        );
    }

    #[test]
    fn unresolved_reagents_pass_through() {
        assert_eq!(
            parse("ADD  unobtainium "),
            Ok(Some(SessionCommand::Request(LabRequest::AddReagent {
                reagent_id: ReagentId::new("unobtainium")
            })))
        );
    }

    #[test]
    fn answers_are_one_based() {
        assert_eq!(
            parse("answer experiment 2"),
            Ok(Some(SessionCommand::Request(LabRequest::AnswerQuiz {
                source: QuizSource::Experiment,
                choice: 1
            })))
        );
        assert_eq!(
            parse("answer mix 0"),
            Err(CommandError::InvalidChoice("0".into()))
        );
        assert_eq!(
            parse("answer beaker 1"),
            Err(CommandError::InvalidSource("beaker".into()))
        );
        assert!(matches!(
            parse("answer mix"),
            Err(CommandError::MissingArgument { command: "answer", .. })
        ));
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        assert_eq!(parse("   "), Ok(None));
        assert_eq!(parse("# warm up"), Ok(None));
    }

    #[test]
    fn simple_verbs_parse() {
        assert_eq!(parse("status"), Ok(Some(SessionCommand::Status)));
        assert_eq!(parse("quit"), Ok(Some(SessionCommand::Quit)));
        assert_eq!(
            parse("reset-mix"),
            Ok(Some(SessionCommand::Request(LabRequest::ResetMix)))
        );
        assert_eq!(
            parse("step filter"),
            Ok(Some(SessionCommand::Request(LabRequest::AdvanceStep {
                action_id: ActionId::new("filter")
            })))
        );
        assert_eq!(parse("dance"), Err(CommandError::Unknown("dance".into())));
    }
}
