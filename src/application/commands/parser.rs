// src/application/commands/parser.rs
//
// Text form of commands, one per line:
//
//   select <system>            back            search [term]
//   open <filename>            close | escape | backdrop
//   form <slot> <on|off>       launch [slot] [on|off]
//   refresh                    status          tab <games|settings|stats>
//   set <path> <value>         save            reset [yes]
//   reset-stats                show

use std::str::FromStr;

use super::Command;
use crate::error::{AppError, AppResult};

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> AppResult<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb.to_ascii_lowercase().as_str() {
            "select" => Command::SelectSystem {
                system: required(verb, rest)?.parse()?,
            },
            "back" => Command::Back,
            "search" => Command::Search {
                term: rest.to_string(),
            },
            "open" => Command::OpenGame {
                filename: required(verb, rest)?.to_string(),
            },
            "close" | "escape" | "backdrop" => Command::Close,
            "form" => {
                let mut args = rest.split_whitespace();
                let save_slot = parse_slot(args.next().ok_or_else(|| usage(verb))?)?;
                let cheats = parse_switch(args.next().ok_or_else(|| usage(verb))?)?;
                Command::SetLaunchForm { save_slot, cheats }
            }
            "launch" => {
                let mut args = rest.split_whitespace();
                Command::Launch {
                    save_slot: args.next().map(parse_slot).transpose()?,
                    cheats: args.next().map(parse_switch).transpose()?,
                }
            }
            "refresh" => Command::Refresh,
            "status" => Command::CheckStatus,
            "tab" => Command::SwitchTab {
                tab: required(verb, rest)?.parse()?,
            },
            "set" => {
                let (path, raw) = rest.split_once(char::is_whitespace).ok_or_else(|| usage(verb))?;
                Command::UpdateSetting {
                    path: path.to_string(),
                    value: parse_value(raw.trim()),
                }
            }
            "save" => Command::SaveSettings,
            "reset" => Command::ResetSettings {
                confirmed: matches!(rest.to_ascii_lowercase().as_str(), "yes" | "y"),
            },
            "reset-stats" => Command::ResetStats,
            "show" | "" => Command::Show,
            other => {
                return Err(AppError::Validation(format!("Unknown command: {}", other)));
            }
        };

        Ok(command)
    }
}

fn required<'a>(verb: &str, rest: &'a str) -> AppResult<&'a str> {
    if rest.is_empty() {
        Err(usage(verb))
    } else {
        Ok(rest)
    }
}

fn usage(verb: &str) -> AppError {
    let hint = match verb {
        "select" => "select <system>",
        "open" => "open <filename>",
        "form" => "form <slot> <on|off>",
        "tab" => "tab <games|settings|stats>",
        "set" => "set <path> <value>",
        _ => verb,
    };
    AppError::Validation(format!("Usage: {}", hint))
}

fn parse_slot(raw: &str) -> AppResult<u8> {
    raw.parse::<u8>()
        .ok()
        .filter(|slot| *slot > 0)
        .ok_or_else(|| AppError::Validation(format!("Invalid save slot: {}", raw)))
}

fn parse_switch(raw: &str) -> AppResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => Err(AppError::Validation(format!("Expected on or off, got: {}", raw))),
    }
}

/// JSON when it parses, otherwise the raw text as a string
fn parse_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}
