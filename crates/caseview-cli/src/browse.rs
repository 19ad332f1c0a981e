//! Line commands for the interactive browser.
//!
//! Grammar (one command per line, case-insensitive keywords):
//!
//! | Input                  | Command                           |
//! |------------------------|-----------------------------------|
//! | `n`, `next`            | next page                         |
//! | `p`, `prev`            | previous page                     |
//! | `g N`, `N`             | jump to page `N` from the top     |
//! | `b N`                  | jump to page `N` from the bottom  |
//! | `s TERM`, `/TERM`      | search by index                   |
//! | `s`, `clear`           | clear the search                  |
//! | `hit V..`              | filter on hit values              |
//! | `hit`                  | clear the hit filter              |
//! | `d NAME`               | switch dataset                    |
//! | `h`, `help`, `?`       | help                              |
//! | `q`, `quit`, `exit`    | leave                             |

use caseview_model::HitValue;
use caseview_view::JumpSurface;

/// One parsed browser command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Prev,
    /// 1-based page typed into one of the jump inputs.
    Jump {
        surface: JumpSurface,
        page: i64,
    },
    Search(String),
    ClearSearch,
    Hit(Vec<HitValue>),
    ClearHit,
    Dataset(String),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  n | next            next page
  p | prev            previous page
  g N | N             go to page N (top input)
  b N                 go to page N (bottom input)
  s TERM | /TERM      show the record with index TERM
  s | clear           clear the search
  hit V [V..]         show records whose hit value is one of V
  hit                 clear the hit filter
  d NAME              switch to dataset NAME
  h | help | ?        this help
  q | quit            leave";

/// Parses one input line.
///
/// # Errors
///
/// Returns a message for the operator when the line is empty, unknown or
/// missing an argument.
pub fn parse_browse_command(line: &str) -> Result<BrowseCommand, String> {
    let input = line.trim();
    if input.is_empty() {
        return Err("empty command".to_string());
    }
    if let Some(term) = input.strip_prefix('/') {
        return Ok(search_or_clear(term));
    }
    if input.parse::<i64>().is_ok() {
        return parse_jump(JumpSurface::Top, input);
    }

    let (keyword, rest) = match input.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (input, ""),
    };
    match keyword.to_lowercase().as_str() {
        "n" | "next" => Ok(BrowseCommand::Next),
        "p" | "prev" => Ok(BrowseCommand::Prev),
        "g" | "goto" => parse_jump(JumpSurface::Top, rest),
        "b" | "bottom" => parse_jump(JumpSurface::Bottom, rest),
        "s" | "search" => Ok(search_or_clear(rest)),
        "clear" => Ok(BrowseCommand::ClearSearch),
        "hit" => Ok(parse_hit(rest)),
        "d" | "dataset" => {
            if rest.is_empty() {
                Err("dataset requires a name".to_string())
            } else {
                Ok(BrowseCommand::Dataset(rest.to_string()))
            }
        }
        "h" | "help" | "?" => Ok(BrowseCommand::Help),
        "q" | "quit" | "exit" => Ok(BrowseCommand::Quit),
        other => Err(format!("unknown command: '{other}'")),
    }
}

fn search_or_clear(term: &str) -> BrowseCommand {
    let term = term.trim();
    if term.is_empty() {
        BrowseCommand::ClearSearch
    } else {
        BrowseCommand::Search(term.to_string())
    }
}

fn parse_jump(surface: JumpSurface, value: &str) -> Result<BrowseCommand, String> {
    if value.is_empty() {
        return Err("jump requires a page number".to_string());
    }
    value
        .parse::<i64>()
        .map(|page| BrowseCommand::Jump { surface, page })
        .map_err(|_| format!("invalid page number: '{value}'"))
}

fn parse_hit(values: &str) -> BrowseCommand {
    let selection: Vec<HitValue> = values
        .split([',', ' '])
        .filter(|value| !value.trim().is_empty())
        .filter_map(|value| value.parse().ok())
        .collect();
    if selection.is_empty() {
        BrowseCommand::ClearHit
    } else {
        BrowseCommand::Hit(selection)
    }
}
