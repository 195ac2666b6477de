//! Line reader for the reservation language.
//!
//! ```text
//! RESERVA [<user>] SALA <id> PARA <date> DE <time> A <time>
//! CANCELAR <id> PARA <date> DE <time> A <time>
//! REPROGRAMAR <id> PARA <date> DE <time> A <time> [DE] <time> A <time>
//! LISTAR
//! ```
//!
//! Tokens are whitespace-separated and keywords are uppercase. Only the shape of a
//! line is checked here; dates and times are validated by the engine.

use serde::Serialize;
use tracing::warn;

use crate::engine::{Engine, EngineError};
use crate::model::*;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: &'static str, found: String },
    #[error("missing {0}")]
    MissingToken(&'static str),
    #[error("unexpected trailing input: {0}")]
    TrailingInput(String),
}

struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn next_value(&mut self, what: &'static str) -> Result<String, ParseError> {
        self.inner
            .next()
            .map(str::to_string)
            .ok_or(ParseError::MissingToken(what))
    }

    fn keyword(&mut self, kw: &'static str) -> Result<(), ParseError> {
        match self.inner.next() {
            Some(tok) if tok == kw => Ok(()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                expected: kw,
                found: tok.to_string(),
            }),
            None => Err(ParseError::MissingToken(kw)),
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.inner.clone().next()
    }

    /// `PARA <date> DE <time> A <time>`
    fn slot(&mut self) -> Result<(String, String, String), ParseError> {
        self.keyword("PARA")?;
        let date = self.next_value("date")?;
        self.keyword("DE")?;
        let (start, end) = self.range()?;
        Ok((date, start, end))
    }

    /// `<time> A <time>`
    fn range(&mut self) -> Result<(String, String), ParseError> {
        let start = self.next_value("start time")?;
        self.keyword("A")?;
        let end = self.next_value("end time")?;
        Ok((start, end))
    }

    fn finish(mut self) -> Result<(), ParseError> {
        match self.inner.next() {
            Some(tok) => Err(ParseError::TrailingInput(tok.to_string())),
            None => Ok(()),
        }
    }
}

pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    let mut tokens = Tokens {
        inner: line.split_whitespace(),
    };
    let Some(verb) = tokens.inner.next() else {
        return Ok(Command::Blank);
    };

    let cmd = match verb {
        "RESERVA" => {
            let user = match tokens.peek() {
                Some("SALA") => None,
                Some(_) => Some(tokens.next_value("user")?),
                None => return Err(ParseError::MissingToken("SALA")),
            };
            tokens.keyword("SALA")?;
            let resource_id = tokens.next_value("room id")?;
            let (date, start, end) = tokens.slot()?;
            Command::Reserve {
                resource_id,
                user,
                date,
                start,
                end,
            }
        }
        "CANCELAR" => {
            let resource_id = tokens.next_value("room id")?;
            let (date, start, end) = tokens.slot()?;
            Command::Cancel {
                resource_id,
                date,
                start,
                end,
            }
        }
        "REPROGRAMAR" => {
            let resource_id = tokens.next_value("room id")?;
            let (date, old_start, old_end) = tokens.slot()?;
            if tokens.peek() == Some("DE") {
                tokens.keyword("DE")?;
            }
            let (new_start, new_end) = tokens.range()?;
            Command::Reprogram {
                resource_id,
                date,
                old_start,
                old_end,
                new_start,
                new_end,
            }
        }
        "LISTAR" => Command::List,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };
    tokens.finish()?;
    Ok(cmd)
}

/// Why a program line produced no outcome.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("Error de sintaxis: {0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Engine(#[from] EngineError),
}

impl LineError {
    pub fn kind(&self) -> &'static str {
        match self {
            LineError::Parse(_) => "syntax_error",
            LineError::Engine(e) => e.kind(),
        }
    }
}

/// Result of one non-blank program line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineResult {
    /// 1-based line number in the source.
    pub line: usize,
    pub result: Result<Outcome, LineError>,
}

#[derive(Serialize)]
struct JsonLine<'a> {
    line: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<&'a Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonError>,
}

#[derive(Serialize)]
struct JsonError {
    kind: &'static str,
    message: String,
}

impl LineResult {
    pub fn to_json(&self) -> serde_json::Result<String> {
        let line = match &self.result {
            Ok(outcome) => JsonLine {
                line: self.line,
                outcome: Some(outcome),
                error: None,
            },
            Err(e) => JsonLine {
                line: self.line,
                outcome: None,
                error: Some(JsonError {
                    kind: e.kind(),
                    message: e.to_string(),
                }),
            },
        };
        serde_json::to_string(&line)
    }
}

/// Apply every line of `source` in order. Blank lines produce no result; a bad
/// line is reported and the run continues.
pub fn run(engine: &mut Engine, source: &str) -> Vec<LineResult> {
    let mut results = Vec::new();
    for (idx, text) in source.lines().enumerate() {
        let line = idx + 1;
        let cmd = match parse_line(text) {
            Ok(Command::Blank) => continue,
            Ok(cmd) => cmd,
            Err(e) => {
                warn!(line, "syntax error: {e}");
                metrics::counter!(crate::observability::PARSE_ERRORS_TOTAL).increment(1);
                results.push(LineResult {
                    line,
                    result: Err(e.into()),
                });
                continue;
            }
        };
        results.push(LineResult {
            line,
            result: engine.apply(cmd).map_err(LineError::from),
        });
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reserve_with_user() {
        let cmd = parse_line("RESERVA user1 SALA room1 PARA 01/01/2030 DE 09:00 A 10:00").unwrap();
        assert_eq!(
            cmd,
            Command::Reserve {
                resource_id: "room1".into(),
                user: Some("user1".into()),
                date: "01/01/2030".into(),
                start: "09:00".into(),
                end: "10:00".into(),
            }
        );
    }

    #[test]
    fn parse_reserve_without_user() {
        let cmd = parse_line("RESERVA SALA room1 PARA 01/01/2030 DE 09:00 A 10:00").unwrap();
        assert!(matches!(cmd, Command::Reserve { user: None, .. }));
    }

    #[test]
    fn parse_cancel() {
        let cmd = parse_line("CANCELAR room1 PARA 01/01/2030 DE 09:00 A 10:00").unwrap();
        assert_eq!(
            cmd,
            Command::Cancel {
                resource_id: "room1".into(),
                date: "01/01/2030".into(),
                start: "09:00".into(),
                end: "10:00".into(),
            }
        );
    }

    #[test]
    fn parse_reprogram_with_and_without_de() {
        let expected = Command::Reprogram {
            resource_id: "room1".into(),
            date: "01/01/2030".into(),
            old_start: "09:00".into(),
            old_end: "10:00".into(),
            new_start: "10:00".into(),
            new_end: "11:00".into(),
        };
        assert_eq!(
            parse_line("REPROGRAMAR room1 PARA 01/01/2030 DE 09:00 A 10:00 10:00 A 11:00").unwrap(),
            expected
        );
        assert_eq!(
            parse_line("REPROGRAMAR room1 PARA 01/01/2030 DE 09:00 A 10:00 DE 10:00 A 11:00").unwrap(),
            expected
        );
    }

    #[test]
    fn parse_list_and_blank() {
        assert_eq!(parse_line("LISTAR").unwrap(), Command::List);
        assert_eq!(parse_line("   ").unwrap(), Command::Blank);
        assert_eq!(parse_line("").unwrap(), Command::Blank);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse_line("BORRAR x"), Err(ParseError::UnknownCommand("BORRAR".into())));
        assert_eq!(
            parse_line("CANCELAR room1 EN 01/01/2030 DE 09:00 A 10:00"),
            Err(ParseError::UnexpectedToken { expected: "PARA", found: "EN".into() })
        );
        assert_eq!(
            parse_line("CANCELAR room1 PARA 01/01/2030 DE 09:00"),
            Err(ParseError::MissingToken("A"))
        );
        assert_eq!(parse_line("LISTAR todo"), Err(ParseError::TrailingInput("todo".into())));
        assert_eq!(parse_line("RESERVA"), Err(ParseError::MissingToken("SALA")));
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert_eq!(parse_line("listar"), Err(ParseError::UnknownCommand("listar".into())));
    }
}
