//! Request resolution - turns one protocol line into a typed request

use crate::core::error::{Result, SimError};

/// A request understood by the boundary shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Current state and history
    State,
    /// Catalog, optionally restricted to one category
    Catalog(Option<String>),
    /// Apply the named action
    Action(String),
    Reset,
    Quit,
}

/// Parse one request line
///
/// Verbs are case-insensitive; action and category names are passed through
/// as written so the engine reports them verbatim.
pub fn parse_request(line: &str) -> Result<Request> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(SimError::Validation("empty request".into()));
    };
    let argument = words.next();
    if let Some(extra) = words.next() {
        return Err(SimError::Validation(format!(
            "unexpected argument '{}' after '{}'",
            extra, verb
        )));
    }

    match (verb.to_lowercase().as_str(), argument) {
        ("state" | "s", None) => Ok(Request::State),
        ("catalog" | "c", category) => Ok(Request::Catalog(category.map(str::to_string))),
        ("action" | "a", Some(name)) => Ok(Request::Action(name.to_string())),
        ("action" | "a", None) => Err(SimError::Validation("usage: action <name>".into())),
        ("reset", None) => Ok(Request::Reset),
        ("quit" | "q", None) => Ok(Request::Quit),
        ("state" | "s" | "reset" | "quit" | "q", Some(arg)) => Err(SimError::Validation(
            format!("'{}' takes no argument, got '{}'", verb, arg),
        )),
        _ => Err(SimError::Validation(format!(
            "unknown request '{}' (expected state, catalog [category], action <name>, reset, quit)",
            verb
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_verb() {
        assert_eq!(parse_request("state").unwrap(), Request::State);
        assert_eq!(parse_request("  catalog  ").unwrap(), Request::Catalog(None));
        assert_eq!(
            parse_request("catalog food").unwrap(),
            Request::Catalog(Some("food".into()))
        );
        assert_eq!(
            parse_request("ACTION rest").unwrap(),
            Request::Action("rest".into())
        );
        assert_eq!(parse_request("reset").unwrap(), Request::Reset);
        assert_eq!(parse_request("q").unwrap(), Request::Quit);
    }

    #[test]
    fn test_malformed_requests_are_validation_errors() {
        for line in ["", "   ", "action", "state now", "dance", "action rest twice"] {
            let err = parse_request(line).unwrap_err();
            assert_eq!(err.kind(), "ValidationError", "line {:?}", line);
        }
    }
}
