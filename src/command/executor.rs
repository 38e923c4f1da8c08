//! Request execution - runs a resolved request against a session

use crate::actions::catalog::{ActionId, CatalogView};
use crate::command::resolver::{parse_request, Request};
use crate::core::error::{Result, SimError};
use crate::entity::affect::Dimension;
use crate::simulation::engine::{Session, SessionSnapshot, TransitionReport};
use serde::Serialize;
use std::collections::BTreeMap;

/// Structured error carried by a failed response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
}

/// One protocol response; absent fields are omitted from the JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,
    /// Published dimensions only; internal ones stay inside the engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<BTreeMap<Dimension, f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wanting: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<ActionId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clock_hours: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<CatalogView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
}

impl Response {
    pub fn snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            ok: true,
            state: Some(snapshot.state.published()),
            wanting: Some(snapshot.wanting),
            history: Some(snapshot.history),
            clock_hours: Some(snapshot.clock_hours),
            viable: Some(snapshot.viable),
            catalog: Some(snapshot.catalog),
            ..Self::default()
        }
    }

    pub fn catalog(catalog: CatalogView) -> Self {
        Self {
            ok: true,
            catalog: Some(catalog),
            ..Self::default()
        }
    }

    pub fn error(err: &SimError) -> Self {
        Self {
            ok: false,
            error: Some(ErrorBody {
                kind: err.kind(),
                message: err.to_string(),
            }),
            ..Self::default()
        }
    }

    pub fn closed() -> Self {
        Self {
            ok: true,
            closed: Some(true),
            ..Self::default()
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Outcome of handling one line
#[derive(Debug)]
pub struct ExecutionResult {
    pub response: Response,
    /// The client asked to end the session
    pub quit: bool,
}

/// Executes requests against a session
pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute a resolved request
    pub fn execute(session: &mut Session, request: &Request) -> Response {
        match Self::try_execute(session, request) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("{:?} rejected: {}", request, err);
                Response::error(&err)
            }
        }
    }

    /// Parse and execute one raw protocol line
    pub fn handle_line(session: &mut Session, line: &str) -> ExecutionResult {
        match parse_request(line) {
            Ok(request) => ExecutionResult {
                response: Self::execute(session, &request),
                quit: request == Request::Quit,
            },
            Err(err) => {
                tracing::warn!("malformed request {:?}: {}", line.trim(), err);
                ExecutionResult {
                    response: Response::error(&err),
                    quit: false,
                }
            }
        }
    }

    fn try_execute(session: &mut Session, request: &Request) -> Result<Response> {
        match request {
            Request::State => Ok(Response::snapshot(session.get_state())),
            Request::Catalog(category) => {
                Ok(Response::catalog(session.list_actions(category.as_deref())?))
            }
            Request::Action(name) => {
                let transition = session.apply(name)?;
                let mut response = Response::snapshot(transition.snapshot);
                response.transition = Some(transition.report);
                Ok(response)
            }
            Request::Reset => Ok(Response::snapshot(session.reset())),
            Request::Quit => Ok(Response::closed()),
        }
    }
}
