//! Boundary shell
//!
//! Line-oriented request/response protocol over a session:
//! raw line -> parse_request -> Request -> CommandExecutor -> Response (JSON)

pub mod executor;
pub mod resolver;

pub use executor::{CommandExecutor, ErrorBody, ExecutionResult, Response};
pub use resolver::{parse_request, Request};
