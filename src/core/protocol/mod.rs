//! Request/response protocol.
//!
//! - `envelope.rs` - Wire request and response envelopes
//! - `error.rs` - Per-request error taxonomy and stable error codes
//! - `dispatcher.rs` - Routing of decoded requests to tools

mod dispatcher;
mod envelope;
mod error;

pub use dispatcher::Dispatcher;
pub use envelope::{
    ErrorBody, INVOKE_TOOL, InvokeCall, LIST_TOOLS, Operation, Outcome, RequestEnvelope,
    ResponseEnvelope, UNKNOWN_REQUEST_ID, extract_request_id,
};
pub use error::{DispatchError, ErrorCode};
