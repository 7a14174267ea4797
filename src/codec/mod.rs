//! Wire encodings of A2A operations

pub mod jsonrpc;

pub use jsonrpc::JsonRpcCodec;

use bytes::Bytes;

use crate::{
    protocol::{error::A2AError, operation::A2AOperation},
    service::response::A2AResponse,
};

/// Turns operations into request bodies and response bodies into answers
///
/// Envelopes and error objects stay inside the codec; the protocol service
/// only moves bytes.
pub trait Codec: Send + Sync {
    /// Body for `operation`, empty when it is sent without one
    fn encode_request(&self, operation: &A2AOperation) -> Result<Bytes, A2AError>;

    /// Answer to `operation` carried by `body`
    ///
    /// Error objects in the body decode to the matching [`A2AError`].
    fn decode_response(&self, body: &[u8], operation: &A2AOperation)
        -> Result<A2AResponse, A2AError>;

    /// Media type of encoded bodies
    fn content_type(&self) -> &str;
}
