//! # Network Module
//!
//! Interfaces to the outside world. The library is transport-agnostic: it
//! builds requests and consumes collaborator traits, and leaves the actual
//! HTTP to the caller.
//!
//! ```text
//! rpc.rs   JSON-RPC request types, request ids, endpoint configuration
//! rate.rs  RateSource trait for the Factoid/EC exchange rate
//! ```

pub mod rate;
pub mod rpc;

pub use rate::{FixedRate, RateError, RateSource};
pub use rpc::{next_request_id, RpcConfig, RpcMethod, RpcRequest};
