//! # JSON-RPC Request Definitions
//!
//! The client never talks to the network itself. It prepares JSON-RPC 2.0
//! requests for whatever transport the caller uses, and carries the
//! endpoint configuration that transport needs.
//!
//! ## Method Index
//!
//! | Method           | Params                        | Description                  |
//! |------------------|-------------------------------|------------------------------|
//! | `factoid-submit` | `{"transaction": "<hex>"}`    | Submit a signed transaction  |

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::{
    DEFAULT_FACTOMD_SERVER, DEFAULT_WALLET_SERVER, FACTOID_SUBMIT_METHOD, JSONRPC_VERSION,
};

// ---------------------------------------------------------------------------
// Request ids
// ---------------------------------------------------------------------------

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// A process-wide, strictly increasing request id.
pub fn next_request_id() -> u64 {
    NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed)
}

// ---------------------------------------------------------------------------
// RPC Method Enumeration
// ---------------------------------------------------------------------------

/// Supported JSON-RPC methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpcMethod {
    /// Submit a signed Factoid transaction.
    /// Parameters: `{"transaction": hex(marshal_binary)}`
    #[serde(rename = "factoid-submit")]
    FactoidSubmit,
}

impl RpcMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RpcMethod::FactoidSubmit => FACTOID_SUBMIT_METHOD,
        }
    }
}

// ---------------------------------------------------------------------------
// RPC Request
// ---------------------------------------------------------------------------

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    /// JSON-RPC version. Always "2.0".
    pub jsonrpc: String,
    /// Request identifier. Echoed back in the response.
    pub id: u64,
    /// The method to invoke.
    pub method: RpcMethod,
    /// Method-specific parameters.
    #[serde(default)]
    pub params: serde_json::Value,
}

impl RpcRequest {
    /// Creates a new request with an explicit id.
    pub fn new(id: u64, method: RpcMethod, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            method,
            params,
        }
    }

    /// Creates a request with the next process-wide id.
    pub fn next(method: RpcMethod, params: serde_json::Value) -> Self {
        Self::new(next_request_id(), method, params)
    }

    /// `factoid-submit` for an already encoded transaction.
    pub fn factoid_submit(transaction: &[u8]) -> Self {
        Self::next(
            RpcMethod::FactoidSubmit,
            serde_json::json!({ "transaction": hex::encode(transaction) }),
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// Endpoint configuration
// ---------------------------------------------------------------------------

/// Where the ledger node and wallet daemon listen.
///
/// Passed explicitly to whoever performs the transport; the library keeps
/// no process-wide server setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcConfig {
    pub factomd_server: String,
    pub wallet_server: String,
}

impl RpcConfig {
    pub fn new(factomd_server: impl Into<String>, wallet_server: impl Into<String>) -> Self {
        Self {
            factomd_server: factomd_server.into(),
            wallet_server: wallet_server.into(),
        }
    }

    /// JSON-RPC endpoint of the ledger node.
    pub fn factomd_url(&self) -> String {
        format!("http://{}/v2", self.factomd_server)
    }

    /// JSON-RPC endpoint of the wallet daemon.
    pub fn wallet_url(&self) -> String {
        format!("http://{}/v2", self.wallet_server)
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FACTOMD_SERVER, DEFAULT_WALLET_SERVER)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_increase() {
        let a = next_request_id();
        let b = next_request_id();
        assert!(b > a);
    }

    #[test]
    fn factoid_submit_shape() {
        let req = RpcRequest::factoid_submit(&[0xde, 0xad, 0xbe, 0xef]);
        let value: serde_json::Value = serde_json::from_str(&req.to_json().unwrap()).unwrap();

        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "factoid-submit");
        assert_eq!(value["params"]["transaction"], "deadbeef");
        assert!(value["id"].as_u64().unwrap() >= 1);
    }

    #[test]
    fn request_roundtrips_through_json() {
        let req = RpcRequest::new(7, RpcMethod::FactoidSubmit, serde_json::json!({}));
        let back: RpcRequest = serde_json::from_str(&req.to_json().unwrap()).unwrap();
        assert_eq!(back, req);
        assert_eq!(back.method.as_str(), "factoid-submit");
    }

    #[test]
    fn default_endpoints() {
        let cfg = RpcConfig::default();
        assert_eq!(cfg.factomd_server, "localhost:8088");
        assert_eq!(cfg.wallet_server, "localhost:8089");
        assert_eq!(cfg.factomd_url(), "http://localhost:8088/v2");
        assert_eq!(cfg.wallet_url(), "http://localhost:8089/v2");
    }
}
