//! Real-chain broadcaster over JSON-RPC.
//!
//! Transfer path: decode the envelope, derive the ed25519 signer from the
//! wallet secret, fetch the sender's seqno, sign the canonical transfer
//! body, submit, and return the node-assigned transaction hash.
//!
//! Failure taxonomy matters to callers: a timeout or connect failure is
//! [`TonvaultError::BridgeUnavailable`] (the transfer may or may not have
//! landed), an explicit RPC error object is
//! [`TonvaultError::BroadcastRejected`] (the node refused it). The core
//! never retries either — that is the operator's call.

use std::time::Duration;

use chrono::Utc;
use ed25519_dalek::Signer as _;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tonvault_types::{
    BridgeConfig, BridgeMode, ChainConfig, Result, TonvaultError, TransferEnvelope,
    TransferReceipt, TransferStatus, TxStatus,
};

use crate::broadcaster::{Broadcaster, decode_for_mode};

/// Broadcaster backed by a chain node's JSON-RPC endpoint.
pub struct ChainBroadcaster {
    client: reqwest::Client,
    rpc_url: String,
    chain: ChainConfig,
}

/// The exact bytes that get signed: compact JSON of this struct, fields in
/// declaration order. The node rebuilds the same bytes to verify.
#[derive(Debug, Serialize)]
struct TransferBody<'a> {
    chain_id: u64,
    seqno: u64,
    from: &'a str,
    to: &'a str,
    amount_nano: u64,
    fee_limit: u64,
    fee_price_nano: u64,
    comment: &'a Option<String>,
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(serde::Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: serde_json::Value,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, serde::Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, serde::Deserialize)]
struct ReceiptRow {
    success: bool,
}

impl ChainBroadcaster {
    /// Build a broadcaster against the configured node.
    ///
    /// # Errors
    /// Returns [`TonvaultError::Configuration`] if the config does not
    /// validate or the HTTP client cannot be constructed.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.rpc_timeout_ms))
            .build()
            .map_err(|e| TonvaultError::Configuration(format!("http client: {e}")))?;
        Ok(Self {
            client,
            rpc_url: config.rpc_url.clone(),
            chain: config.chain.clone(),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| TonvaultError::BridgeUnavailable {
                reason: format!("{method}: {e}"),
            })?;
        let body: RpcResponse =
            response
                .json()
                .await
                .map_err(|e| TonvaultError::BridgeUnavailable {
                    reason: format!("{method}: malformed response: {e}"),
                })?;
        if let Some(err) = body.error {
            return Err(TonvaultError::BroadcastRejected {
                reason: format!("{method}: rpc error {}: {}", err.code, err.message),
            });
        }
        Ok(serde_json::from_value(body.result)?)
    }

    async fn seqno(&self, address: &str) -> Result<u64> {
        self.call("account_seqno", serde_json::json!([address]))
            .await
    }
}

#[async_trait::async_trait]
impl Broadcaster for ChainBroadcaster {
    fn mode(&self) -> BridgeMode {
        BridgeMode::Chain
    }

    fn build_transfer(
        &self,
        from: &str,
        to: &str,
        amount_nano: u64,
        comment: Option<String>,
    ) -> Result<String> {
        TransferEnvelope {
            mode: BridgeMode::Chain,
            from: from.to_string(),
            to: to.to_string(),
            amount_nano,
            comment,
        }
        .encode()
    }

    async fn broadcast(&self, envelope: &str, secret: &[u8]) -> Result<TransferReceipt> {
        let decoded = decode_for_mode(envelope, BridgeMode::Chain)?;
        let signer = tonvault_custody::signing_key(secret)?;

        // The secret must actually own the sender address; a mismatched
        // pair would sign a transfer the node is bound to reject.
        let keys = tonvault_custody::derive_wallet(secret)?;
        if keys.address != decoded.from {
            return Err(TonvaultError::InvalidEnvelope {
                reason: format!(
                    "sender {} is not the signing key's address {}",
                    decoded.from, keys.address
                ),
            });
        }

        let seqno = self.seqno(&decoded.from).await?;
        let body = TransferBody {
            chain_id: self.chain.chain_id,
            seqno,
            from: &decoded.from,
            to: &decoded.to,
            amount_nano: decoded.amount_nano,
            fee_limit: self.chain.fee_limit,
            fee_price_nano: self.chain.fee_price_nano,
            comment: &decoded.comment,
        };
        let payload = serde_json::to_vec(&body)?;
        let signature = signer.sign(&payload);

        let submission = serde_json::json!([{
            "body": serde_json::to_value(&body)?,
            "public_key": hex::encode(signer.verifying_key().as_bytes()),
            "signature": hex::encode(signature.to_bytes()),
        }]);
        let tx_hash: String = self.call("submit_transfer", submission).await?;

        tracing::info!(
            tx_hash = %tx_hash,
            to = %decoded.to,
            amount_nano = decoded.amount_nano,
            seqno,
            "transfer broadcast"
        );
        Ok(TransferReceipt {
            tx_hash,
            network: BridgeMode::Chain,
            amount_nano: decoded.amount_nano,
            timestamp: Utc::now(),
        })
    }

    async fn transfer_status(&self, tx_hash: &str) -> Result<TransferStatus> {
        let result: serde_json::Value = self
            .call("transfer_receipt", serde_json::json!([tx_hash]))
            .await?;
        if result.is_null() {
            return Ok(TransferStatus {
                found: false,
                status: TxStatus::Pending,
            });
        }
        let receipt: ReceiptRow = serde_json::from_value(result)?;
        Ok(TransferStatus {
            found: true,
            status: if receipt.success {
                TxStatus::Success
            } else {
                TxStatus::Failed
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn broadcaster() -> ChainBroadcaster {
        // Nothing listens on port 9; connect fails fast.
        broadcaster_at("http://127.0.0.1:9")
    }

    fn broadcaster_at(url: &str) -> ChainBroadcaster {
        let mut config = BridgeConfig::chain(url);
        config.rpc_timeout_ms = 2_000;
        ChainBroadcaster::new(&config).unwrap()
    }

    const SECRET: [u8; 32] = [1u8; 32];

    fn sender_address() -> String {
        tonvault_custody::derive_wallet(&SECRET).unwrap().address
    }

    /// Minimal one-shot node stub: serves the canned JSON-RPC bodies in
    /// order, one HTTP connection per body, then exits.
    async fn stub_node(bodies: Vec<&'static str>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            use tokio::io::{AsyncReadExt, AsyncWriteExt};
            for body in bodies {
                let (mut socket, _) = listener.accept().await.unwrap();

                // Drain the request: headers first, then the advertised body.
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                let header_end = loop {
                    let n = socket.read(&mut chunk).await.unwrap();
                    assert!(n > 0, "client closed mid-request");
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                        break pos + 4;
                    }
                };
                let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
                let content_length: usize = headers
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .map_or(0, |v| v.trim().parse().unwrap());
                while buf.len() < header_end + content_length {
                    let n = socket.read(&mut chunk).await.unwrap();
                    assert!(n > 0, "client closed mid-body");
                    buf.extend_from_slice(&chunk[..n]);
                }

                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                     content-length: {}\r\nconnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
        });
        format!("http://{addr}")
    }

    #[test]
    fn envelope_carries_chain_mode() {
        let b = broadcaster();
        let envelope = b.build_transfer("EQaaaa", "EQbbbb", 7, None).unwrap();
        let decoded = TransferEnvelope::decode(&envelope).unwrap();
        assert_eq!(decoded.mode, BridgeMode::Chain);
        assert_eq!(decoded.amount_nano, 7);
    }

    #[tokio::test]
    async fn simulated_envelope_is_rejected_before_any_io() {
        let b = broadcaster();
        let envelope = TransferEnvelope {
            mode: BridgeMode::Simulated,
            from: "EQaaaa".to_string(),
            to: "EQbbbb".to_string(),
            amount_nano: 7,
            comment: None,
        }
        .encode()
        .unwrap();
        let err = b.broadcast(&envelope, &[1u8; 32]).await.unwrap_err();
        assert!(matches!(err, TonvaultError::InvalidEnvelope { .. }));
    }

    #[tokio::test]
    async fn bad_secret_is_rejected_before_any_io() {
        let b = broadcaster();
        let envelope = b.build_transfer("EQaaaa", "EQbbbb", 7, None).unwrap();
        let err = b.broadcast(&envelope, &[0u8; 16]).await.unwrap_err();
        assert!(matches!(err, TonvaultError::InvalidSecretKey { .. }));
    }

    #[tokio::test]
    async fn foreign_sender_is_rejected_before_any_io() {
        let b = broadcaster();
        // Valid secret, but the envelope claims someone else's address.
        let envelope = b.build_transfer("EQnotmine", "EQbbbb", 7, None).unwrap();
        let err = b.broadcast(&envelope, &SECRET).await.unwrap_err();
        assert!(matches!(err, TonvaultError::InvalidEnvelope { .. }));
    }

    #[tokio::test]
    async fn unreachable_node_is_bridge_unavailable() {
        let b = broadcaster();
        let envelope = b
            .build_transfer(&sender_address(), "EQbbbb", 7, None)
            .unwrap();
        let err = b.broadcast(&envelope, &SECRET).await.unwrap_err();
        assert!(matches!(err, TonvaultError::BridgeUnavailable { .. }));

        let err = b.transfer_status("0xabc").await.unwrap_err();
        assert!(matches!(err, TonvaultError::BridgeUnavailable { .. }));
    }

    #[tokio::test]
    async fn broadcast_returns_node_assigned_hash() {
        let url = stub_node(vec![
            r#"{"jsonrpc":"2.0","id":1,"result":7}"#,
            r#"{"jsonrpc":"2.0","id":1,"result":"0xfeedbeef"}"#,
        ])
        .await;
        let b = broadcaster_at(&url);
        let envelope = b
            .build_transfer(&sender_address(), "EQbbbb", 42, Some("rent".to_string()))
            .unwrap();
        let receipt = b.broadcast(&envelope, &SECRET).await.unwrap();
        assert_eq!(receipt.tx_hash, "0xfeedbeef");
        assert_eq!(receipt.network, BridgeMode::Chain);
        assert_eq!(receipt.amount_nano, 42);
    }

    #[tokio::test]
    async fn rpc_error_object_is_broadcast_rejected() {
        let url = stub_node(vec![
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"insufficient fee"}}"#,
        ])
        .await;
        let b = broadcaster_at(&url);
        let envelope = b
            .build_transfer(&sender_address(), "EQbbbb", 42, None)
            .unwrap();
        let err = b.broadcast(&envelope, &SECRET).await.unwrap_err();
        assert!(matches!(err, TonvaultError::BroadcastRejected { .. }));
        assert!(err.to_string().contains("insufficient fee"));
    }

    #[tokio::test]
    async fn missing_receipt_reads_as_pending() {
        let url = stub_node(vec![r#"{"jsonrpc":"2.0","id":1,"result":null}"#]).await;
        let b = broadcaster_at(&url);
        let status = b.transfer_status("0xabc").await.unwrap();
        assert!(!status.found);
        assert_eq!(status.status, TxStatus::Pending);
    }

    #[tokio::test]
    async fn receipt_success_flag_maps_to_status() {
        let url = stub_node(vec![
            r#"{"jsonrpc":"2.0","id":1,"result":{"success":true}}"#,
            r#"{"jsonrpc":"2.0","id":1,"result":{"success":false}}"#,
        ])
        .await;
        let b = broadcaster_at(&url);

        let confirmed = b.transfer_status("0xabc").await.unwrap();
        assert!(confirmed.found);
        assert_eq!(confirmed.status, TxStatus::Success);

        let reverted = b.transfer_status("0xdef").await.unwrap();
        assert!(reverted.found);
        assert_eq!(reverted.status, TxStatus::Failed);
    }

    #[test]
    fn signing_payload_is_deterministic() {
        let body = TransferBody {
            chain_id: 97,
            seqno: 4,
            from: "EQaaaa",
            to: "EQbbbb",
            amount_nano: 10,
            fee_limit: 21_000,
            fee_price_nano: 1_000,
            comment: &None,
        };
        let a = serde_json::to_vec(&body).unwrap();
        let b = serde_json::to_vec(&body).unwrap();
        assert_eq!(a, b);
        // Field order is fixed by the struct declaration.
        let text = String::from_utf8(a).unwrap();
        assert!(text.starts_with("{\"chain_id\":97,\"seqno\":4,"));
    }
}
