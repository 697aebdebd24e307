//! End-to-end workflow controller.
//!
//! # Responsibilities
//! - Enforce the minting cycle's state machine, including single-flight
//!   while a cycle is processing
//! - Drive upload (through the gateway) then mint in strict sequence
//! - Keep the selected file available for retry after a failure
//!
//! # Design Decisions
//! - Failure is transient: the controller lands back on FileSelected
//!   with the error recorded, never in an ambiguous "maybe minted" state
//! - A receipt is only surfaced once inclusion is confirmed

use alloy::primitives::Address;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::blockchain::{MintError, MintReceipt, MintRequest, Minter};

/// Errors raised by the workflow controller.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Identity connection failed; the workflow stays Idle.
    #[error("identity connection rejected: {0}")]
    IdentityRejected(String),

    /// An identity is already connected for this cycle.
    #[error("identity already connected")]
    AlreadyConnected,

    /// No identity has been connected yet.
    #[error("no identity connected")]
    NotConnected,

    /// No file has been selected yet.
    #[error("no file selected")]
    NoFileSelected,

    /// A mint cycle is already in flight.
    #[error("a mint cycle is already processing")]
    AlreadyProcessing,

    /// The cycle already minted; reset to start another.
    #[error("cycle already minted; reset to start a new one")]
    AlreadyMinted,

    /// The gateway upload step failed.
    #[error("upload failed: {0}")]
    Upload(String),

    /// The mint step failed.
    #[error("mint failed: {0}")]
    Mint(#[from] MintError),

    /// The decode lookup failed.
    #[error("decode lookup failed: {0}")]
    Decode(String),
}

/// States of one minting cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    IdentityConnected,
    FileSelected,
    Processing,
    Minted,
}

/// A file chosen for upload, held for retry across failed attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// State machine for one user-facing minting cycle.
#[derive(Debug)]
pub struct MintWorkflow {
    session_id: Uuid,
    state: WorkflowState,
    wallet_address: Option<String>,
    selected: Option<SelectedFile>,
    receipt: Option<MintReceipt>,
    last_error: Option<String>,
}

impl MintWorkflow {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            state: WorkflowState::Idle,
            wallet_address: None,
            selected: None,
            receipt: None,
            last_error: None,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn wallet_address(&self) -> Option<&str> {
        self.wallet_address.as_deref()
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn receipt(&self) -> Option<&MintReceipt> {
        self.receipt.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// `Idle → IdentityConnected` on a well-formed account identifier.
    ///
    /// A rejected connection keeps the workflow Idle.
    pub fn connect_identity(&mut self, address: &str) -> Result<(), WorkflowError> {
        if self.state != WorkflowState::Idle {
            return Err(WorkflowError::AlreadyConnected);
        }
        let parsed: Address = address
            .parse()
            .map_err(|e| WorkflowError::IdentityRejected(format!("{}: {}", address, e)))?;
        self.wallet_address = Some(parsed.to_string());
        self.state = WorkflowState::IdentityConnected;
        tracing::debug!(session_id = %self.session_id, address = %parsed, "Identity connected");
        Ok(())
    }

    /// `IdentityConnected → FileSelected`; reselection is allowed.
    ///
    /// No validation of file type or size; that is left to the storage
    /// provider.
    pub fn select_file(&mut self, name: &str, bytes: Vec<u8>) -> Result<(), WorkflowError> {
        match self.state {
            WorkflowState::Idle => Err(WorkflowError::NotConnected),
            WorkflowState::Processing => Err(WorkflowError::AlreadyProcessing),
            WorkflowState::Minted => Err(WorkflowError::AlreadyMinted),
            WorkflowState::IdentityConnected | WorkflowState::FileSelected => {
                self.selected = Some(SelectedFile {
                    name: name.to_string(),
                    bytes,
                });
                self.state = WorkflowState::FileSelected;
                Ok(())
            }
        }
    }

    /// `FileSelected → Processing`; enforces single-flight.
    pub fn begin_processing(&mut self) -> Result<(), WorkflowError> {
        match self.state {
            WorkflowState::Processing => Err(WorkflowError::AlreadyProcessing),
            WorkflowState::Minted => Err(WorkflowError::AlreadyMinted),
            WorkflowState::Idle => Err(WorkflowError::NotConnected),
            WorkflowState::IdentityConnected => Err(WorkflowError::NoFileSelected),
            WorkflowState::FileSelected => {
                self.last_error = None;
                self.state = WorkflowState::Processing;
                Ok(())
            }
        }
    }

    /// `Processing → Minted` with a confirmed receipt.
    pub fn complete(&mut self, receipt: MintReceipt) {
        debug_assert!(receipt.confirmed);
        self.receipt = Some(receipt);
        self.state = WorkflowState::Minted;
    }

    /// `Processing → FileSelected`, recording the failure.
    ///
    /// The previously selected file remains selectable for retry.
    pub fn fail(&mut self, reason: String) {
        tracing::warn!(session_id = %self.session_id, reason = %reason, "Mint cycle failed");
        self.last_error = Some(reason);
        self.state = WorkflowState::FileSelected;
    }

    /// Manual reset back to `Idle`, clearing the whole cycle.
    pub fn reset(&mut self) {
        self.state = WorkflowState::Idle;
        self.wallet_address = None;
        self.selected = None;
        self.receipt = None;
        self.last_error = None;
    }
}

impl Default for MintWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a completed upload-and-mint cycle.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub cid: String,
    pub receipt: MintReceipt,
}

#[derive(Deserialize)]
struct GatewayUploadResponse {
    cid: String,
}

#[derive(Deserialize)]
struct GatewayDecodeResponse {
    #[serde(rename = "decodedInput")]
    decoded_input: String,
}

/// Driver running the upload-then-mint sequence for a workflow.
pub struct PipelineDriver {
    gateway_url: String,
    client: reqwest::Client,
    minter: Minter,
}

impl PipelineDriver {
    pub fn new(gateway_url: String, minter: Minter) -> Self {
        Self {
            gateway_url: gateway_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            minter,
        }
    }

    /// Run upload then mint in strict sequence.
    ///
    /// On any failure the workflow returns to `FileSelected`; a fresh
    /// attempt re-pins the file (the previous CID is not reused).
    pub async fn upload_and_mint(
        &self,
        workflow: &mut MintWorkflow,
    ) -> Result<PipelineOutcome, WorkflowError> {
        let recipient = workflow
            .wallet_address()
            .ok_or(WorkflowError::NotConnected)?
            .to_string();
        let file = workflow
            .selected_file()
            .cloned()
            .ok_or(WorkflowError::NoFileSelected)?;
        workflow.begin_processing()?;

        tracing::info!(
            session_id = %workflow.session_id(),
            filename = %file.name,
            recipient = %recipient,
            "Mint cycle started"
        );

        let cid = match self.upload(&file).await {
            Ok(cid) => cid,
            Err(e) => {
                workflow.fail(e.to_string());
                return Err(e);
            }
        };

        let request = MintRequest {
            recipient,
            cid: cid.clone(),
        };
        match self.minter.mint(&request).await {
            Ok(receipt) => {
                workflow.complete(receipt.clone());
                Ok(PipelineOutcome { cid, receipt })
            }
            Err(e) => {
                workflow.fail(e.to_string());
                Err(WorkflowError::Mint(e))
            }
        }
    }

    async fn upload(&self, file: &SelectedFile) -> Result<String, WorkflowError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/upload", self.gateway_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| WorkflowError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(WorkflowError::Upload(format!(
                "gateway returned {}: {}",
                status, detail
            )));
        }

        let body: GatewayUploadResponse = response
            .json()
            .await
            .map_err(|e| WorkflowError::Upload(e.to_string()))?;
        Ok(body.cid)
    }

    /// Look up decoded call data for a user-supplied transaction hash.
    ///
    /// Independent of the minting cycle; no state-machine coupling.
    pub async fn decode(&self, tx_hash: &str) -> Result<String, WorkflowError> {
        let response = self
            .client
            .get(format!("{}/decode-input", self.gateway_url))
            .query(&[("txHash", tx_hash)])
            .send()
            .await
            .map_err(|e| WorkflowError::Decode(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(WorkflowError::Decode(format!(
                "gateway returned {}: {}",
                status, detail
            )));
        }

        let body: GatewayDecodeResponse = response
            .json()
            .await
            .map_err(|e| WorkflowError::Decode(e.to_string()))?;
        Ok(body.decoded_input)
    }
}
