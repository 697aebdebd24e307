//! Client workflow subsystem.
//!
//! # Data Flow
//! ```text
//! connect identity → select file → begin processing
//!     → POST /upload (gateway)   → CID
//!     → minter.mint(recipient, CID) → receipt
//!     → Minted (terminal until reset)
//! any failure → back to FileSelected with the error recorded
//! ```
//!
//! Decode lookups run independently of the mint cycle.

pub mod controller;

pub use controller::{
    MintWorkflow, PipelineDriver, PipelineOutcome, SelectedFile, WorkflowError, WorkflowState,
};
