use alloy::primitives::{TxHash, U256};
use atlantis_common::ether::{calldata::Payload, submitter::Dispatch};
use serde::Serialize;
use tracing::info;

use crate::Coordinate;

/// Why a parcel was left out of a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// The resource record marks the parcel as special (1 or 2).
    Reserved {
        /// The record's `isSpecial` value.
        is_special: u64,
    },
    /// The parcel is on the ignore list.
    Ignored,
}

/// The outcome of one batch entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Broadcast to the node.
    Submitted {
        /// The transaction hash.
        tx_hash: TxHash,
        /// The nonce it was sent with.
        nonce: u64,
    },
    /// Built but not sent.
    DryRun {
        /// The nonce it would have been sent with.
        nonce: u64,
    },
    /// Deliberately left out.
    Skipped {
        /// Why.
        reason: SkipReason,
    },
    /// Building or sending the transaction failed.
    Failed {
        /// The rendered error.
        error: String,
    },
}

impl From<Dispatch> for SubmissionStatus {
    fn from(dispatch: Dispatch) -> Self {
        match dispatch {
            Dispatch::Sent { tx_hash, nonce } => Self::Submitted { tx_hash, nonce },
            Dispatch::DryRun { nonce } => Self::DryRun { nonce },
        }
    }
}

/// One entry of a batch report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Submission {
    /// Position in the batch's enumeration order.
    pub index: usize,
    /// The parcel, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
    /// The parcel's token id, when resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_id: Option<U256>,
    /// The calldata, when built.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Payload>,
    /// What happened.
    #[serde(flatten)]
    pub status: SubmissionStatus,
}

impl Submission {
    /// An entry with nothing resolved yet.
    pub fn new(index: usize, status: SubmissionStatus) -> Self {
        Self { index, coordinate: None, token_id: None, payload: None, status }
    }

    /// A failed entry.
    pub fn failed(index: usize, error: impl std::fmt::Display) -> Self {
        Self::new(index, SubmissionStatus::Failed { error: error.to_string() })
    }

    /// Attach the parcel coordinate.
    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    /// Attach the resolved token id.
    pub fn with_token_id(mut self, token_id: U256) -> Self {
        self.token_id = Some(token_id);
        self
    }

    /// Attach the built calldata.
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// The ordered record of everything a batch command did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// The command that produced the report.
    pub command: String,
    /// Entries in processing order.
    pub submissions: Vec<Submission>,
}

impl Report {
    /// An empty report for `command`.
    pub fn new(command: &str) -> Self {
        Self { command: command.to_string(), submissions: Vec::new() }
    }

    /// Append an entry.
    pub fn push(&mut self, submission: Submission) {
        self.submissions.push(submission);
    }

    fn count(&self, predicate: impl Fn(&SubmissionStatus) -> bool) -> usize {
        self.submissions.iter().filter(|s| predicate(&s.status)).count()
    }

    /// Entries broadcast to the node.
    pub fn submitted(&self) -> usize {
        self.count(|s| matches!(s, SubmissionStatus::Submitted { .. }))
    }

    /// Entries built under `--dry-run`.
    pub fn dry_runs(&self) -> usize {
        self.count(|s| matches!(s, SubmissionStatus::DryRun { .. }))
    }

    /// Entries deliberately left out.
    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, SubmissionStatus::Skipped { .. }))
    }

    /// Entries that failed.
    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, SubmissionStatus::Failed { .. }))
    }

    /// Whether any entry failed.
    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Log a one-line summary.
    pub fn log_summary(&self) {
        info!(
            "{}: {} entries, {} submitted, {} dry-run, {} skipped, {} failed",
            self.command,
            self.submissions.len(),
            self.submitted(),
            self.dry_runs(),
            self.skipped(),
            self.failed()
        );
    }
}
