// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use thiserror::Error;

const USER_REJECTED: &str = "user rejected transaction";
const ALREADY_VERIFIED: &str = "already verified";

#[derive(Error, Debug)]
pub enum GigError {
    #[error("Please connect wallet first")]
    WalletNotConnected,

    #[error("FHE initialization failed: {0}")]
    FheInitialization(String),

    #[error("Failed to load data: {0}")]
    Load(String),

    #[error("Read failed: {0}")]
    Read(String),

    #[error("Transaction rejected")]
    UserRejected,

    #[error("Submission failed: {0}")]
    Submission(String),

    #[error("Data already verified")]
    AlreadyVerified,

    #[error("Decryption failed: {0}")]
    Decryption(String),

    #[error("{0} already in progress")]
    Busy(&'static str),

    #[error("{0}")]
    InvalidDraft(String),

    #[error("Gig '{0}' not found")]
    UnknownGig(String),
}

impl GigError {
    /// Classify a failed create submission by its message
    pub fn from_submission(err: &eyre::Report) -> Self {
        if format!("{err:#}").contains(USER_REJECTED) {
            GigError::UserRejected
        } else {
            GigError::Submission(err.to_string())
        }
    }

    /// The contract refuses a second verification of the same record
    pub fn is_already_verified(err: &eyre::Report) -> bool {
        format!("{err:#}").contains(ALREADY_VERIFIED)
    }

    /// A contract read on the decryption path failed
    pub fn read(err: eyre::Report) -> Self {
        GigError::Read(format!("{err:#}"))
    }

    /// Classify a failed verify-decryption round trip
    pub fn decryption(err: eyre::Report) -> Self {
        if Self::is_already_verified(&err) {
            GigError::AlreadyVerified
        } else {
            GigError::Decryption(format!("{err:#}"))
        }
    }

    /// Banner text for this error
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

pub type Result<T> = std::result::Result<T, GigError>;
