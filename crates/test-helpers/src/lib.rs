// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod fhe;
mod market;
mod wallet;

pub use fhe::*;
pub use market::*;
pub use wallet::*;

use gig_evm::BusinessData;
use tracing::subscriber::DefaultGuard;

pub fn add_tracing() -> DefaultGuard {
    gig_logger::add_test_tracing()
}

/// An unverified gig record with the given texts
pub fn business(name: &str, description: &str) -> BusinessData {
    BusinessData {
        name: name.to_string(),
        description: description.to_string(),
        timestamp: 1_700_000_000,
        ..BusinessData::default()
    }
}
