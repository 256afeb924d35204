// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

// This correlates with the information returned by `getBusinessData`.
// `category` and `status` are only populated by gateways that carry them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BusinessData {
    pub name: String,
    pub description: String,
    pub public_value1: u64,
    pub public_value2: u64,
    pub creator: Address,
    /// Epoch seconds
    pub timestamp: u64,
    pub is_verified: bool,
    /// Only meaningful once `is_verified` is set
    pub decrypted_value: u64,
    pub category: Option<String>,
    pub status: Option<String>,
}
