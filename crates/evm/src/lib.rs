// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

pub mod contracts;
mod gateway;
pub mod models;
mod pending;
mod wallet;

pub use contracts::{GigMarketRead, GigMarketWrite};
pub use gateway::*;
pub use models::BusinessData;
pub use pending::*;
pub use wallet::*;
