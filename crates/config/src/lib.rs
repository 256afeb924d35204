// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

pub mod load_config;
mod market_config;
pub mod rpc;
mod yaml;

pub use load_config::load_config;
pub use market_config::*;
pub use rpc::*;
