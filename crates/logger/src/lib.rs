// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod logger;
pub mod telemetry;

pub use logger::*;
pub use telemetry::{add_test_tracing, log_level, setup_simple_tracing, setup_tracing};
