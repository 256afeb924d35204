// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

mod controller;
mod draft;
mod error;
mod events;
pub mod history;
mod models;
mod setup;
mod status;
pub mod view;

pub use controller::*;
pub use draft::*;
pub use error::*;
pub use events::*;
pub use history::{format_age, ActivityHistory};
pub use models::*;
pub use setup::*;
pub use status::*;
pub use view::Page;
