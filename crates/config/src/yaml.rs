// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::{anyhow, Result};
use std::{fs, path::Path};

/// Read a yaml file expanding `$VAR` and `${VAR}` references from the environment.
/// A missing file surfaces the underlying `std::io::Error`.
pub fn load_yaml_with_env(file_path: &Path) -> Result<String> {
    let content = fs::read_to_string(file_path)?;
    let expanded = shellexpand::env(&content)
        .map_err(|e| anyhow!("Could not expand environment in {:?}: {e}", file_path))?;
    Ok(expanded.into_owned())
}
