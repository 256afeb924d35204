// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use crate::market_config::{MarketConfig, OsDirs, DEFAULT_CONFIG_NAME};
use crate::yaml::load_yaml_with_env;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use path_clean::clean;
use std::{env, path::PathBuf};
use tracing::info;

pub const ENV_PREFIX: &str = "GIGMARKET_";

pub type FindInParent = fn(&PathBuf, &str) -> Option<PathBuf>;

pub fn find_in_parent(path: &PathBuf, filename: &str) -> Option<PathBuf> {
    let mut current = PathBuf::from(path);

    loop {
        let file_path = current.join(filename);
        if file_path.exists() {
            return Some(file_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Explicit file first (relative to cwd), then the nearest file up from
/// cwd, then the OS config dir.
pub fn resolve_config_path<P: Into<PathBuf>>(
    find_in_parent: FindInParent,
    cwd: P,
    default_config_dir: P,
    default_filename: &str,
    cli_file: Option<P>,
) -> PathBuf {
    let cli_file: Option<PathBuf> = cli_file.map(Into::into);
    let default_config_dir = default_config_dir.into();
    let cwd = cwd.into();

    if let Some(cli_file) = cli_file {
        if cli_file.is_absolute() {
            return cli_file;
        }
        return clean(cwd.join(cli_file));
    }

    if let Some(found) = find_in_parent(&cwd, default_filename) {
        return found;
    }

    clean(default_config_dir.join(default_filename))
}

/// Load the config at `config_file` or the default location if not provided.
/// `GIGMARKET_`-prefixed environment variables override the file, with `__`
/// separating nested keys (eg. `GIGMARKET_STATUS__ERROR_HIDE_MS`).
pub fn load_config(config_file: Option<String>) -> Result<MarketConfig> {
    let resolved_config_path = resolve_config_path(
        find_in_parent,
        env::current_dir()?,
        OsDirs::config_dir()?,
        DEFAULT_CONFIG_NAME,
        config_file.map(PathBuf::from),
    );

    let loaded_yaml =
        load_yaml_with_env(&resolved_config_path).context("Configuration file not found")?;

    let mut config: MarketConfig = Figment::from(Serialized::defaults(MarketConfig::default()))
        .merge(Yaml::string(&loaded_yaml))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("Could not parse configuration")?;

    config.config_file = Some(resolved_config_path);
    config.validate()?;
    info!("Config loaded from: {:?}", config.config_file);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use figment::Jail;

    #[test]
    fn test_resolve_cli() -> Result<()> {
        fn not_found(_: &PathBuf, _: &str) -> Option<PathBuf> {
            None
        }
        fn found(_: &PathBuf, _: &str) -> Option<PathBuf> {
            Some(PathBuf::from("/foo/gigmarket.config.yaml"))
        }
        let path = resolve_config_path(
            not_found,
            PathBuf::from("/foo/bar"),
            PathBuf::from("/my/config"),
            "gigmarket.config.yaml",
            None,
        );
        assert_eq!(path, PathBuf::from("/my/config/gigmarket.config.yaml"));

        let path = resolve_config_path(
            found,
            PathBuf::from("/foo/bar"),
            PathBuf::from("/my/config"),
            "gigmarket.config.yaml",
            Some(PathBuf::from("/my/absolute/conf.yaml")),
        );
        assert_eq!(path, PathBuf::from("/my/absolute/conf.yaml"));

        let path = resolve_config_path(
            found,
            PathBuf::from("/foo/bar"),
            PathBuf::from("/my/config"),
            "gigmarket.config.yaml",
            Some(PathBuf::from("../conf.yaml")),
        );
        assert_eq!(path, PathBuf::from("/foo/conf.yaml"));

        let path = resolve_config_path(
            found,
            PathBuf::from("/foo/bar"),
            PathBuf::from("/my/config"),
            "gigmarket.config.yaml",
            None,
        );
        assert_eq!(path, PathBuf::from("/foo/gigmarket.config.yaml"));
        Ok(())
    }

    #[test]
    fn test_file_not_found() -> Result<()> {
        let Err(err) = load_config(Some("/nope/gigmarket.config.yaml".to_string())) else {
            bail!("error expected");
        };
        let Some(e) = err.downcast_ref::<std::io::Error>() else {
            bail!("io error expected");
        };
        assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
        Ok(())
    }

    #[test]
    fn test_config_found_in_cwd_with_env() {
        Jail::expect_with(|jail| {
            jail.set_env("GIG_RPC_HOST", "rpc.example.org");
            jail.set_env("GIGMARKET_PAGE_SIZE", "3");
            jail.set_env("GIGMARKET_STATUS__ERROR_HIDE_MS", "4500");
            jail.create_file(
                "gigmarket.config.yaml",
                r#"
rpc_url: "https://${GIG_RPC_HOST}/v1"
contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3"
page_size: 8
"#,
            )?;

            let config = load_config(None).map_err(|e| e.to_string())?;
            assert_eq!(config.rpc_url, "https://rpc.example.org/v1");
            assert_eq!(config.page_size, 3);
            assert_eq!(config.status.error_hide_ms, 4500);
            assert_eq!(config.status.success_hide_ms, 2000);
            assert!(config
                .config_file
                .is_some_and(|p| p.ends_with("gigmarket.config.yaml")));
            Ok(())
        });
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("gigmarket.config.yaml", "rpc_url: \"http://localhost:8545\"\n")?;
            let err = load_config(None).unwrap_err();
            assert!(err.to_string().contains("contract_address"));
            Ok(())
        });
    }
}
