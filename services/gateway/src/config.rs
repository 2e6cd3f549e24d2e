use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;

// Gateway configuration sourced from environment variables, with an
// optional YAML override file via QUARRY_CONFIG.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub self_key_id: String,
    pub self_public_key_path: String,
    pub root_key_id: Option<String>,
    pub root_public_key_path: Option<String>,
    pub federation_url: Option<String>,
    pub is_root: bool,
    pub disable_apps: bool,
    pub login_url: String,
}

#[derive(Debug, Deserialize)]
struct GatewayConfigOverride {
    bind_addr: Option<String>,
    self_key_id: Option<String>,
    self_public_key_path: Option<String>,
    root_key_id: Option<String>,
    root_public_key_path: Option<String>,
    federation_url: Option<String>,
    is_root: Option<bool>,
    disable_apps: Option<bool>,
    login_url: Option<String>,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("QUARRY_BIND")
            .unwrap_or_else(|_| "0.0.0.0:3080".to_string())
            .parse()
            .with_context(|| "parse QUARRY_BIND")?;
        let self_key_id =
            std::env::var("QUARRY_SELF_KEY_ID").with_context(|| "QUARRY_SELF_KEY_ID is required")?;
        let self_public_key_path = std::env::var("QUARRY_SELF_PUBLIC_KEY")
            .with_context(|| "QUARRY_SELF_PUBLIC_KEY is required")?;
        let root_key_id = std::env::var("QUARRY_ROOT_KEY_ID").ok();
        let root_public_key_path = std::env::var("QUARRY_ROOT_PUBLIC_KEY").ok();
        let federation_url = std::env::var("QUARRY_FEDERATION_URL").ok();
        let is_root = std::env::var("QUARRY_IS_ROOT")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let disable_apps = std::env::var("QUARRY_DISABLE_APPS")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let login_url = std::env::var("QUARRY_LOGIN_URL").unwrap_or_else(|_| "/login".to_string());
        Ok(Self {
            bind_addr,
            self_key_id,
            self_public_key_path,
            root_key_id,
            root_public_key_path,
            federation_url,
            is_root,
            disable_apps,
            login_url,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("QUARRY_CONFIG") {
            let contents =
                fs::read_to_string(&path).with_context(|| format!("read QUARRY_CONFIG: {path}"))?;
            let override_cfg: GatewayConfigOverride =
                serde_yaml::from_str(&contents).with_context(|| "parse gateway config yaml")?;
            if let Some(value) = override_cfg.bind_addr {
                config.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
            }
            if let Some(value) = override_cfg.self_key_id {
                config.self_key_id = value;
            }
            if let Some(value) = override_cfg.self_public_key_path {
                config.self_public_key_path = value;
            }
            if let Some(value) = override_cfg.root_key_id {
                config.root_key_id = Some(value);
            }
            if let Some(value) = override_cfg.root_public_key_path {
                config.root_public_key_path = Some(value);
            }
            if let Some(value) = override_cfg.federation_url {
                config.federation_url = Some(value);
            }
            if let Some(value) = override_cfg.is_root {
                config.is_root = value;
            }
            if let Some(value) = override_cfg.disable_apps {
                config.disable_apps = value;
            }
            if let Some(value) = override_cfg.login_url {
                config.login_url = value;
            }
        }
        Ok(config)
    }
}
