//! Quarry gateway entry point.
//!
//! # Purpose
//! Wires configuration, trust keys, the identity resolver, and the frame
//! registry, then starts the HTTP server.
use anyhow::{Context, Result};
use gateway::app::{build_router, AppState};
use gateway::config::GatewayConfig;
use gateway::federation::HttpFederationClient;
use gateway::observability;
use gateway::repos::RepoRegistry;
use quarry_auth::{
    FederationIdentify, IdentityResolver, NoFederation, StaticKeyRegistry, TokenVerifier,
    TrustKey, TrustStore,
};
use quarry_frames::{FrameProxy, FrameRegistry};
use std::fs;
use std::future::Future;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = GatewayConfig::from_env_or_yaml().context("gateway config")?;
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: GatewayConfig, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    observability::init_observability();
    let state = build_state(&config)?;
    let app = build_router(state);

    let addr = config.bind_addr;
    tracing::info!(%addr, is_root = config.is_root, "gateway listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tokio::pin!(shutdown);
    tokio::select! {
        result = axum::serve(listener, app.into_make_service()) => {
            result?;
        }
        _ = &mut shutdown => {}
    }
    Ok(())
}

fn build_state(config: &GatewayConfig) -> Result<AppState> {
    let self_pem = fs::read(&config.self_public_key_path)
        .with_context(|| format!("read self key: {}", config.self_public_key_path))?;
    let self_key = TrustKey::from_rsa_pem(&config.self_key_id, &self_pem)
        .context("parse self trust key")?;

    let root_key = match (&config.root_key_id, &config.root_public_key_path) {
        (Some(id), Some(path)) => {
            let pem = fs::read(path).with_context(|| format!("read root key: {path}"))?;
            Some(TrustKey::from_rsa_pem(id, &pem).context("parse root trust key")?)
        }
        _ => None,
    };

    let trust = Arc::new(TrustStore::new(self_key, root_key));
    let verifier = Arc::new(TokenVerifier::new(
        trust,
        Arc::new(StaticKeyRegistry::new()),
        60,
    ));

    let federation: Arc<dyn FederationIdentify> = match (&config.federation_url, config.is_root) {
        (Some(url), false) => Arc::new(HttpFederationClient::new(url.clone())),
        _ => Arc::new(NoFederation),
    };
    let resolver = Arc::new(IdentityResolver::new(verifier, federation, config.is_root));

    // Deployments register platform apps and repositories here at startup;
    // the registry itself is static for the process lifetime.
    let registry = FrameRegistry::new().with_apps_disabled(config.disable_apps);
    let proxy = Arc::new(FrameProxy::new(Arc::new(registry)));

    Ok(AppState {
        resolver,
        proxy,
        repos: Arc::new(RepoRegistry::new()),
        login_url: config.login_url.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> GatewayConfig {
        GatewayConfig {
            bind_addr: "127.0.0.1:0".parse().expect("bind"),
            self_key_id: "self-key".to_string(),
            self_public_key_path: format!(
                "{}/testdata/local-key.pub.pem",
                env!("CARGO_MANIFEST_DIR")
            ),
            root_key_id: None,
            root_public_key_path: None,
            federation_url: None,
            is_root: true,
            disable_apps: false,
            login_url: "/login".to_string(),
        }
    }

    #[test]
    fn build_state_loads_trust_keys() {
        let state = build_state(&test_config()).expect("state");
        assert!(state.resolver.is_root());
    }

    #[test]
    fn build_state_fails_on_missing_key_file() {
        let mut config = test_config();
        config.self_public_key_path = "/nonexistent/key.pem".to_string();
        let err = build_state(&config).err().expect("missing key");
        assert!(err.to_string().contains("read self key"));
    }

    #[tokio::test]
    async fn run_with_shutdown_starts_and_stops() {
        run_with_shutdown(test_config(), async {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        })
        .await
        .expect("run should stop cleanly");
    }
}
