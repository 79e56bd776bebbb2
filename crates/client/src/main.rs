//! BlockHaven client - composition root binary.

use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blockhaven_client::application::api::Api;
use blockhaven_client::application::auth::AuthSession;
use blockhaven_client::infrastructure::{platform::create_platform, ApiAdapter, ClientConfig};
use blockhaven_client::ui::Services;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blockhaven_client=debug,dioxus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    let config = ClientConfig::from_env();
    tracing::info!(api_url = %config.api_url, "Starting BlockHaven client");

    // Platform
    let platform = create_platform();

    // Auth session restored from storage; the HTTP adapter reads its token per request.
    let auth = AuthSession::restore(config.auth.clone(), platform.storage());

    // HTTP
    let raw_api = ApiAdapter::new(&config.api_url, config.request_timeout_ms)
        .with_token_source(Arc::new(auth.clone()));
    let api = Api::new(Arc::new(raw_api));

    let services = Services::new(api, &platform, auth, config.map_url.clone());

    // Launch Dioxus
    #[allow(unused_mut)]
    let mut builder = dioxus::LaunchBuilder::new();

    #[cfg(not(target_arch = "wasm32"))]
    {
        let window = dioxus::desktop::WindowBuilder::new().with_title("BlockHaven");
        builder = builder.with_cfg(dioxus::desktop::Config::new().with_window(window));
    }

    builder
        .with_context(platform)
        .with_context(services)
        .launch(blockhaven_client::app);
}
