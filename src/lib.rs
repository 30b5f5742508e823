//! libris application library
//!
//! The in-memory catalogue core plus the HTTP feature modules that expose it.

pub mod catalogue;
pub mod modules;

use libris_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use catalogue::{LatencyProfile, Library};

/// Build a registry holding every feature module over a freshly seeded catalogue.
pub fn build_registry(settings: &Settings) -> ModuleRegistry {
    let library = Library::seeded(LatencyProfile::from_settings(&settings.catalogue));
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, &library);
    registry
}

/// Run the full module lifecycle around the HTTP server.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let registry = build_registry(&settings);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    let served = libris_http::start_server(&registry, &settings).await;

    registry.stop_modules().await?;
    served
}
