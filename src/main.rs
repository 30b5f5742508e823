use anyhow::Context;
use libris_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load libris settings")?;
    libris_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        simulate_latency = settings.catalogue.simulate_latency,
        "libris-app bootstrap starting"
    );

    libris_app::run(settings).await
}
