use std::time::Duration;

use libris_kernel::settings::CatalogueSettings;

/// Catalogue calls that are delayed to mimic a remote backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListBooks,
    Reserve,
    UserProfile,
    UserReservations,
    ListUsers,
    ListReservations,
    UpdateBook,
    AddBook,
    UpdateReservationStatus,
}

impl Operation {
    fn nominal_ms(self) -> u64 {
        match self {
            Operation::ListBooks => 800,
            Operation::Reserve => 500,
            Operation::UserProfile => 600,
            Operation::UserReservations => 700,
            Operation::ListUsers => 900,
            Operation::ListReservations => 850,
            Operation::UpdateBook => 500,
            Operation::AddBook => 600,
            Operation::UpdateReservationStatus => 400,
        }
    }
}

/// How long each operation waits before touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatencyProfile {
    #[default]
    None,
    Fixed(Duration),
    Nominal,
}

impl LatencyProfile {
    pub fn from_settings(settings: &CatalogueSettings) -> Self {
        match (settings.simulate_latency, settings.fixed_latency_ms) {
            (false, _) => LatencyProfile::None,
            (true, Some(ms)) => LatencyProfile::Fixed(Duration::from_millis(ms)),
            (true, None) => LatencyProfile::Nominal,
        }
    }

    pub fn delay(&self, operation: Operation) -> Duration {
        match self {
            LatencyProfile::None => Duration::ZERO,
            LatencyProfile::Fixed(delay) => *delay,
            LatencyProfile::Nominal => Duration::from_millis(operation.nominal_ms()),
        }
    }

    /// Sleep for the operation's delay. Dropping the returned future early has
    /// no side effects.
    pub async fn wait(&self, operation: Operation) {
        let delay = self.delay(operation);
        if delay.is_zero() {
            return;
        }
        tracing::trace!(?operation, delay_ms = delay.as_millis() as u64, "simulating latency");
        tokio::time::sleep(delay).await;
    }
}
