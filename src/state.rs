use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::{Config, ReferenceTimeMode};
use crate::services::schedule::ReferenceClock;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub clock: ReferenceClock,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        let clock = match config.reference_time {
            ReferenceTimeMode::PerRequest => ReferenceClock::PerRequest,
            ReferenceTimeMode::ProcessStart => ReferenceClock::fixed_at_startup(),
        };

        Self {
            db,
            config: Arc::new(config),
            clock,
        }
    }

    /// Replace the reference clock, e.g. to pin "now" in tests.
    pub fn with_clock(mut self, clock: ReferenceClock) -> Self {
        self.clock = clock;
        self
    }
}
