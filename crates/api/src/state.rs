//! Application state

use std::sync::Arc;

use common::Config;
use engine::{Broadcaster, CheckInService, EventService, NotificationDispatcher};
use realtime::Hub;
use sqlx::PgPool;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub pool: PgPool,
    pub hub: Arc<Hub>,
    pub check_in: CheckInService,
    pub events: EventService,
    pub broadcaster: Broadcaster,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        let hub = Arc::new(Hub::new());
        let dispatcher = Arc::new(NotificationDispatcher::new(hub.clone()));
        let check_in = CheckInService::new(pool.clone(), dispatcher.clone(), config.check_in_reward);
        let events = EventService::new(pool.clone(), dispatcher.clone());
        let broadcaster =
            Broadcaster::new(pool.clone(), dispatcher.clone(), config.broadcast_chunk_size);

        Self {
            config,
            pool,
            hub,
            check_in,
            events,
            broadcaster,
        }
    }
}
