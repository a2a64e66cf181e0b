//! Gamification core: points, streaks, badges, notification fan-out

pub mod badges;
pub mod broadcast;
pub mod checkin;
pub mod dispatch;
pub mod events;
pub mod levels;
pub mod streak;

#[cfg(test)]
mod levels_test;
#[cfg(test)]
mod streak_test;

pub use broadcast::Broadcaster;
pub use checkin::CheckInService;
pub use dispatch::{NewNotification, NotificationDispatcher};
pub use events::EventService;
