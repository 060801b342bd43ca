pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::{http::HttpSubmitter, storage::LocalStorage};
pub use crate::config::{toml_config::TomlConfig, Preset};
pub use crate::core::{booking::ReservationService, guard::SlotGuard, slots::TimeSlots};
pub use crate::domain::model::{
    BookingOutcome, Notification, ReservationForm, ReservationRequest, ReservationSlotKey,
    ReservationStore, SubmissionStatus,
};
pub use crate::utils::error::{ReservationError, Result};
