pub mod booking;
pub mod guard;
pub mod slots;

pub use crate::domain::model::{
    BookingOutcome, Notification, ReservationForm, ReservationRequest, ReservationSlotKey,
    ReservationStore, SubmissionStatus,
};
pub use crate::domain::ports::{ConfigProvider, Storage, Submitter};
pub use crate::utils::error::Result;
