use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// `date + "T" + time`, compared byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationSlotKey(String);

impl ReservationSlotKey {
    pub const SEPARATOR: char = 'T';

    pub fn new(date: &str, time: &str) -> Self {
        Self(format!("{}{}{}", date, Self::SEPARATOR, time))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReservationSlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Slots already booked from this client. Serialized as a flat JSON object of
/// key to `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationStore {
    slots: BTreeMap<ReservationSlotKey, bool>,
}

impl ReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// 只有值為 true 才算已預約
    pub fn contains(&self, key: &ReservationSlotKey) -> bool {
        self.slots.get(key).copied().unwrap_or(false)
    }

    /// Marks `key` as booked. Returns `false` without touching the map when it
    /// is already booked.
    pub fn try_reserve(&mut self, key: &ReservationSlotKey) -> bool {
        if self.contains(key) {
            return false;
        }
        self.slots.insert(key.clone(), true);
        true
    }

    pub(crate) fn release(&mut self, key: &ReservationSlotKey) {
        self.slots.remove(key);
    }

    pub fn keys(&self) -> impl Iterator<Item = &ReservationSlotKey> {
        self.slots
            .iter()
            .filter(|(_, booked)| **booked)
            .map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.keys().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Raw field values as entered in the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date: String,
    pub time: String,
}

/// Validated booking, sent as the POST body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "correo_electronico")]
    pub email: String,
    #[serde(rename = "numero_telefono")]
    pub phone: String,
    #[serde(rename = "fecha")]
    pub date: String,
    #[serde(rename = "hora")]
    pub time: String,
}

impl ReservationRequest {
    pub fn slot_key(&self) -> ReservationSlotKey {
        ReservationSlotKey::new(&self.date, &self.time)
    }
}

impl From<ReservationForm> for ReservationRequest {
    fn from(form: ReservationForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            phone: form.phone,
            date: form.date,
            time: form.time,
        }
    }
}

#[derive(Debug)]
pub enum SubmissionStatus {
    Accepted(serde_json::Value),
    Failed(crate::utils::error::ReservationError),
}

impl SubmissionStatus {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionStatus::Accepted(_))
    }
}

/// Result of a booking whose slot is already committed locally.
#[derive(Debug)]
pub struct BookingOutcome {
    pub key: ReservationSlotKey,
    pub request: ReservationRequest,
    pub submission: SubmissionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Error,
    Success,
}

/// What the form shows after a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub clear_form: bool,
}

impl Notification {
    pub fn booked() -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Éxito".to_string(),
            message: "¡Reserva realizada con éxito!".to_string(),
            clear_form: true,
        }
    }

    pub fn from_error(err: &crate::utils::error::ReservationError) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Error".to_string(),
            message: err.user_friendly_message(),
            clear_form: false,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let icon = match self.kind {
            NotificationKind::Error => "❌",
            NotificationKind::Success => "✅",
        };
        write!(f, "{} {}: {}", icon, self.title, self.message)
    }
}
