use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReservationError {
    #[error("No date selected")]
    MissingDate,

    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("No time selected")]
    MissingTime,

    #[error("Time '{time}' is not one of the offered slots")]
    UnknownTimeSlot { time: String },

    #[error("Phone number must contain only digits, between {min} and {max} of them")]
    InvalidPhoneFormat { min: usize, max: usize },

    #[error("Slot already reserved: {key}")]
    SlotTaken { key: String },

    #[error("Submission failed: {message}")]
    SubmissionFailed {
        status: Option<u16>,
        message: String,
    },

    #[error("Stored reservations under '{entry}' are not valid JSON: {source}")]
    StoreCorrupted {
        entry: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl From<reqwest::Error> for ReservationError {
    fn from(err: reqwest::Error) -> Self {
        ReservationError::SubmissionFailed {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 使用者輸入錯誤
    Input,
    /// 時段已被預約
    Conflict,
    /// 遠端提交失敗
    Submission,
    /// 本地儲存錯誤
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ReservationError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ReservationError::MissingDate
            | ReservationError::InvalidDate { .. }
            | ReservationError::MissingTime
            | ReservationError::UnknownTimeSlot { .. }
            | ReservationError::InvalidPhoneFormat { .. } => ErrorCategory::Input,
            ReservationError::SlotTaken { .. } => ErrorCategory::Conflict,
            ReservationError::SubmissionFailed { .. } => ErrorCategory::Submission,
            ReservationError::StoreCorrupted { .. }
            | ReservationError::IoError(_)
            | ReservationError::SerializationError(_) => ErrorCategory::Storage,
            ReservationError::ConfigValidationError { .. }
            | ReservationError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Conflict => ErrorSeverity::High,
            ErrorCategory::Submission => ErrorSeverity::Medium,
            ErrorCategory::Storage | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ReservationError::MissingDate => "Pass a date with --date (YYYY-MM-DD)".to_string(),
            ReservationError::InvalidDate { .. } => {
                "Use the ISO calendar format YYYY-MM-DD, e.g. 2025-06-01".to_string()
            }
            ReservationError::MissingTime => {
                "Pass a time with --time; run `slots` to see the options".to_string()
            }
            ReservationError::UnknownTimeSlot { .. } => {
                "Copy a label exactly as printed by `slots`, e.g. \"9:00 AM\"".to_string()
            }
            ReservationError::InvalidPhoneFormat { min, max } => {
                format!("Enter {} to {} digits without spaces or symbols", min, max)
            }
            ReservationError::SlotTaken { .. } => {
                "Choose another time; `slots --date <date>` marks the taken ones".to_string()
            }
            ReservationError::SubmissionFailed { .. } => {
                "The slot stays reserved locally; contact the clinic to confirm".to_string()
            }
            ReservationError::StoreCorrupted { .. } => {
                "Inspect or remove the storage file named in [storage].path".to_string()
            }
            ReservationError::IoError(_) => {
                "Check that the storage path exists and is writable".to_string()
            }
            ReservationError::SerializationError(_) => {
                "Report this as a bug; the reservation data could not be encoded".to_string()
            }
            ReservationError::ConfigValidationError { field, .. }
            | ReservationError::InvalidConfigValueError { field, .. } => {
                format!("Fix '{}' in the configuration file", field)
            }
        }
    }

    /// 顯示給使用者的訊息 (與網頁表單相同)
    pub fn user_friendly_message(&self) -> String {
        match self {
            ReservationError::MissingDate => "Por favor, selecciona una fecha.".to_string(),
            ReservationError::InvalidDate { value, .. } => {
                format!("La fecha '{}' no es válida.", value)
            }
            ReservationError::MissingTime => "Por favor, selecciona una hora.".to_string(),
            ReservationError::UnknownTimeSlot { time } => {
                format!("La hora '{}' no está disponible en el horario.", time)
            }
            ReservationError::InvalidPhoneFormat { min, max } => format!(
                "El número de teléfono debe contener solo números y entre {} y {} dígitos.",
                min, max
            ),
            ReservationError::SlotTaken { .. } => "Lo sentimos, ya se ha realizado una reserva para esta hora. Por favor, elige otra hora.".to_string(),
            ReservationError::SubmissionFailed { status: Some(_), .. } => {
                "Error al enviar los datos. Inténtalo de nuevo.".to_string()
            }
            ReservationError::SubmissionFailed { status: None, .. } => {
                "Error en el envío de datos. Inténtalo más tarde.".to_string()
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReservationError>;
