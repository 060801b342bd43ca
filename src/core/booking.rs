use crate::adapters::http::HttpSubmitter;
use crate::core::guard::SlotGuard;
use crate::core::slots::TimeSlots;
use crate::core::{
    BookingOutcome, ConfigProvider, ReservationForm, ReservationRequest, ReservationSlotKey,
    Storage, SubmissionStatus, Submitter,
};
use crate::utils::error::{ReservationError, Result};
use crate::utils::validation::{validate_date, validate_time_slot, PhonePattern};
use std::time::Duration;

/// Form submit handler: validates fields, books the slot locally, then POSTs
/// the reservation. A failed POST never releases the local booking.
pub struct ReservationService<S: Storage, C: ConfigProvider, U: Submitter = HttpSubmitter> {
    guard: SlotGuard<S>,
    config: C,
    submitter: U,
    slots: TimeSlots,
    phone: PhonePattern,
}

impl<S: Storage, C: ConfigProvider> ReservationService<S, C, HttpSubmitter> {
    pub async fn load(storage: S, config: C) -> Result<Self> {
        let submitter = HttpSubmitter::new(config.submission_endpoint())
            .with_timeout(Duration::from_secs(config.submission_timeout_seconds()));
        Self::with_submitter(storage, config, submitter).await
    }
}

impl<S: Storage, C: ConfigProvider, U: Submitter> ReservationService<S, C, U> {
    pub async fn with_submitter(storage: S, config: C, submitter: U) -> Result<Self> {
        let slots = TimeSlots::new(config.start_hour(), config.end_hour());
        let phone = PhonePattern::new(config.phone_min_digits(), config.phone_max_digits())?;
        let guard = SlotGuard::load(storage, config.storage_entry()).await?;

        Ok(Self {
            guard,
            config,
            submitter,
            slots,
            phone,
        })
    }

    pub fn slots(&self) -> &TimeSlots {
        &self.slots
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn is_reserved(&self, date: &str, time: &str) -> bool {
        self.guard.is_reserved(date, time)
    }

    pub fn reserved_keys(&self) -> Vec<ReservationSlotKey> {
        self.guard.store().keys().cloned().collect()
    }

    /// Runs every check `reserve` runs, without booking anything.
    pub fn check(&self, form: &ReservationForm) -> Result<ReservationRequest> {
        self.validate_fields(form)?;

        if self.guard.is_reserved(&form.date, &form.time) {
            return Err(ReservationError::SlotTaken {
                key: ReservationSlotKey::new(&form.date, &form.time).to_string(),
            });
        }

        Ok(ReservationRequest::from(form.clone()))
    }

    /// Validates the form and books the slot. Once this returns `Ok` the slot
    /// is final on this client.
    pub async fn reserve(&mut self, form: ReservationForm) -> Result<ReservationRequest> {
        self.validate_fields(&form)?;
        self.guard.try_reserve(&form.date, &form.time).await?;
        Ok(ReservationRequest::from(form))
    }

    pub async fn submit(&self, request: &ReservationRequest) -> Result<serde_json::Value> {
        tracing::debug!(
            "Submitting reservation {} to {}",
            request.slot_key(),
            self.config.submission_endpoint()
        );

        match self.submitter.submit(request).await {
            Ok(body) => {
                tracing::info!("📨 Reservation {} accepted by remote", request.slot_key());
                tracing::debug!("Remote response: {}", body);
                Ok(body)
            }
            Err(e) => {
                tracing::warn!(
                    "⚠️ Reservation {} kept locally but submission failed: {}",
                    request.slot_key(),
                    e
                );
                Err(e)
            }
        }
    }

    /// `reserve` followed by `submit`.
    pub async fn book(&mut self, form: ReservationForm) -> Result<BookingOutcome> {
        let request = self.reserve(form).await?;
        let key = request.slot_key();

        let submission = match self.submit(&request).await {
            Ok(body) => SubmissionStatus::Accepted(body),
            Err(e) => SubmissionStatus::Failed(e),
        };

        Ok(BookingOutcome {
            key,
            request,
            submission,
        })
    }

    fn validate_fields(&self, form: &ReservationForm) -> Result<()> {
        validate_date(&form.date)?;
        validate_time_slot(&self.slots, &form.time)?;
        self.phone.validate(&form.phone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::guard::tests::MockStorage;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockConfig {
        start_hour: u32,
        end_hour: u32,
        phone_min_digits: usize,
        phone_max_digits: usize,
        endpoint: String,
        entry: String,
    }

    impl MockConfig {
        fn extended() -> Self {
            Self {
                start_hour: 8,
                end_hour: 20,
                phone_min_digits: 8,
                phone_max_digits: 13,
                endpoint: "http://test.com/api/Insert".to_string(),
                entry: "reservations".to_string(),
            }
        }

        fn standard() -> Self {
            Self {
                end_hour: 19,
                phone_max_digits: 11,
                ..Self::extended()
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn start_hour(&self) -> u32 {
            self.start_hour
        }

        fn end_hour(&self) -> u32 {
            self.end_hour
        }

        fn phone_min_digits(&self) -> usize {
            self.phone_min_digits
        }

        fn phone_max_digits(&self) -> usize {
            self.phone_max_digits
        }

        fn submission_endpoint(&self) -> &str {
            &self.endpoint
        }

        fn storage_entry(&self) -> &str {
            &self.entry
        }
    }

    #[derive(Clone, Default)]
    struct MockSubmitter {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl MockSubmitter {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Submitter for MockSubmitter {
        async fn submit(&self, request: &ReservationRequest) -> Result<serde_json::Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ReservationError::SubmissionFailed {
                    status: Some(500),
                    message: "HTTP 500 Internal Server Error".to_string(),
                });
            }
            Ok(serde_json::json!({ "ok": true, "fecha": request.date }))
        }
    }

    fn form(date: &str, time: &str, phone: &str) -> ReservationForm {
        ReservationForm {
            first_name: "Ana".to_string(),
            last_name: "López".to_string(),
            email: "ana@example.com".to_string(),
            phone: phone.to_string(),
            date: date.to_string(),
            time: time.to_string(),
        }
    }

    async fn service(
        storage: MockStorage,
        config: MockConfig,
        submitter: MockSubmitter,
    ) -> ReservationService<MockStorage, MockConfig, MockSubmitter> {
        ReservationService::with_submitter(storage, config, submitter)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_book_commits_and_submits() {
        let storage = MockStorage::new();
        let submitter = MockSubmitter::default();
        let mut service = service(storage.clone(), MockConfig::extended(), submitter.clone()).await;

        let outcome = service
            .book(form("2025-06-01", "9:00 AM", "55551234"))
            .await
            .unwrap();

        assert_eq!(outcome.key.as_str(), "2025-06-01T9:00 AM");
        assert!(outcome.submission.is_accepted());
        assert_eq!(outcome.request.first_name, "Ana");
        assert_eq!(submitter.calls(), 1);
        assert_eq!(storage.writes(), 1);
        assert_eq!(service.reserved_keys(), vec![outcome.key]);
    }

    #[tokio::test]
    async fn test_duplicate_booking_sends_nothing() {
        let storage = MockStorage::new();
        let submitter = MockSubmitter::default();
        let mut service = service(storage.clone(), MockConfig::extended(), submitter.clone()).await;

        service
            .book(form("2025-06-01", "9:00 AM", "55551234"))
            .await
            .unwrap();
        let err = service
            .book(form("2025-06-01", "9:00 AM", "99998888"))
            .await
            .unwrap_err();

        assert!(matches!(err, ReservationError::SlotTaken { .. }));
        assert_eq!(submitter.calls(), 1);
        assert_eq!(storage.writes(), 1);
    }

    #[tokio::test]
    async fn test_validation_order_and_no_side_effects() {
        let storage = MockStorage::new();
        let submitter = MockSubmitter::default();
        let mut service = service(storage.clone(), MockConfig::extended(), submitter.clone()).await;

        // 日期先檢查，其次是時間，最後是電話
        let err = service.book(form("", "", "12")).await.unwrap_err();
        assert!(matches!(err, ReservationError::MissingDate));

        let err = service.book(form("2025-06-01", "", "12")).await.unwrap_err();
        assert!(matches!(err, ReservationError::MissingTime));

        let err = service
            .book(form("2025-06-01", "9:00 AM", "12345"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReservationError::InvalidPhoneFormat { min: 8, max: 13 }
        ));

        let err = service
            .book(form("2025-06-01", "9:30 AM", "55551234"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::UnknownTimeSlot { .. }));

        assert_eq!(storage.writes(), 0);
        assert_eq!(submitter.calls(), 0);
        assert!(service.reserved_keys().is_empty());
    }

    #[tokio::test]
    async fn test_unpadded_date_cannot_book_the_same_slot_twice() {
        let storage = MockStorage::new();
        let submitter = MockSubmitter::default();
        let mut service = service(storage.clone(), MockConfig::extended(), submitter.clone()).await;

        service
            .book(form("2025-06-01", "9:00 AM", "55551234"))
            .await
            .unwrap();
        let err = service
            .book(form("2025-6-1", "9:00 AM", "55551234"))
            .await
            .unwrap_err();

        assert!(matches!(err, ReservationError::InvalidDate { .. }));
        assert_eq!(storage.writes(), 1);
        assert_eq!(submitter.calls(), 1);
        assert_eq!(service.reserved_keys().len(), 1);
    }

    #[tokio::test]
    async fn test_phone_checked_before_slot_conflict() {
        let storage =
            MockStorage::with_item("reservations", r#"{"2025-06-01T9:00 AM":true}"#).await;
        let mut service = service(storage, MockConfig::extended(), MockSubmitter::default()).await;

        let err = service
            .book(form("2025-06-01", "9:00 AM", "abc"))
            .await
            .unwrap_err();

        assert!(matches!(err, ReservationError::InvalidPhoneFormat { .. }));
    }

    #[tokio::test]
    async fn test_standard_preset_bounds() {
        let mut service = service(
            MockStorage::new(),
            MockConfig::standard(),
            MockSubmitter::default(),
        )
        .await;

        let err = service
            .book(form("2025-06-01", "9:00 AM", "123456789012"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ReservationError::InvalidPhoneFormat { min: 8, max: 11 }
        ));

        let err = service
            .book(form("2025-06-01", "7:00 PM", "55551234"))
            .await
            .unwrap_err();
        assert!(matches!(err, ReservationError::UnknownTimeSlot { .. }));

        assert!(service
            .book(form("2025-06-01", "6:00 PM", "12345678901"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_reservation() {
        let storage = MockStorage::new();
        let submitter = MockSubmitter::failing();
        let mut service = service(storage.clone(), MockConfig::extended(), submitter.clone()).await;

        let outcome = service
            .book(form("2025-06-01", "9:00 AM", "55551234"))
            .await
            .unwrap();

        assert!(matches!(
            outcome.submission,
            SubmissionStatus::Failed(ReservationError::SubmissionFailed { status: Some(500), .. })
        ));
        assert!(service.is_reserved("2025-06-01", "9:00 AM"));
        assert_eq!(
            storage.item("reservations").await.unwrap(),
            r#"{"2025-06-01T9:00 AM":true}"#
        );

        // 不會自動重試
        assert_eq!(submitter.calls(), 1);
    }

    #[tokio::test]
    async fn test_check_does_not_commit() {
        let storage = MockStorage::new();
        let mut service = service(storage.clone(), MockConfig::extended(), MockSubmitter::default()).await;
        let candidate = form("2025-06-01", "9:00 AM", "55551234");

        let request = service.check(&candidate).unwrap();
        assert_eq!(request.slot_key().as_str(), "2025-06-01T9:00 AM");
        assert_eq!(storage.writes(), 0);

        service.reserve(candidate.clone()).await.unwrap();
        assert!(matches!(
            service.check(&candidate),
            Err(ReservationError::SlotTaken { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_phone_bounds_fail_at_load() {
        let config = MockConfig {
            phone_min_digits: 12,
            phone_max_digits: 8,
            ..MockConfig::extended()
        };

        let result =
            ReservationService::with_submitter(MockStorage::new(), config, MockSubmitter::default())
                .await;

        assert!(matches!(
            result,
            Err(ReservationError::InvalidConfigValueError { .. })
        ));
    }
}
