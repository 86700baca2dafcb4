//! Per-algorithm form state.
//!
//! A form owns its inputs, its outputs and a [`FormStatus`]: the busy flag
//! that keeps a second submission out while one is in flight, and the single
//! inline notice that every action replaces. Forms never share state.

pub mod codec;
pub mod digest;
pub mod encryption;
pub mod signature;

pub use codec::{CodecForm, Direction};
pub use digest::{DigestForm, HmacForm, Pbkdf2Form};
pub use encryption::{EccForm, RsaForm, SymmetricForm};
pub use signature::{EcdsaForm, RsaSha1Form};

use crate::error::{GatewayError, GatewayResult};
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Action succeeded
    Success,
    /// Neutral information
    Info,
    /// Action failed
    Error,
}

/// The inline message a form shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Text
    pub text: String,
}

/// Read-only view of a form's busy flag, for whatever renders the control.
#[derive(Debug, Clone)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    /// Whether a request is in flight.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Marks a form busy until dropped.
#[derive(Debug)]
pub struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Busy flag plus notice.
#[derive(Debug, Default)]
pub struct FormStatus {
    busy: Arc<AtomicBool>,
    notice: Option<Notice>,
}

impl FormStatus {
    /// Whether a request is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Shareable view of the busy flag.
    #[must_use]
    pub fn busy_flag(&self) -> BusyFlag {
        BusyFlag(Arc::clone(&self.busy))
    }

    /// Current notice.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Mark the form busy and clear the notice.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Busy`] when a request is already in flight;
    /// the notice is left alone in that case.
    pub fn begin(&mut self) -> GatewayResult<InFlight> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| GatewayError::Busy)?;
        self.notice = None;
        Ok(InFlight(Arc::clone(&self.busy)))
    }

    /// Replace the notice with a success message.
    pub fn succeed(&mut self, text: impl Into<String>) {
        self.set(NoticeLevel::Success, text);
    }

    /// Replace the notice with an informational message.
    pub fn inform(&mut self, text: impl Into<String>) {
        self.set(NoticeLevel::Info, text);
    }

    /// Replace the notice with the failure text of `error`.
    pub fn fail(&mut self, error: &GatewayError) {
        self.set(NoticeLevel::Error, error.user_message());
    }

    /// Drop the notice.
    pub fn clear(&mut self) {
        self.notice = None;
    }

    /// Run one action: busy while it runs, notice replaced when it settles.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Busy`] without running `action` when the form
    /// is busy, otherwise whatever `action` returns.
    pub async fn track<T, F>(&mut self, action: F, success: impl Into<String>) -> GatewayResult<T>
    where
        F: Future<Output = GatewayResult<T>>,
    {
        let _in_flight = self.begin()?;
        let result = action.await;
        match &result {
            Ok(_) => self.succeed(success),
            Err(e) => self.fail(e),
        }
        result
    }

    fn set(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            text: text.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_rejected_until_settled() {
        let mut status = FormStatus::default();
        let flag = status.busy_flag();

        let guard = status.begin().unwrap();
        assert!(status.is_busy());
        assert!(flag.is_set());
        assert!(matches!(status.begin(), Err(GatewayError::Busy)));

        drop(guard);
        assert!(!flag.is_set());
        assert!(status.begin().is_ok());
    }

    #[test]
    fn test_notice_replaced() {
        let mut status = FormStatus::default();
        status.succeed("done");
        status.fail(&GatewayError::backend(2, Some("bad key".to_string())));
        assert_eq!(
            status.notice(),
            Some(&Notice {
                level: NoticeLevel::Error,
                text: "bad key".to_string(),
            })
        );
        status.clear();
        assert!(status.notice().is_none());
    }

    #[tokio::test]
    async fn test_track_clears_busy_on_failure() {
        let mut status = FormStatus::default();
        let result: GatewayResult<()> = status
            .track(async { Err(GatewayError::unavailable("refused")) }, "ok")
            .await;
        assert!(result.is_err());
        assert!(!status.is_busy());
        assert_eq!(status.notice().unwrap().level, NoticeLevel::Error);
        assert_eq!(status.notice().unwrap().text, "Backend unavailable: refused");
    }

    #[tokio::test]
    async fn test_busy_form_does_not_run_action() {
        let mut status = FormStatus::default();
        status.inform("previous");
        let _held = status.begin().unwrap();
        status.inform("previous");

        let mut ran = false;
        let result = status
            .track(
                async {
                    ran = true;
                    Ok(())
                },
                "ok",
            )
            .await;
        assert!(matches!(result, Err(GatewayError::Busy)));
        assert!(!ran);
        assert_eq!(status.notice().unwrap().text, "previous");
    }
}
