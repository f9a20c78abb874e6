//! Scan session controller.
//!
//! Owns the lifecycle of one scan attempt at a time:
//!
//! ```text
//! Idle --submit(valid)--> Scanning --success--> Done
//!                         Scanning --failure--> Idle (error set)
//! any  --submit(invalid)--> Idle (validation error set, outcome cleared)
//! any  --reset_for_new_scan--> Idle
//! ```
//!
//! The session is published through a [`watch`] channel so a view can follow
//! progress while the controller is suspended on the scan request. The
//! progress simulator is always detached before the published status leaves
//! `Scanning`.

use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    config::ProgressConfig,
    error::{ScanError, TransportError},
    model::{ScanLevel, ScanResult, ScanSession, SessionStatus},
    normalize::normalize_scan,
    progress::ProgressSimulator,
    service::{RawResponse, ScanRequest, ScanService},
    validate::{INVALID_TARGET_MESSAGE, is_valid_target},
};

pub struct ScanController<S> {
    service: S,
    progress: ProgressConfig,
    state: watch::Sender<ScanSession>,
    simulator: Option<ProgressSimulator>,
}

/// Maps the outcome of a scan exchange to a result or a user facing error.
pub fn interpret_scan_response(
    outcome: Result<RawResponse, TransportError>,
    request: &ScanRequest,
) -> Result<ScanResult, ScanError> {
    let response = outcome?;

    let Ok(body) = serde_json::from_str::<Value>(&response.body) else {
        return Err(ScanError::ResponseParse);
    };

    if !response.is_success() {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .map(ToString::to_string)
            .unwrap_or_else(|| format!("Scan failed (HTTP {})", response.status));

        return Err(ScanError::Service(message));
    }

    Ok(normalize_scan(&body, &request.target, request.level))
}

impl<S: ScanService> ScanController<S> {
    pub fn new(service: S, progress: ProgressConfig) -> Self {
        let (state, _) = watch::channel(ScanSession::default());

        Self {
            service,
            progress,
            state,
            simulator: None,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Follows every published change of the session.
    pub fn subscribe(&self) -> watch::Receiver<ScanSession> {
        self.state.subscribe()
    }

    pub fn session(&self) -> ScanSession {
        self.state.borrow().clone()
    }

    pub fn is_progress_running(&self) -> bool {
        self.simulator
            .as_ref()
            .is_some_and(ProgressSimulator::is_attached)
    }

    fn stop_progress(&mut self) {
        if let Some(mut simulator) = self.simulator.take() {
            simulator.detach();
        }
    }

    /// Runs one scan attempt to its terminal state.
    ///
    /// The outcome is also recorded in the published session; the returned
    /// error is the same one the session's `error` (or `validation_error`)
    /// describes.
    pub async fn submit(&mut self, target: &str, level: ScanLevel) -> Result<(), ScanError> {
        self.stop_progress();

        let target = target.trim().to_string();

        if !is_valid_target(&target) {
            warn!(url = %target, "rejecting invalid scan target");

            self.state.send_modify(|session| {
                session.target = target.clone();
                session.level = level;
                session.status = SessionStatus::Idle;
                session.progress = 0;
                session.result = None;
                session.error = None;
                session.validation_error = Some(INVALID_TARGET_MESSAGE.to_string());
            });

            return Err(ScanError::Validation(INVALID_TARGET_MESSAGE.to_string()));
        }

        self.state.send_modify(|session| {
            session.target = target.clone();
            session.level = level;
            session.status = SessionStatus::Scanning;
            session.progress = 0;
            session.result = None;
            session.error = None;
            session.validation_error = None;
        });

        self.simulator = Some(ProgressSimulator::attach(
            self.state.clone(),
            &self.progress,
        ));

        let request = ScanRequest { target, level };

        info!(url = %request.target, %level, "scan started");

        let outcome = self.service.scan(&request).await;

        self.stop_progress();

        match interpret_scan_response(outcome, &request) {
            Ok(result) => {
                info!(
                    url = %request.target,
                    findings = result.vulnerabilities.len(),
                    "scan completed"
                );

                self.state.send_modify(|session| {
                    session.status = SessionStatus::Done;
                    session.progress = 100;
                    session.result = Some(result);
                });

                Ok(())
            }
            Err(error) => {
                warn!(url = %request.target, %error, "scan failed");

                self.state.send_modify(|session| {
                    session.status = SessionStatus::Idle;
                    session.progress = 0;
                    session.result = None;
                    session.error = Some(error.to_string());
                });

                Err(error)
            }
        }
    }

    /// Clears everything from the previous attempt, including the inputs.
    pub fn reset_for_new_scan(&mut self) {
        self.stop_progress();

        self.state.send_modify(|session| {
            *session = ScanSession::default();
        });

        debug!("scan session reset");
    }
}
