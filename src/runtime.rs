//! The state reconciler.
//!
//! `ClientRuntime` owns the view model, the session history, the activity
//! log, and the notice stack. It is completion-driven: the web layer (or a
//! test) issues the fetches and hands every completion here as the latest
//! known snapshot. Completions may arrive out of dispatch order when a
//! previous tick's request is still outstanding; each one fully overwrites
//! the state it carries, so a stale late arrival can roll the view backward
//! for at most one interval before the next poll corrects it.

use tracing::{error, warn};

use crate::activity::{ActivityLog, LogLevel};
use crate::error::SyncError;
use crate::fmt;
use crate::history::{Sample, SessionHistory};
use crate::model::ViewModel;
use crate::notify::{NoticeLevel, NoticeStack};
use crate::wire::{ActionResponse, LogsResponse, StatusResponse};

/// A user-triggered request/response operation, distinct from the periodic
/// polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Connect,
    Disconnect,
    Start,
    Stop,
    Export,
    ClearLogs,
}

impl UserAction {
    /// Service endpoint, relative to the API base.
    pub fn endpoint(self) -> &'static str {
        match self {
            UserAction::Connect => "connect",
            UserAction::Disconnect => "disconnect",
            UserAction::Start => "start_training",
            UserAction::Stop => "stop_training",
            UserAction::Export => "export",
            UserAction::ClearLogs => "logs/clear",
        }
    }

    fn pending_message(self) -> &'static str {
        match self {
            UserAction::Connect => "Connecting to trainer...",
            UserAction::Disconnect => "Disconnecting...",
            UserAction::Start => "Starting training session...",
            UserAction::Stop => "Stopping training session...",
            UserAction::Export => "Exporting session data...",
            UserAction::ClearLogs => "Clearing log...",
        }
    }

    fn success_fallback(self) -> &'static str {
        match self {
            UserAction::Connect => "Connected to trainer",
            UserAction::Disconnect => "Disconnected from trainer",
            UserAction::Start => "Training session started",
            UserAction::Stop => "Training session stopped",
            UserAction::Export => "Session data exported",
            UserAction::ClearLogs => "Log cleared",
        }
    }

    fn failure_fallback(self) -> &'static str {
        match self {
            UserAction::Connect => "Connection failed",
            UserAction::Disconnect => "Disconnect failed",
            UserAction::Start => "Could not start training",
            UserAction::Stop => "Could not stop training",
            UserAction::Export => "Export failed",
            UserAction::ClearLogs => "Could not clear log",
        }
    }
}

#[derive(Debug, Default)]
pub struct ClientRuntime {
    pub model: ViewModel,
    pub history: SessionHistory,
    pub log: ActivityLog,
    pub notices: NoticeStack,
}

impl ClientRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Local echoes are stamped with client uptime; server entries carry
    /// their own timestamps.
    fn stamp(now_ms: f64) -> String {
        fmt::format_duration(now_ms / 1000.0)
    }

    fn push_log(&mut self, now_ms: f64, level: LogLevel, message: impl Into<String>) {
        self.log.push(Self::stamp(now_ms), level, message.into());
    }

    /// Feeds a completed status poll. On success the snapshot overwrites
    /// the view model and, if the sample validates, lands in the session
    /// history. On failure nothing in the view model changes: stale-but-valid
    /// display beats flicker, and the next tick is the retry.
    pub fn apply_status(&mut self, now_ms: f64, result: Result<StatusResponse, SyncError>) {
        match result {
            Ok(status) => {
                self.model.apply_snapshot(&status);
                if fmt::validate_sample(status.data.as_ref()) {
                    if let Some(data) = &status.data {
                        if let Some(power) = data.power {
                            self.history.push(Sample {
                                at_ms: now_ms,
                                power,
                                cadence: data.cadence.unwrap_or(0.0),
                                speed: data.speed.unwrap_or(0.0),
                            });
                        }
                    }
                }
            }
            Err(err) => {
                error!(%err, "status poll failed");
                let message = format!("Status update failed: {err}");
                self.push_log(now_ms, LogLevel::Error, message.clone());
                self.notices.push(message, NoticeLevel::Error, now_ms);
            }
        }
    }

    /// Feeds a completed log poll. Success replaces the visible list
    /// wholesale; failure is non-critical and only reaches the console.
    pub fn apply_logs(&mut self, result: Result<LogsResponse, SyncError>) {
        match result {
            Ok(resp) => self.log.replace_from_server(resp.logs),
            Err(err) => warn!(%err, "log poll failed"),
        }
    }

    /// Local echo written immediately when the action is dispatched, so the
    /// click feels instantaneous regardless of network latency.
    pub fn begin_action(&mut self, now_ms: f64, action: UserAction) {
        self.push_log(now_ms, LogLevel::Info, action.pending_message());
    }

    /// Feeds the completed one-shot action. A `success: false` body is a
    /// failure with the server's own message.
    pub fn apply_action(
        &mut self,
        now_ms: f64,
        action: UserAction,
        result: Result<ActionResponse, SyncError>,
    ) {
        match result {
            Ok(resp) if resp.success => {
                let message = resp
                    .message
                    .clone()
                    .unwrap_or_else(|| action.success_fallback().to_string());

                match action {
                    UserAction::Start => self.history.reset(),
                    UserAction::Stop => {
                        let summary = self.history.summary();
                        self.push_log(now_ms, LogLevel::Info, summary.log_line());
                    }
                    UserAction::Export => {
                        if let Some(paths) = &resp.paths {
                            for (format, path) in paths {
                                self.push_log(
                                    now_ms,
                                    LogLevel::Info,
                                    format!("Exported {format}: {path}"),
                                );
                            }
                        }
                    }
                    UserAction::ClearLogs => self.log.clear(),
                    UserAction::Connect | UserAction::Disconnect => {}
                }

                self.push_log(now_ms, LogLevel::Success, message.clone());
                self.notices.push(message, NoticeLevel::Success, now_ms);
            }
            Ok(resp) => {
                let message = resp
                    .message
                    .unwrap_or_else(|| action.failure_fallback().to_string());
                self.fail_action(now_ms, message);
            }
            Err(err) => {
                self.fail_action(now_ms, format!("{}: {err}", action.failure_fallback()));
            }
        }
    }

    fn fail_action(&mut self, now_ms: f64, message: String) {
        error!("action failed: {message}");
        self.push_log(now_ms, LogLevel::Error, message.clone());
        self.notices.push(message, NoticeLevel::Error, now_ms);
    }

    /// Single per-frame hook for the web driver.
    pub fn tick_notices(&mut self, now_ms: f64) {
        self.notices.tick(now_ms);
    }
}
