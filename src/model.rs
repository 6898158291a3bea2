//! Last-known-good view of the remote device.
//!
//! Everything here is derived from confirmed server snapshots only. The UI
//! must never show a connection or training state the server has not yet
//! acknowledged, and display values keep their previous reading on a failed
//! poll instead of flickering to zero.

use crate::fmt;
use crate::wire::StatusResponse;

/// Button enablement derived from the last confirmed flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// The connect/disconnect action is always available.
    pub connect_enabled: bool,
    pub start_enabled: bool,
    pub stop_enabled: bool,
    pub export_enabled: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            connect_enabled: true,
            start_enabled: false,
            stop_enabled: false,
            export_enabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub connected: bool,
    pub training: bool,
    pub power_label: String,
    pub cadence_label: String,
    pub speed_label: String,
    pub duration_label: String,
    pub data_count: u64,
    pub controls: Controls,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            connected: false,
            training: false,
            power_label: fmt::format_power(None),
            cadence_label: fmt::format_cadence(None),
            speed_label: fmt::format_speed(None),
            duration_label: fmt::format_duration(0.0),
            data_count: 0,
            controls: Controls::default(),
        }
    }
}

impl ViewModel {
    /// Overwrites the model from a confirmed snapshot. The server is the
    /// sole arbiter of `connected`/`training`; nothing is inferred locally.
    /// A snapshot without a data payload keeps the previous display values.
    pub fn apply_snapshot(&mut self, status: &StatusResponse) {
        self.connected = status.connected;
        self.training = status.training;

        if let Some(data) = &status.data {
            self.power_label = fmt::format_power(data.power);
            self.cadence_label = fmt::format_cadence(data.cadence);
            self.speed_label = fmt::format_speed(data.speed);
            if let Some(duration) = &data.duration {
                self.duration_label = duration.clone();
            }
            if let Some(count) = data.data_count {
                self.data_count = count;
            }
        }

        self.controls = Controls {
            connect_enabled: true,
            start_enabled: status.connected && !status.training,
            stop_enabled: status.training,
            export_enabled: status.training,
        };
    }
}
