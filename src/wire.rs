//! JSON envelopes exchanged with the device-control service.
//!
//! Every field tolerates absence: a malformed or partial body is detected by
//! the reconciler's validation, not by a deserialization panic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// `GET status` — full point-in-time snapshot, authoritative for the
/// connection and training flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub training: bool,
    #[serde(default)]
    pub data: Option<LiveData>,
}

/// Live readings attached to a status snapshot. `None` fields render as
/// zero but are never recorded into the session history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveData {
    #[serde(default)]
    pub power: Option<f64>,
    #[serde(default)]
    pub cadence: Option<f64>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub duration: Option<String>,
    /// Running count of samples the device delivered this connection.
    #[serde(default)]
    pub data_count: Option<u64>,
}

/// `GET logs` — the server's canonical log, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub logs: Vec<ServerLogEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerLogEntry {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub message: String,
}

/// Response shape shared by every one-shot action endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    /// `export` returns one artifact path per format. Older service builds
    /// used the key `files` for the same map.
    #[serde(default, alias = "files")]
    pub paths: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tolerates_missing_fields() {
        let status: StatusResponse = serde_json::from_str("{}").expect("parse");
        assert!(!status.connected);
        assert!(!status.training);
        assert!(status.data.is_none());

        let status: StatusResponse =
            serde_json::from_str(r#"{"connected":true,"training":true,"data":{"power":180}}"#)
                .expect("parse");
        assert!(status.connected);
        assert_eq!(status.data.as_ref().and_then(|d| d.power), Some(180.0));
        assert_eq!(status.data.as_ref().and_then(|d| d.cadence), None);
    }

    #[test]
    fn export_accepts_both_path_keys() {
        let resp: ActionResponse = serde_json::from_str(
            r#"{"success":true,"files":{"csv":"/tmp/session.csv","tcx":"/tmp/session.tcx"}}"#,
        )
        .expect("parse");
        let paths = resp.paths.expect("paths");
        assert_eq!(paths.get("csv").map(String::as_str), Some("/tmp/session.csv"));

        let resp: ActionResponse =
            serde_json::from_str(r#"{"success":true,"paths":{"json":"/tmp/s.json"}}"#)
                .expect("parse");
        assert!(resp.paths.is_some());
    }

    #[test]
    fn logs_parse_in_server_order() {
        let resp: LogsResponse = serde_json::from_str(
            r#"{"logs":[
                {"timestamp":"10:00:00","level":"INFO","message":"first"},
                {"timestamp":"10:00:01","level":"ERROR","message":"second"}
            ]}"#,
        )
        .expect("parse");
        assert_eq!(resp.logs.len(), 2);
        assert_eq!(resp.logs[0].message, "first");
    }
}
