//! Kernel connection files.
//!
//! A connection file is the JSON blob Jupyter writes next to a running
//! kernel (ports, transport, signing key). This crate only reads it; opening
//! sockets is the caller's job.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Runtime connection data for a Jupyter kernel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub iopub_port: u16,
    pub stdin_port: u16,
    pub shell_port: u16,
    pub control_port: u16,
    pub hb_port: u16,
    pub ip: String,
    pub transport: String,
    #[serde(default)]
    pub signature_scheme: String,
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("couldn't open connection file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("couldn't parse connection file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ConnectionInfo {
    /// Read and parse a connection file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConnectionError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConnectionError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConnectionError::Json {
            path: path.display().to_string(),
            source,
        })
    }

    /// `transport://ip:port` for an arbitrary port.
    pub fn connection_string(&self, port: u16) -> String {
        format!("{}://{}:{}", self.transport, self.ip, port)
    }

    /// Connection string for the IOPub channel, where the kernel broadcasts
    /// its output.
    pub fn iopub_connection_string(&self) -> String {
        self.connection_string(self.iopub_port)
    }

    /// The signing key as raw bytes, empty when the session is unsigned.
    pub fn key_bytes(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = r#"{
        "iopub_port": 50898,
        "stdin_port": 50899,
        "shell_port": 50897,
        "control_port": 50900,
        "hb_port": 50901,
        "ip": "127.0.0.1",
        "transport": "tcp",
        "signature_scheme": "hmac-sha256",
        "key": "6fb8e6a2-101b4fd4b03c35a9c0e43c0a"
    }"#;

    #[test]
    fn parse_sample_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let info = ConnectionInfo::from_file(file.path()).unwrap();
        assert_eq!(info.iopub_port, 50898);
        assert_eq!(info.signature_scheme, "hmac-sha256");
        assert_eq!(info.key_bytes(), b"6fb8e6a2-101b4fd4b03c35a9c0e43c0a");
    }

    #[test]
    fn connection_strings() {
        let info: ConnectionInfo = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(info.iopub_connection_string(), "tcp://127.0.0.1:50898");
        assert_eq!(info.connection_string(1234), "tcp://127.0.0.1:1234");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ConnectionInfo::from_file("/nonexistent/kernel-1.json").unwrap_err();
        assert!(matches!(err, ConnectionError::Io { .. }));
        assert!(err.to_string().contains("kernel-1.json"));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ nope").unwrap();

        let err = ConnectionInfo::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConnectionError::Json { .. }));
    }

    #[test]
    fn missing_key_defaults_to_unsigned() {
        let info: ConnectionInfo = serde_json::from_str(
            r#"{"iopub_port": 1, "stdin_port": 2, "shell_port": 3,
                "control_port": 4, "hb_port": 5, "ip": "0.0.0.0", "transport": "tcp"}"#,
        )
        .unwrap();
        assert!(info.key_bytes().is_empty());
    }
}
