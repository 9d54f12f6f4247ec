//! [`WindowManager`] implementation backed by yabai's Unix socket.
//!
//! Communicates directly with yabai through its message socket at
//! `$TMPDIR/yabai_<user>.socket`, avoiding any shell command invocation —
//! the messages are exactly the arguments one would pass after `yabai -m`.
//!
//! # Wire format
//!
//! A request is a 4-byte little-endian payload length followed by the
//! payload: every argument NUL-terminated, with one extra NUL closing the
//! list.  The response is read until EOF; a leading `0x07` byte marks a
//! failure and the remaining bytes carry the human-readable message, which
//! is classified into a [`WmFailure`] right here — nothing above this
//! module ever looks at the raw string.

use crate::records::{DisplayRecord, SpaceRecord, WindowRecord};
use crate::selector::{DisplaySelector, SpaceSelector, WindowSelector};
use crate::traits::{WindowManager, WmError, WmFailure};
use log::debug;
use serde::de::DeserializeOwned;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Marks a failure response, first byte of the payload.
const FAILURE_BYTE: u8 = 0x07;

/// yabai-backed window manager.
///
/// No connection is held open; each query or command is a short-lived
/// request on a fresh stream, mirroring how the `yabai -m` client behaves.
pub struct YabaiWm {
    socket: PathBuf,
}

impl YabaiWm {
    /// Create a handle using the conventional socket location for the
    /// current user.
    pub fn new() -> Result<Self, WmError> {
        Ok(Self {
            socket: socket_path()?,
        })
    }

    /// Create a handle for an explicit socket path.
    pub fn at(socket: impl Into<PathBuf>) -> Self {
        Self {
            socket: socket.into(),
        }
    }

    /// Send one message and return the raw (successful) response body.
    fn request(&self, args: &[&str]) -> Result<String, WmError> {
        debug!("yabai -m {}", args.join(" "));
        let mut stream = UnixStream::connect(&self.socket).map_err(|e| {
            WmError::Transport(format!("connect to {}: {}", self.socket.display(), e))
        })?;

        stream
            .write_all(&encode_message(args))
            .map_err(|e| WmError::Transport(format!("write: {}", e)))?;
        stream
            .shutdown(std::net::Shutdown::Write)
            .map_err(|e| WmError::Transport(format!("shutdown: {}", e)))?;

        let mut response = Vec::new();
        stream
            .read_to_end(&mut response)
            .map_err(|e| WmError::Transport(format!("read: {}", e)))?;

        decode_response(&response)
    }

    /// Send a query and parse the JSON response.
    fn query<T: DeserializeOwned>(&self, args: &[&str]) -> Result<T, WmError> {
        let body = self.request(args)?;
        serde_json::from_str(&body).map_err(|e| WmError::Protocol(format!("parse: {}", e)))
    }

    /// Send a command, expecting an empty response.
    fn command(&self, args: &[&str]) -> Result<(), WmError> {
        self.request(args).map(|_| ())
    }
}

/// Resolve the yabai message socket path
/// (`$TMPDIR/yabai_<user>.socket`, falling back to `/tmp`).
fn socket_path() -> Result<PathBuf, WmError> {
    let user =
        std::env::var("USER").map_err(|_| WmError::Transport("USER not set".to_string()))?;
    let tmpdir = std::env::var("TMPDIR").unwrap_or_else(|_| "/tmp".to_string());
    Ok(PathBuf::from(tmpdir).join(format!("yabai_{}.socket", user)))
}

/// Frame a message: little-endian payload length, then each argument
/// NUL-terminated, then a closing NUL.
fn encode_message(args: &[&str]) -> Vec<u8> {
    let mut payload = Vec::new();
    for arg in args {
        payload.extend_from_slice(arg.as_bytes());
        payload.push(0);
    }
    payload.push(0);

    let mut message = Vec::with_capacity(4 + payload.len());
    message.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    message.extend_from_slice(&payload);
    message
}

/// Split a raw response into success body or classified failure.
fn decode_response(response: &[u8]) -> Result<String, WmError> {
    match response.split_first() {
        Some((&FAILURE_BYTE, rest)) => {
            let message = String::from_utf8_lossy(rest).trim().to_string();
            Err(WmFailure::classify(message).into())
        }
        _ => String::from_utf8(response.to_vec())
            .map_err(|e| WmError::Protocol(format!("utf-8: {}", e))),
    }
}

impl WindowManager for YabaiWm {
    fn space(&self, sel: &SpaceSelector) -> Result<SpaceRecord, WmError> {
        self.query(&["query", "--spaces", "--space", &sel.to_string()])
    }

    fn spaces(&self) -> Result<Vec<SpaceRecord>, WmError> {
        self.query(&["query", "--spaces"])
    }

    fn display(&self, sel: &DisplaySelector) -> Result<DisplayRecord, WmError> {
        self.query(&["query", "--displays", "--display", &sel.to_string()])
    }

    fn displays(&self) -> Result<Vec<DisplayRecord>, WmError> {
        self.query(&["query", "--displays"])
    }

    fn window(&self, sel: &WindowSelector) -> Result<WindowRecord, WmError> {
        self.query(&["query", "--windows", "--window", &sel.to_string()])
    }

    fn windows(&self) -> Result<Vec<WindowRecord>, WmError> {
        self.query(&["query", "--windows"])
    }

    fn focus_space(&self, sel: &SpaceSelector) -> Result<(), WmError> {
        self.command(&["space", "--focus", &sel.to_string()])
    }

    fn create_space(&self, display: &DisplaySelector) -> Result<(), WmError> {
        // `--create` takes a space selector and creates on that space's
        // display, so anchor on the display's last space.
        let record: DisplayRecord =
            self.query(&["query", "--displays", "--display", &display.to_string()])?;
        let anchor = record.spaces.last().copied().ok_or_else(|| {
            WmError::Protocol(format!("display {} reports no spaces", record.index))
        })?;
        self.command(&["space", "--create", &anchor.to_string()])
    }

    fn destroy_space(&self, sel: &SpaceSelector) -> Result<(), WmError> {
        self.command(&["space", "--destroy", &sel.to_string()])
    }

    fn move_space(&self, sel: &SpaceSelector, to: &SpaceSelector) -> Result<(), WmError> {
        self.command(&["space", &sel.to_string(), "--move", &to.to_string()])
    }

    fn swap_space(&self, sel: &SpaceSelector, with: &SpaceSelector) -> Result<(), WmError> {
        self.command(&["space", &sel.to_string(), "--swap", &with.to_string()])
    }

    fn send_space_to_display(
        &self,
        sel: &SpaceSelector,
        display: &DisplaySelector,
    ) -> Result<(), WmError> {
        self.command(&["space", &sel.to_string(), "--display", &display.to_string()])
    }

    fn label_space(&self, sel: &SpaceSelector, label: &str) -> Result<(), WmError> {
        self.command(&["space", &sel.to_string(), "--label", label])
    }

    fn focus_display(&self, sel: &DisplaySelector) -> Result<(), WmError> {
        self.command(&["display", "--focus", &sel.to_string()])
    }

    fn send_window_to_space(
        &self,
        window: &WindowSelector,
        space: &SpaceSelector,
    ) -> Result<(), WmError> {
        self.command(&["window", &window.to_string(), "--space", &space.to_string()])
    }
}
