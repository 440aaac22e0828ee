//! # Device Session
//!
//! The single stateful owner of the printer connection. All device writes in
//! the process go through one [`DeviceSession`]; callers serialize access so
//! that the bytes of two images are never interleaved on the wire.
//!
//! ## Command Ordering
//!
//! One image is always transmitted as the atomic sequence
//!
//! ```text
//! Feed(8) -> Align(Center) -> Raster -> Feed(8)
//! ```
//!
//! ## Pacing
//!
//! After an image is fully written the session must settle before the next
//! one: the printer has no flow-control signal back to the host, and writing
//! faster than the mechanism can feed paper corrupts subsequent output. The
//! settle delay is a hardware contract, not an optimization. It is held as a
//! named, tunable value so tests can zero it out without touching protocol
//! logic.

use std::thread;
use std::time::Duration;

use crate::error::PapelitoError;
use crate::protocol::commands::{self, Alignment};
use crate::protocol::graphics;
use crate::render::raster::RasterFrame;
use crate::transport::Transport;

/// Lines fed before and after each image (ESC d n).
pub const IMAGE_FEED_LINES: u8 = 8;

/// Mandatory pause between two consecutive images in a job.
pub const INTER_IMAGE_SETTLE: Duration = Duration::from_millis(1000);

/// One atomic unit written to the device.
///
/// Commands are ephemeral: built, encoded, written, discarded.
#[derive(Debug, Clone)]
pub enum DeviceCommand {
    /// Print buffer contents and feed n lines
    Feed(u8),
    /// Set horizontal alignment for subsequent data
    Align(Alignment),
    /// One complete raster bit image
    Raster(RasterFrame),
    /// Feed to the cutter and perform a full cut
    Cut,
    /// Return the printer to its power-on state
    Reset,
}

impl DeviceCommand {
    /// Encode this command into its exact wire bytes.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            DeviceCommand::Feed(n) => commands::feed_lines(*n),
            DeviceCommand::Align(alignment) => commands::align(*alignment),
            DeviceCommand::Raster(frame) => graphics::raster(frame),
            DeviceCommand::Cut => commands::cut_full_feed(),
            DeviceCommand::Reset => commands::init(),
        }
    }
}

/// Where the session is within an image's command sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Between images; any command may be issued
    Idle,
    /// Positioning commands for an image have started
    Aligning,
    /// Raster payload is on the wire
    Streaming,
}

/// # Device Session
///
/// Exclusive, stateful handle to one physical printer.
///
/// [`DeviceSession::open`] resets the device unconditionally so stale state
/// from a previously failed write cannot leak into the first job.
/// [`DeviceSession::new`] skips the reset; the cut-only code paths use it
/// because cutting must emit the cut command and nothing else.
pub struct DeviceSession {
    transport: Box<dyn Transport>,
    state: SessionState,
    settle_delay: Duration,
}

impl DeviceSession {
    /// Wrap a transport without touching the device.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            state: SessionState::Idle,
            settle_delay: INTER_IMAGE_SETTLE,
        }
    }

    /// Wrap a transport and reset the device to a known idle state.
    pub fn open(transport: impl Transport + 'static) -> Result<Self, PapelitoError> {
        let mut session = Self::new(transport);
        session.reset()?;
        Ok(session)
    }

    /// Current position in the per-image state machine.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Override the inter-image settle delay (tests set this to zero).
    pub fn set_settle_delay(&mut self, delay: Duration) {
        self.settle_delay = delay;
    }

    /// Write one command to the device.
    pub fn send(&mut self, command: &DeviceCommand) -> Result<(), PapelitoError> {
        self.transport.write_all(&command.encode())?;
        self.state = match command {
            DeviceCommand::Reset => SessionState::Idle,
            _ => self.state,
        };
        Ok(())
    }

    /// Transmit one image's full command sequence.
    ///
    /// `Feed -> Align(Center) -> Raster -> Feed`, atomically with respect to
    /// other callers (the session is exclusive). On failure the state is
    /// left where the sequence stopped; [`reset`](Self::reset) recovers.
    pub fn print_frame(&mut self, frame: &RasterFrame) -> Result<(), PapelitoError> {
        self.state = SessionState::Aligning;
        self.send(&DeviceCommand::Feed(IMAGE_FEED_LINES))?;
        self.send(&DeviceCommand::Align(Alignment::Center))?;

        self.state = SessionState::Streaming;
        self.send(&DeviceCommand::Raster(frame.clone()))?;
        self.send(&DeviceCommand::Feed(IMAGE_FEED_LINES))?;

        self.state = SessionState::Idle;
        Ok(())
    }

    /// Print buffer contents and feed `n` lines.
    pub fn feed(&mut self, n: u8) -> Result<(), PapelitoError> {
        self.send(&DeviceCommand::Feed(n))
    }

    /// Set alignment for subsequent output.
    pub fn align(&mut self, alignment: Alignment) -> Result<(), PapelitoError> {
        self.send(&DeviceCommand::Align(alignment))
    }

    /// Feed to the cutter and cut the paper.
    ///
    /// Never implied by job completion; always explicitly requested.
    pub fn cut(&mut self) -> Result<(), PapelitoError> {
        self.send(&DeviceCommand::Cut)
    }

    /// Force the device (and this session) back to `Idle` from any state.
    pub fn reset(&mut self) -> Result<(), PapelitoError> {
        self.send(&DeviceCommand::Reset)
    }

    /// Block for the inter-image settle delay.
    pub fn settle(&self) {
        if !self.settle_delay.is_zero() {
            thread::sleep(self.settle_delay);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::MockTransport;
    use super::*;
    use image::{GrayImage, Luma};
    use pretty_assertions::assert_eq;

    fn frame(width: u32, height: u32) -> RasterFrame {
        let map = GrayImage::from_pixel(width, height, Luma([0]));
        crate::render::raster::encode(&map).unwrap()
    }

    #[test]
    fn test_open_resets_device() {
        let transport = MockTransport::new();
        let session = DeviceSession::open(transport.clone()).unwrap();

        assert_eq!(transport.wire_bytes(), vec![0x1B, 0x40]);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_new_is_silent() {
        let transport = MockTransport::new();
        let _session = DeviceSession::new(transport.clone());
        assert_eq!(transport.write_count(), 0);
    }

    #[test]
    fn test_print_frame_command_ordering() {
        let transport = MockTransport::new();
        let mut session = DeviceSession::new(transport.clone());

        let f = frame(16, 2);
        session.print_frame(&f).unwrap();

        let writes = transport.writes.lock().unwrap().clone();
        assert_eq!(writes.len(), 4);
        assert_eq!(writes[0], vec![0x1B, 0x64, 8]); // feed before
        assert_eq!(writes[1], vec![0x1B, 0x61, 1]); // center align
        assert_eq!(&writes[2][..3], &[0x1D, 0x76, 0x30]); // raster
        assert_eq!(writes[2].len(), 8 + 2 * 2); // header + 2 bytes x 2 rows
        assert_eq!(writes[3], vec![0x1B, 0x64, 8]); // feed after
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_cut_only_emits_cut() {
        let transport = MockTransport::new();
        let mut session = DeviceSession::new(transport.clone());

        session.cut().unwrap();

        assert_eq!(transport.wire_bytes(), vec![0x1D, 0x56, 0x41, 0x00]);
    }

    #[test]
    fn test_reset_recovers_from_mid_sequence_failure() {
        // Fail on the raster write (write index 2)
        let transport = MockTransport::failing_after(2);
        let mut session = DeviceSession::new(transport.clone());

        let err = session.print_frame(&frame(8, 1)).unwrap_err();
        assert!(matches!(err, PapelitoError::Transport(_)));
        assert_eq!(session.state(), SessionState::Streaming);

        // Allow writes again and reset
        *transport.fail_after.lock().unwrap() = None;
        session.reset().unwrap();
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_settle_delay_is_tunable() {
        let mut session = DeviceSession::new(MockTransport::new());
        session.set_settle_delay(Duration::ZERO);
        // Must return immediately; a 1s sleep here would hang the test suite.
        session.settle();
    }

    #[test]
    fn test_device_command_encodings() {
        assert_eq!(DeviceCommand::Reset.encode(), vec![0x1B, 0x40]);
        assert_eq!(DeviceCommand::Feed(3).encode(), vec![0x1B, 0x64, 3]);
        assert_eq!(
            DeviceCommand::Align(Alignment::Right).encode(),
            vec![0x1B, 0x61, 2]
        );
        assert_eq!(DeviceCommand::Cut.encode(), vec![0x1D, 0x56, 0x41, 0x00]);
    }
}
