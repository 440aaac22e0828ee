//! # USB Transport
//!
//! Communication with ESC/POS printers over USB bulk transfer.
//!
//! The printer is located by its vendor/product identifier pair, opened
//! once at process start, and held for the process lifetime. Reconnection
//! after a failure is out of scope: a failed write surfaces as an error and
//! the current job aborts.
//!
//! ## Endpoint Discovery
//!
//! TM-series printers expose a single printer-class interface with one bulk
//! OUT endpoint (commands and raster data) and one bulk IN endpoint (status,
//! unused here). The OUT endpoint is discovered from the configuration
//! descriptor rather than hardcoded, since its address differs across
//! firmware revisions.
//!
//! ## Chunked Writes
//!
//! Large raster payloads are written in chunks with a small delay between
//! them so the printer's receive buffer is never outrun; the device has no
//! flow-control signal back to the host.

use std::thread;
use std::time::Duration;

use rusb::{Context, Device, DeviceDescriptor, DeviceHandle, Direction, TransferType, UsbContext};

use super::Transport;
use crate::error::PapelitoError;

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// Timeout for a single bulk transfer (milliseconds)
const WRITE_TIMEOUT_MS: u64 = 2000;

/// # USB Printer Transport
///
/// Manages a claimed USB connection to one ESC/POS printer.
///
/// ## Example
///
/// ```no_run
/// use papelito::transport::{Transport, UsbTransport};
/// use papelito::protocol::commands;
///
/// let mut transport = UsbTransport::open(0x04B8, 0x0E28)?;
/// transport.write_all(&commands::init())?;
/// # Ok::<(), papelito::error::PapelitoError>(())
/// ```
pub struct UsbTransport {
    handle: DeviceHandle<Context>,
    endpoint_out: u8,
    chunk_size: usize,
    chunk_delay: Duration,
    timeout: Duration,
}

impl UsbTransport {
    /// Open the printer identified by `vendor_id:product_id`.
    ///
    /// Enumerates the bus, opens the first matching device, detaches any
    /// kernel driver (usblp commonly claims printer-class devices on Linux),
    /// claims interface 0, and resolves the bulk OUT endpoint.
    ///
    /// ## Errors
    ///
    /// Returns [`PapelitoError::Transport`] if no matching device is
    /// attached, it cannot be opened (permissions), or it exposes no bulk
    /// OUT endpoint.
    pub fn open(vendor_id: u16, product_id: u16) -> Result<Self, PapelitoError> {
        let context = Context::new()
            .map_err(|e| PapelitoError::Transport(format!("USB context error: {}", e)))?;

        let (device, descriptor, mut handle) = find_device(&context, vendor_id, product_id)?
            .ok_or_else(|| {
                PapelitoError::Transport(format!(
                    "No USB printer found with id {:04x}:{:04x}",
                    vendor_id, product_id
                ))
            })?;

        let endpoint_out = find_bulk_out_endpoint(&device, &descriptor).ok_or_else(|| {
            PapelitoError::Transport("Printer exposes no bulk OUT endpoint".to_string())
        })?;

        handle
            .set_auto_detach_kernel_driver(true)
            .map_err(|e| PapelitoError::Transport(format!("Kernel driver detach failed: {}", e)))?;
        handle
            .claim_interface(0)
            .map_err(|e| PapelitoError::Transport(format!("Failed to claim interface 0: {}", e)))?;

        Ok(Self {
            handle,
            endpoint_out,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
            timeout: Duration::from_millis(WRITE_TIMEOUT_MS),
        })
    }

    /// Set the chunk size for large writes.
    ///
    /// Larger chunks are faster but give the printer's buffer less slack.
    /// Default is 4096 bytes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks. Default is 2ms.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }

    /// Write one chunk fully, looping over partial bulk transfers.
    fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), PapelitoError> {
        let mut offset = 0;
        while offset < chunk.len() {
            let written = self
                .handle
                .write_bulk(self.endpoint_out, &chunk[offset..], self.timeout)
                .map_err(|e| PapelitoError::Transport(format!("USB write failed: {}", e)))?;
            if written == 0 {
                return Err(PapelitoError::Transport(
                    "USB write made no progress".to_string(),
                ));
            }
            offset += written;
        }
        Ok(())
    }
}

impl Transport for UsbTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<(), PapelitoError> {
        if data.is_empty() {
            return Ok(());
        }

        if data.len() <= self.chunk_size {
            return self.write_chunk(data);
        }

        for chunk in data.chunks(self.chunk_size) {
            self.write_chunk(chunk)?;

            if !self.chunk_delay.is_zero() {
                thread::sleep(self.chunk_delay);
            }
        }

        Ok(())
    }
}

impl Drop for UsbTransport {
    fn drop(&mut self) {
        // Best effort; the device may already be gone.
        let _ = self.handle.release_interface(0);
    }
}

/// Locate a device by vendor/product id and open it.
fn find_device(
    context: &Context,
    vendor_id: u16,
    product_id: u16,
) -> Result<Option<(Device<Context>, DeviceDescriptor, DeviceHandle<Context>)>, PapelitoError> {
    let devices = context
        .devices()
        .map_err(|e| PapelitoError::Transport(format!("Failed to read USB device list: {}", e)))?;

    for device in devices.iter() {
        let descriptor = match device.device_descriptor() {
            Ok(d) => d,
            Err(_) => continue,
        };

        if descriptor.vendor_id() == vendor_id && descriptor.product_id() == product_id {
            let handle = device.open().map_err(|e| {
                PapelitoError::Transport(format!(
                    "Failed to open {:04x}:{:04x}: {}",
                    vendor_id, product_id, e
                ))
            })?;
            return Ok(Some((device, descriptor, handle)));
        }
    }

    Ok(None)
}

/// Find the address of the first bulk OUT endpoint on the device.
fn find_bulk_out_endpoint(device: &Device<Context>, descriptor: &DeviceDescriptor) -> Option<u8> {
    for n in 0..descriptor.num_configurations() {
        let config = match device.config_descriptor(n) {
            Ok(c) => c,
            Err(_) => continue,
        };
        for interface in config.interfaces() {
            for interface_desc in interface.descriptors() {
                for endpoint in interface_desc.endpoint_descriptors() {
                    if endpoint.direction() == Direction::Out
                        && endpoint.transfer_type() == TransferType::Bulk
                    {
                        return Some(endpoint.address());
                    }
                }
            }
        }
    }
    None
}

// Transport tests require attached hardware; the session and job tests use
// an in-memory Transport implementation instead.
