//! Cast control sessions using the rust_cast library.

use std::net::{IpAddr, SocketAddr};
use std::thread;
use std::time::Duration;

use rust_cast::channels::media::{Media, PlayerState, StreamType};
use rust_cast::channels::receiver::CastDeviceApp;
use rust_cast::CastDevice;
use tracing::debug;

use super::control::{ControlSession, DeviceController, LoadRequest};
use crate::error::DeviceError;

/// Default cast control port.
pub const DEFAULT_CAST_PORT: u16 = 8009;

/// Platform receiver every connection starts with.
const RECEIVER_DESTINATION: &str = "receiver-0";

/// Interval between media status polls while waiting for playback to end.
const STATUS_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Opens rust_cast connections. Receivers use self-signed certificates, so the
/// host is not verified.
#[derive(Debug, Default, Clone, Copy)]
pub struct CastController;

impl CastController {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceController for CastController {
    type Session = CastSession;

    fn start(&self, addr: IpAddr, port: u16) -> Result<CastSession, DeviceError> {
        let target = SocketAddr::new(addr, port);
        let start_error = |e: rust_cast::errors::Error| DeviceError::SessionStart {
            addr: target.to_string(),
            message: e.to_string(),
        };

        debug!("Connecting to cast receiver at {}", target);

        let device = CastDevice::connect_without_host_verification(addr.to_string(), port)
            .map_err(start_error)?;
        device
            .connection
            .connect(RECEIVER_DESTINATION.to_string())
            .map_err(start_error)?;
        device.heartbeat.ping().map_err(start_error)?;

        Ok(CastSession {
            device,
            addr: target,
        })
    }
}

/// Connection to one receiver.
pub struct CastSession {
    device: CastDevice<'static>,
    addr: SocketAddr,
}

impl CastSession {
    fn load_error(&self, e: rust_cast::errors::Error) -> DeviceError {
        DeviceError::LoadFailed {
            addr: self.addr.to_string(),
            message: e.to_string(),
        }
    }

    fn wait_until_idle(
        &self,
        transport_id: &str,
        media_session_id: i32,
    ) -> Result<(), DeviceError> {
        loop {
            thread::sleep(STATUS_POLL_INTERVAL);

            self.device
                .heartbeat
                .ping()
                .map_err(|e| self.load_error(e))?;

            let status = self
                .device
                .media
                .get_status(transport_id.to_string(), Some(media_session_id))
                .map_err(|e| self.load_error(e))?;

            match status.entries.first() {
                Some(entry) if !matches!(entry.player_state, PlayerState::Idle) => continue,
                _ => return Ok(()),
            }
        }
    }
}

impl ControlSession for CastSession {
    fn load(&mut self, request: &LoadRequest) -> Result<(), DeviceError> {
        let content_type = request.resolve_content_type()?;

        let app = self
            .device
            .receiver
            .launch_app(&CastDeviceApp::DefaultMediaReceiver)
            .map_err(|e| self.load_error(e))?;

        debug!(
            "Launched app with session_id: {}, transport_id: {}",
            app.session_id, app.transport_id
        );

        self.device
            .connection
            .connect(app.transport_id.clone())
            .map_err(|e| self.load_error(e))?;

        let media = Media {
            content_id: request.media.clone(),
            content_type,
            stream_type: StreamType::Buffered,
            metadata: None,
            duration: None,
        };

        let status = self
            .device
            .media
            .load(app.transport_id.clone(), app.session_id.clone(), &media)
            .map_err(|e| self.load_error(e))?;

        if request.detach {
            return Ok(());
        }

        match status.entries.first() {
            Some(entry) => self.wait_until_idle(&app.transport_id, entry.media_session_id),
            None => Ok(()),
        }
    }
}
