//! Boundary to the device-control collaborator.
//!
//! Discovery only hands over an address and port. Everything beyond that
//! (launching the receiver app, loading media) sits behind these traits.

use std::net::{IpAddr, SocketAddr};

use tracing::{debug, info};

use crate::error::DeviceError;
use crate::types::DiscoveredDevice;

/// Opens control sessions on receivers.
pub trait DeviceController {
    type Session: ControlSession;

    /// Connect to the receiver listening on `addr:port`.
    fn start(&self, addr: IpAddr, port: u16) -> Result<Self::Session, DeviceError>;
}

/// An open control session on one receiver.
pub trait ControlSession {
    /// Load and play `request.media` on the receiver.
    fn load(&mut self, request: &LoadRequest) -> Result<(), DeviceError>;
}

/// A media load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// `http`/`https` URL the receiver fetches the media from
    pub media: String,
    /// MIME type, guessed from the URL extension when absent
    pub content_type: Option<String>,
    pub transcode: bool,
    /// Return once the media is loaded instead of waiting for playback to end
    pub detach: bool,
}

impl LoadRequest {
    pub fn new(media: impl Into<String>) -> Self {
        Self {
            media: media.into(),
            content_type: None,
            transcode: false,
            detach: false,
        }
    }

    pub fn with_content_type(mut self, content_type: Option<String>) -> Self {
        self.content_type = content_type;
        self
    }

    pub fn detached(mut self, detach: bool) -> Self {
        self.detach = detach;
        self
    }

    /// Check the request and settle its content type.
    pub fn resolve_content_type(&self) -> Result<String, DeviceError> {
        if self.transcode {
            return Err(DeviceError::UnsupportedOption("transcode".to_string()));
        }

        if !is_remote_media(&self.media) {
            return Err(DeviceError::UnsupportedMedia(format!(
                "{} is not an http(s) URL",
                self.media
            )));
        }

        match &self.content_type {
            Some(content_type) => Ok(content_type.clone()),
            None => guess_content_type(&self.media)
                .map(str::to_string)
                .ok_or_else(|| {
                    DeviceError::UnsupportedMedia(format!(
                        "unable to determine content type of {}, pass one explicitly",
                        self.media
                    ))
                }),
        }
    }
}

fn is_remote_media(media: &str) -> bool {
    media.starts_with("http://") || media.starts_with("https://")
}

/// Guess a MIME type from a media URL's file extension.
pub fn guess_content_type(media: &str) -> Option<&'static str> {
    let path = media.split(['?', '#']).next().unwrap_or(media);
    let file = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = file.rsplit_once('.')?;

    let content_type = match ext.to_ascii_lowercase().as_str() {
        "mp4" | "m4v" => "video/mp4",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "m3u8" => "application/x-mpegURL",
        "mpd" => "application/dash+xml",
        "mp3" => "audio/mpeg",
        "flac" => "audio/flac",
        "ogg" | "oga" => "audio/ogg",
        "m4a" | "aac" => "audio/mp4",
        "wav" => "audio/wav",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => return None,
    };

    Some(content_type)
}

/// Start a control session on `addr` and load the request.
///
/// Runs on tokio's blocking pool since control sessions do blocking IO.
pub async fn play_with<C>(
    controller: C,
    addr: SocketAddr,
    request: LoadRequest,
) -> Result<(), DeviceError>
where
    C: DeviceController + Send + 'static,
{
    request.resolve_content_type()?;

    tokio::task::spawn_blocking(move || {
        debug!("Starting control session on {}", addr);
        let mut session = controller.start(addr.ip(), addr.port())?;
        session.load(&request)?;
        info!("Loaded {} on {}", request.media, addr);
        Ok::<(), DeviceError>(())
    })
    .await
    .map_err(|e| DeviceError::TaskFailed(e.to_string()))?
}

/// Load the request on a discovered device.
pub async fn play_on_device<C>(
    controller: C,
    device: &DiscoveredDevice,
    request: LoadRequest,
) -> Result<(), DeviceError>
where
    C: DeviceController + Send + 'static,
{
    let addr = device.control_addr().ok_or_else(|| DeviceError::NoAddress {
        name: device.display_name().to_string(),
    })?;

    play_with(controller, addr, request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Recorded {
        started: Vec<(IpAddr, u16)>,
        loaded: Vec<LoadRequest>,
    }

    struct FakeController {
        recorded: Arc<Mutex<Recorded>>,
        fail_start: bool,
    }

    struct FakeSession {
        recorded: Arc<Mutex<Recorded>>,
    }

    impl DeviceController for FakeController {
        type Session = FakeSession;

        fn start(&self, addr: IpAddr, port: u16) -> Result<FakeSession, DeviceError> {
            if self.fail_start {
                return Err(DeviceError::SessionStart {
                    addr: format!("{}:{}", addr, port),
                    message: "connection refused".to_string(),
                });
            }
            self.recorded.lock().unwrap().started.push((addr, port));
            Ok(FakeSession {
                recorded: self.recorded.clone(),
            })
        }
    }

    impl ControlSession for FakeSession {
        fn load(&mut self, request: &LoadRequest) -> Result<(), DeviceError> {
            self.recorded.lock().unwrap().loaded.push(request.clone());
            Ok(())
        }
    }

    fn fake(fail_start: bool) -> (FakeController, Arc<Mutex<Recorded>>) {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let controller = FakeController {
            recorded: recorded.clone(),
            fail_start,
        };
        (controller, recorded)
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("http://host/movie.mp4"), Some("video/mp4"));
        assert_eq!(guess_content_type("http://host/song.FLAC?x=1"), Some("audio/flac"));
        assert_eq!(
            guess_content_type("https://host/live/index.m3u8#t"),
            Some("application/x-mpegURL")
        );
        assert_eq!(guess_content_type("http://host/stream"), None);
        assert_eq!(guess_content_type("http://host.example/path/noext"), None);
    }

    #[test]
    fn test_resolve_content_type() {
        let request = LoadRequest::new("http://host/a.mp3");
        assert_eq!(request.resolve_content_type().unwrap(), "audio/mpeg");

        let request = LoadRequest::new("http://host/stream")
            .with_content_type(Some("audio/aac".to_string()));
        assert_eq!(request.resolve_content_type().unwrap(), "audio/aac");
    }

    #[test]
    fn test_local_file_rejected() {
        let request = LoadRequest::new("/home/me/movie.mp4");
        assert!(matches!(
            request.resolve_content_type(),
            Err(DeviceError::UnsupportedMedia(_))
        ));
    }

    #[test]
    fn test_transcode_rejected() {
        let mut request = LoadRequest::new("http://host/a.mkv");
        request.transcode = true;
        assert!(matches!(
            request.resolve_content_type(),
            Err(DeviceError::UnsupportedOption(_))
        ));
    }

    #[tokio::test]
    async fn test_play_on_device_uses_control_addr() {
        let (controller, recorded) = fake(false);
        let device = DiscoveredDevice {
            address_v4: Some(Ipv4Addr::new(10, 0, 0, 5)),
            port: 8009,
            ..Default::default()
        };

        let request = LoadRequest::new("http://host/a.mp4").detached(true);
        play_on_device(controller, &device, request.clone())
            .await
            .unwrap();

        let recorded = recorded.lock().unwrap();
        assert_eq!(
            recorded.started,
            vec![(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)), 8009)]
        );
        assert_eq!(recorded.loaded, vec![request]);
    }

    #[tokio::test]
    async fn test_play_on_device_without_address() {
        let (controller, recorded) = fake(false);
        let device = DiscoveredDevice {
            friendly_name: Some("Bedroom".to_string()),
            port: 8009,
            ..Default::default()
        };

        let request = LoadRequest::new("http://host/a.mp4");
        let result = play_on_device(controller, &device, request).await;

        assert!(matches!(result, Err(DeviceError::NoAddress { ref name }) if name == "Bedroom"));
        assert!(recorded.lock().unwrap().started.is_empty());
    }

    #[tokio::test]
    async fn test_start_failure_propagated() {
        let (controller, recorded) = fake(true);
        let addr: SocketAddr = "10.0.0.5:8009".parse().unwrap();

        let result = play_with(controller, addr, LoadRequest::new("http://host/a.mp4")).await;

        assert!(matches!(result, Err(DeviceError::SessionStart { .. })));
        assert!(recorded.lock().unwrap().loaded.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_request_never_connects() {
        let (controller, recorded) = fake(false);
        let addr: SocketAddr = "10.0.0.5:8009".parse().unwrap();

        let result = play_with(controller, addr, LoadRequest::new("http://host/stream")).await;

        assert!(matches!(result, Err(DeviceError::UnsupportedMedia(_))));
        assert!(recorded.lock().unwrap().started.is_empty());
    }
}
