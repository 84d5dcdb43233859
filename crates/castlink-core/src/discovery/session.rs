//! Discovery session: one deadline-bounded browse-and-translate run.
//!
//! A session owns two tasks joined by bounded channels:
//! the browse task publishes raw advertisements, the translator turns them
//! into `DiscoveredDevice`s and publishes them to the session's stream.
//! Both stop at the deadline, and the stream then closes.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, timeout_at, Instant};
use tracing::{debug, info, trace, warn};

use super::browser::{Browser, MdnsBrowser};
use super::translate::translate_entry;
use crate::config::{DiscoveryConfig, MAX_TIMEOUT};
use crate::error::CoreError;
use crate::types::{DiscoveredDevice, RawServiceEntry};

/// Extra time a browser gets past the deadline before its task is cut off.
pub const BROWSE_GRACE: Duration = Duration::from_millis(500);

/// Handle on a running discovery session.
///
/// Yields devices as they are resolved, in network order, until the deadline.
/// Dropping the handle lets both tasks wind down early.
pub struct DiscoverySession {
    deadline: Instant,
    devices: mpsc::Receiver<DiscoveredDevice>,
    browse_task: JoinHandle<()>,
    translate_task: JoinHandle<()>,
}

impl DiscoverySession {
    /// Start an mDNS discovery session.
    ///
    /// Configuration and resolver construction errors are returned before
    /// any task is spawned. Must be called from within a tokio runtime.
    pub fn start(config: &DiscoveryConfig) -> Result<Self, CoreError> {
        config.validate()?;
        let browser = MdnsBrowser::new(config)?;

        info!(
            "Discovering {} for {:.1}s",
            config.service_type,
            config.timeout.as_secs_f32()
        );

        Ok(Self::with_browser(
            browser,
            config.timeout,
            config.buffer_capacity,
        ))
    }

    /// Start a session driven by an arbitrary browser.
    ///
    /// `timeout` is capped at `MAX_TIMEOUT`.
    pub fn with_browser<B: Browser>(browser: B, timeout: Duration, capacity: usize) -> Self {
        let now = Instant::now();
        let deadline = now
            .checked_add(timeout.min(MAX_TIMEOUT))
            .unwrap_or(now + MAX_TIMEOUT);
        let capacity = capacity.max(1);

        let (entry_tx, entry_rx) = mpsc::channel(capacity);
        let (device_tx, device_rx) = mpsc::channel(capacity);

        let browse_task = tokio::spawn(run_browser(browser, deadline, entry_tx));
        let translate_task = tokio::spawn(run_translator(entry_rx, device_tx, deadline));

        Self {
            deadline,
            devices: device_rx,
            browse_task,
            translate_task,
        }
    }

    /// Instant at which the session stops and its stream closes.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Wait for the next device. `None` once the session is closed.
    pub async fn next_device(&mut self) -> Option<DiscoveredDevice> {
        self.devices.recv().await
    }

    /// True once both tasks have exited.
    pub fn is_finished(&self) -> bool {
        self.browse_task.is_finished() && self.translate_task.is_finished()
    }

    /// Drain the session into a list, then wait for both tasks to exit.
    pub async fn collect(mut self) -> Vec<DiscoveredDevice> {
        let mut devices = Vec::new();
        while let Some(device) = self.devices.recv().await {
            devices.push(device);
        }
        self.join().await;
        devices
    }

    /// Wait for both tasks to exit. Devices not yet received are discarded.
    pub async fn join(self) {
        drop(self.devices);

        for (name, task) in [
            ("browse", self.browse_task),
            ("translate", self.translate_task),
        ] {
            if let Err(e) = task.await {
                warn!("Discovery {} task failed: {}", name, e);
            }
        }
    }
}

impl Stream for DiscoverySession {
    type Item = DiscoveredDevice;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.get_mut().devices.poll_recv(cx)
    }
}

async fn run_browser<B: Browser>(
    mut browser: B,
    deadline: Instant,
    entries: mpsc::Sender<RawServiceEntry>,
) {
    match timeout_at(deadline + BROWSE_GRACE, browser.browse(deadline, entries)).await {
        Ok(Ok(())) => debug!("Browse finished"),
        Ok(Err(e)) => warn!("Browse ended early: {}", e),
        Err(_) => warn!("Browser ignored the deadline, stopping it"),
    }
}

async fn run_translator(
    mut entries: mpsc::Receiver<RawServiceEntry>,
    devices: mpsc::Sender<DiscoveredDevice>,
    deadline: Instant,
) {
    let mut published = 0usize;

    loop {
        let entry = tokio::select! {
            biased;
            _ = sleep_until(deadline) => {
                debug!("Discovery deadline reached");
                break;
            }
            _ = devices.closed() => break,
            entry = entries.recv() => match entry {
                Some(entry) => entry,
                None => break,
            },
        };

        if entry.is_placeholder() {
            trace!("Skipping empty mDNS entry");
            continue;
        }

        let device = translate_entry(&entry);

        tokio::select! {
            biased;
            _ = sleep_until(deadline) => break,
            sent = devices.send(device) => {
                if sent.is_err() {
                    break;
                }
                published += 1;
            }
        }
    }

    info!("Discovery session closed, {} device(s) published", published);
}
