//! # Render Loop
//!
//! Receives telemetry datagrams and keeps the matrix in sync with them.
//!
//! Per datagram: decode → update [`TelemetryState`] → render → push to the
//! [`MatrixSink`]. A datagram that fails to decode is dropped and leaves the
//! state untouched. Only CarPhysics packets trigger a render; while no
//! datagrams arrive the matrix keeps showing the last frame.

use std::future::Future;
use tokio::net::UdpSocket;
use tracing::{debug, info, trace, warn};

use crate::display::render;
use crate::error::DecodeError;
use crate::matrix::MatrixSink;
use crate::pcars2::{decode, Packet, PacketType};
use crate::telemetry::TelemetryState;

/// Receive buffer size; larger than any datagram the game sends
pub const MAX_DATAGRAM_SIZE: usize = 2048;

/// Number of datagrams between status log messages
pub const LOG_INTERVAL_PACKETS: u64 = 1000;

/// What happened to one datagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State updated and a frame pushed
    Rendered,
    /// State updated, frame rendered, but the sink rejected it
    PushFailed,
    /// Valid packet without display fields
    Ignored(PacketType),
    /// Datagram rejected by the decoder
    Dropped(DecodeError),
}

/// Counters kept across the life of the loop
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoopStats {
    pub received: u64,
    pub rendered: u64,
    pub ignored: u64,
    pub dropped: u64,
    pub push_failures: u64,
}

/// Owns the telemetry state and drives the matrix
#[derive(Debug, Default)]
pub struct RenderLoop {
    state: TelemetryState,
    stats: LoopStats,
}

impl RenderLoop {
    /// Creates a loop with default telemetry state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current telemetry state
    pub fn state(&self) -> &TelemetryState {
        &self.state
    }

    /// Counters so far
    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// Handle one datagram.
    ///
    /// Never fails: decode errors and sink errors are logged, counted and
    /// reported through the returned [`Outcome`].
    pub async fn process_datagram<S>(&mut self, datagram: &[u8], sink: &mut S) -> Outcome
    where
        S: MatrixSink + ?Sized,
    {
        self.stats.received += 1;

        let packet = match decode(datagram) {
            Ok(packet) => packet,
            Err(e) => {
                debug!("Dropped datagram ({} bytes): {}", datagram.len(), e);
                self.stats.dropped += 1;
                return Outcome::Dropped(e);
            }
        };

        if !self.state.apply(&packet) {
            trace!("Ignoring {:?} packet", packet.packet_type());
            self.stats.ignored += 1;
            return Outcome::Ignored(packet.packet_type());
        }

        if let Packet::CarPhysics { header, physics } = &packet {
            trace!(
                packet_number = header.packet_number,
                viewed_participant = physics.viewed_participant_index,
                gear = self.state.gear,
                rpm = self.state.rpm,
                rpm_max = self.state.rpm_max,
                "Telemetry updated"
            );
        }

        let grid = render(&self.state);
        self.stats.rendered += 1;

        match sink.push(&grid).await {
            Ok(()) => Outcome::Rendered,
            Err(e) => {
                warn!("Failed to push frame to LED matrix: {}", e);
                self.stats.push_failures += 1;
                Outcome::PushFailed
            }
        }
    }

    /// One-line summary of counters and car state for the periodic log
    pub fn status_line(&self) -> String {
        format!(
            "Received {} datagrams ({} rendered, {} dropped, {} physics updates), gear {}/{} at {}/{} rpm",
            self.stats.received,
            self.stats.rendered,
            self.stats.dropped,
            self.state.updates,
            self.state.gear,
            self.state.num_gears,
            self.state.rpm,
            self.state.rpm_max
        )
    }

    /// Receive and process datagrams until `shutdown` resolves.
    ///
    /// # Returns
    ///
    /// * `LoopStats` - Counters at the time of shutdown
    pub async fn run<S, F>(&mut self, socket: &UdpSocket, sink: &mut S, shutdown: F) -> LoopStats
    where
        S: MatrixSink + ?Sized,
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        let mut buf = [0u8; MAX_DATAGRAM_SIZE];
        let mut last_log_count: u64 = 0;

        loop {
            tokio::select! {
                received = socket.recv_from(&mut buf) => {
                    match received {
                        Ok((len, addr)) => {
                            trace!("Received {} bytes from {}", len, addr);
                            self.process_datagram(&buf[..len], sink).await;
                        }
                        Err(e) => {
                            warn!("UDP receive failed: {}", e);
                            continue;
                        }
                    }

                    if self.stats.received - last_log_count >= LOG_INTERVAL_PACKETS {
                        info!("{}", self.status_line());
                        last_log_count = self.stats.received;
                    }
                }

                _ = &mut shutdown => {
                    info!("Render loop stopping after {} datagrams", self.stats.received);
                    break;
                }
            }
        }

        self.stats
    }
}
