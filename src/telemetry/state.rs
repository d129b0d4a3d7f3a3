//! # Telemetry State
//!
//! The small slice of car state the display needs, accumulated across
//! datagrams. Fields keep their last value until a packet overwrites them.

use crate::pcars2::Packet;

/// Smallest allowed max RPM; keeps the RPM ratio well defined
pub const MIN_RPM_MAX: u16 = 1;

/// Car state retained between datagrams
///
/// Created once at startup and owned by the render loop.
///
/// # Examples
///
/// ```
/// use rev_matrix::telemetry::TelemetryState;
///
/// let state = TelemetryState::new();
/// assert_eq!(state.gear, 0);
/// assert_eq!(state.rpm, 0);
/// assert_eq!(state.rpm_max, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryState {
    /// Selected gear: -1 reverse, 0 neutral, positive forward
    pub gear: i8,

    /// Engine speed
    pub rpm: u16,

    /// Rev limit, never below [`MIN_RPM_MAX`]
    pub rpm_max: u16,

    /// Number of forward gears the car reports
    pub num_gears: u8,

    /// CarPhysics packets applied so far
    pub updates: u64,
}

impl Default for TelemetryState {
    fn default() -> Self {
        Self {
            gear: 0,
            rpm: 0,
            rpm_max: MIN_RPM_MAX,
            num_gears: 0,
            updates: 0,
        }
    }
}

impl TelemetryState {
    /// Creates a state with neutral gear and zero RPM.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a decoded packet.
    ///
    /// CarPhysics packets overwrite gear, RPM and max RPM unconditionally,
    /// whatever their sequence number. Every other packet type leaves the
    /// state untouched.
    ///
    /// # Returns
    ///
    /// * `bool` - `true` if the packet carried display fields
    ///
    /// # Examples
    ///
    /// ```
    /// use rev_matrix::pcars2::{CarPhysics, Packet, PacketHeader};
    /// use rev_matrix::telemetry::TelemetryState;
    ///
    /// let header = PacketHeader {
    ///     packet_number: 1,
    ///     category_packet_number: 1,
    ///     partial_packet_index: 1,
    ///     partial_packet_count: 1,
    ///     packet_type: 0,
    ///     packet_version: 2,
    /// };
    /// let physics = CarPhysics {
    ///     viewed_participant_index: 0,
    ///     rpm: 6500,
    ///     max_rpm: 8000,
    ///     gear: 3,
    ///     num_gears: 6,
    /// };
    ///
    /// let mut state = TelemetryState::new();
    /// assert!(state.apply(&Packet::CarPhysics { header, physics }));
    /// assert_eq!(state.gear, 3);
    /// ```
    pub fn apply(&mut self, packet: &Packet) -> bool {
        match packet {
            Packet::CarPhysics { physics, .. } => {
                self.gear = physics.gear;
                self.rpm = physics.rpm;
                self.rpm_max = physics.max_rpm.max(MIN_RPM_MAX);
                self.num_gears = physics.num_gears;
                self.updates += 1;
                true
            }
            Packet::Other { .. } => false,
        }
    }

    /// Engine speed as a fraction of the rev limit, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn rpm_ratio(&self) -> f32 {
        let rpm_max = self.rpm_max.max(MIN_RPM_MAX);
        (f32::from(self.rpm) / f32::from(rpm_max)).clamp(0.0, 1.0)
    }
}
