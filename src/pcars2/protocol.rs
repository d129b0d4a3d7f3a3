//! # Project CARS 2 Protocol Constants and Types
//!
//! Wire layout of the SMS UDP telemetry stream (protocol version 2).
//! All multi-byte fields are little-endian.
//!
//! ```text
//! Offset  Type  Field
//!  0      u32   packet number (all packets sent this game run)
//!  4      u32   category packet number (packets of this type)
//!  8      u8    partial packet index
//!  9      u8    partial packet count
//! 10      u8    packet type
//! 11      u8    packet version
//! ```

/// Default UDP port the game streams to
pub const PCARS2_UDP_PORT: u16 = 5606;

/// Fixed header size shared by every packet type
pub const PCARS2_HEADER_SIZE: usize = 12;

/// Largest datagram the game emits (vehicle class names packet)
pub const PCARS2_MAX_PACKET_SIZE: usize = 1452;

/// CarPhysics (sTelemetryData) packet size
pub const CAR_PHYSICS_PACKET_SIZE: usize = 559;

/// Viewed participant index (i8)
pub const OFF_VIEWED_PARTICIPANT: usize = 12;

/// Engine RPM (u16)
pub const OFF_RPM: usize = 40;

/// Max RPM (u16)
pub const OFF_MAX_RPM: usize = 42;

/// Gear in the low nibble, number of gears in the high nibble (u8)
pub const OFF_GEAR_NUM_GEARS: usize = 45;

/// Gear nibble value the game uses for reverse
pub const GEAR_NIBBLE_REVERSE: u8 = 15;

/// Packet type tag from the header's type byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketType {
    /// Physics and car state of the viewed car
    CarPhysics,
    /// Track and session description
    RaceDefinition,
    /// Participant names and nationalities
    Participants,
    /// Lap timing for all participants
    Timings,
    /// Game state and weather
    GameState,
    /// Declared by the game but never sent
    WeatherState,
    /// Declared by the game but never sent
    VehicleNames,
    /// Best and last lap statistics
    TimeStats,
    /// Vehicle and class names (shares its tag with the class names packet)
    ParticipantVehicleNames,
}

impl PacketType {
    /// Every known packet type, in tag order
    pub const ALL: [PacketType; 9] = [
        PacketType::CarPhysics,
        PacketType::RaceDefinition,
        PacketType::Participants,
        PacketType::Timings,
        PacketType::GameState,
        PacketType::WeatherState,
        PacketType::VehicleNames,
        PacketType::TimeStats,
        PacketType::ParticipantVehicleNames,
    ];

    /// Map a header type byte to a packet type
    ///
    /// Returns `None` for values outside the known enumeration.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// Type byte as it appears on the wire
    pub fn as_u8(self) -> u8 {
        match self {
            PacketType::CarPhysics => 0,
            PacketType::RaceDefinition => 1,
            PacketType::Participants => 2,
            PacketType::Timings => 3,
            PacketType::GameState => 4,
            PacketType::WeatherState => 5,
            PacketType::VehicleNames => 6,
            PacketType::TimeStats => 7,
            PacketType::ParticipantVehicleNames => 8,
        }
    }

    /// Minimum datagram length (header included) for this packet type
    ///
    /// Types the game declares but never sends only require the header.
    pub fn min_len(self) -> usize {
        match self {
            PacketType::CarPhysics => CAR_PHYSICS_PACKET_SIZE,
            PacketType::RaceDefinition => 308,
            PacketType::Participants => 1136,
            PacketType::Timings => 1063,
            PacketType::GameState => 24,
            PacketType::WeatherState | PacketType::VehicleNames => PCARS2_HEADER_SIZE,
            PacketType::TimeStats => 1040,
            PacketType::ParticipantVehicleNames => 1164,
        }
    }
}

/// Header present at the start of every datagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    /// Counter over all packets sent during the game run
    pub packet_number: u32,

    /// Counter over packets of this category
    pub category_packet_number: u32,

    /// Index of this part when a category is split over several datagrams
    pub partial_packet_index: u8,

    /// Number of parts the category was split into
    pub partial_packet_count: u8,

    /// Raw packet type byte
    pub packet_type: u8,

    /// Layout version of this packet type
    pub packet_version: u8,
}

/// Car state fields extracted from a CarPhysics packet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarPhysics {
    /// Index of the participant whose car is being viewed
    pub viewed_participant_index: i8,

    /// Engine speed
    pub rpm: u16,

    /// Rev limit of the current car
    pub max_rpm: u16,

    /// Selected gear: -1 reverse, 0 neutral, 1..=14 forward
    pub gear: i8,

    /// Number of forward gears the car has
    pub num_gears: u8,
}

impl CarPhysics {
    /// Split the packed gear byte into `(gear, num_gears)`
    ///
    /// The low nibble holds the gear, with 15 standing for reverse. The high
    /// nibble holds the number of forward gears.
    pub fn unpack_gear(raw: u8) -> (i8, u8) {
        let nibble = raw & 0x0F;
        let gear = if nibble == GEAR_NIBBLE_REVERSE {
            -1
        } else {
            nibble as i8
        };
        (gear, raw >> 4)
    }
}

/// A decoded telemetry datagram
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packet {
    /// Car physics, the only packet carrying display fields
    CarPhysics {
        header: PacketHeader,
        physics: CarPhysics,
    },

    /// Any other recognized packet; the body is not parsed
    Other {
        header: PacketHeader,
        packet_type: PacketType,
    },
}

impl Packet {
    /// Header of the decoded datagram
    pub fn header(&self) -> &PacketHeader {
        match self {
            Packet::CarPhysics { header, .. } | Packet::Other { header, .. } => header,
        }
    }

    /// Packet type of the decoded datagram
    pub fn packet_type(&self) -> PacketType {
        match self {
            Packet::CarPhysics { .. } => PacketType::CarPhysics,
            Packet::Other { packet_type, .. } => *packet_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_constants() {
        assert_eq!(PCARS2_UDP_PORT, 5606);
        assert_eq!(PCARS2_HEADER_SIZE, 12);
        assert_eq!(CAR_PHYSICS_PACKET_SIZE, 559);
    }

    #[test]
    fn test_packet_type_round_trip_tags() {
        for (tag, packet_type) in PacketType::ALL.iter().enumerate() {
            assert_eq!(PacketType::from_u8(tag as u8), Some(*packet_type));
            assert_eq!(packet_type.as_u8() as usize, tag);
        }
    }

    #[test]
    fn test_packet_type_unknown_values() {
        assert_eq!(PacketType::from_u8(9), None);
        assert_eq!(PacketType::from_u8(255), None);
    }

    #[test]
    fn test_min_len_never_below_header() {
        for packet_type in PacketType::ALL {
            assert!(packet_type.min_len() >= PCARS2_HEADER_SIZE);
        }
        assert!(PacketType::CarPhysics.min_len() > OFF_GEAR_NUM_GEARS);
    }

    #[test]
    fn test_unpack_gear() {
        assert_eq!(CarPhysics::unpack_gear(0x63), (3, 6));
        assert_eq!(CarPhysics::unpack_gear(0x60), (0, 6));
        assert_eq!(CarPhysics::unpack_gear(0x6F), (-1, 6));
        assert_eq!(CarPhysics::unpack_gear(0x0E), (14, 0));
    }
}
