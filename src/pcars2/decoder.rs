//! # Project CARS 2 Packet Decoder
//!
//! Decodes one UDP datagram into a [`Packet`]. Decoding is stateless, so
//! duplicated or reordered datagrams are harmless.

use bytes::Buf;

use super::protocol::*;
use crate::error::DecodeError;

/// Decode a complete telemetry datagram
///
/// # Arguments
///
/// * `datagram` - Raw bytes of one UDP datagram (header included)
///
/// The packet version is carried on the header but not checked; the game
/// bumps it per packet type between patches.
///
/// # Returns
///
/// * `Result<Packet, DecodeError>` - Decoded packet, or the reason it was rejected
///
/// # Errors
///
/// Returns error if:
/// - Datagram is shorter than the 12-byte header (`MalformedHeader`)
/// - Type byte is not a known packet type (`UnknownPacketType`)
/// - Datagram is shorter than its packet type's body (`TruncatedPacket`)
///
/// # Examples
///
/// ```
/// use rev_matrix::error::DecodeError;
/// use rev_matrix::pcars2::decoder::decode;
///
/// assert!(matches!(decode(&[0u8]), Err(DecodeError::MalformedHeader { .. })));
/// ```
pub fn decode(datagram: &[u8]) -> Result<Packet, DecodeError> {
    let header = decode_header(datagram)?;

    let packet_type = PacketType::from_u8(header.packet_type)
        .ok_or(DecodeError::UnknownPacketType(header.packet_type))?;

    let expected = packet_type.min_len();
    if datagram.len() < expected {
        return Err(DecodeError::TruncatedPacket {
            packet_type,
            expected,
            actual: datagram.len(),
        });
    }

    match packet_type {
        PacketType::CarPhysics => Ok(Packet::CarPhysics {
            header,
            physics: decode_car_physics(datagram),
        }),
        PacketType::RaceDefinition
        | PacketType::Participants
        | PacketType::Timings
        | PacketType::GameState
        | PacketType::WeatherState
        | PacketType::VehicleNames
        | PacketType::TimeStats
        | PacketType::ParticipantVehicleNames => Ok(Packet::Other { header, packet_type }),
    }
}

/// Decode the fixed packet header
///
/// # Errors
///
/// Returns `MalformedHeader` if fewer than 12 bytes are available.
pub fn decode_header(datagram: &[u8]) -> Result<PacketHeader, DecodeError> {
    if datagram.len() < PCARS2_HEADER_SIZE {
        return Err(DecodeError::MalformedHeader {
            len: datagram.len(),
            min: PCARS2_HEADER_SIZE,
        });
    }

    let mut buf = &datagram[..PCARS2_HEADER_SIZE];
    Ok(PacketHeader {
        packet_number: buf.get_u32_le(),
        category_packet_number: buf.get_u32_le(),
        partial_packet_index: buf.get_u8(),
        partial_packet_count: buf.get_u8(),
        packet_type: buf.get_u8(),
        packet_version: buf.get_u8(),
    })
}

/// Extract the display fields from a CarPhysics datagram
///
/// Caller guarantees `datagram.len() >= CAR_PHYSICS_PACKET_SIZE`.
fn decode_car_physics(datagram: &[u8]) -> CarPhysics {
    let viewed_participant_index = (&datagram[OFF_VIEWED_PARTICIPANT..]).get_i8();
    let rpm = (&datagram[OFF_RPM..]).get_u16_le();
    let max_rpm = (&datagram[OFF_MAX_RPM..]).get_u16_le();
    let (gear, num_gears) = CarPhysics::unpack_gear(datagram[OFF_GEAR_NUM_GEARS]);

    CarPhysics {
        viewed_participant_index,
        rpm,
        max_rpm,
        gear,
        num_gears,
    }
}
