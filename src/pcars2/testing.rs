//! Datagram builders shared by unit tests.

use super::protocol::*;

/// Zeroed datagram of `len` bytes with a filled-in header
///
/// Header: packet 1234, category 56, part 1 of 1, version 2.
pub fn datagram(packet_type: u8, len: usize) -> Vec<u8> {
    let mut data = vec![0u8; len];
    data[0..4].copy_from_slice(&1234u32.to_le_bytes());
    data[4..8].copy_from_slice(&56u32.to_le_bytes());
    data[8] = 1; // partial index
    data[9] = 1; // partial count
    data[10] = packet_type;
    data[11] = 2; // version
    data
}

/// Smallest valid datagram of `packet_type`
pub fn packet(packet_type: PacketType) -> Vec<u8> {
    datagram(packet_type.as_u8(), packet_type.min_len())
}

/// CarPhysics datagram viewing participant 4
pub fn car_physics(gear_byte: u8, rpm: u16, max_rpm: u16) -> Vec<u8> {
    let mut data = packet(PacketType::CarPhysics);
    data[OFF_VIEWED_PARTICIPANT] = 4;
    data[OFF_RPM..OFF_RPM + 2].copy_from_slice(&rpm.to_le_bytes());
    data[OFF_MAX_RPM..OFF_MAX_RPM + 2].copy_from_slice(&max_rpm.to_le_bytes());
    data[OFF_GEAR_NUM_GEARS] = gear_byte;
    data
}
