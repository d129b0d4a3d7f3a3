//! # CRC8-DVB-S2 Implementation
//!
//! Checksum over the length, type and pixel payload of a matrix frame.
//!
//! **Polynomial**: 0xD5 (x^8 + x^7 + x^6 + x^4 + x^2 + 1)
//! **Initial Value**: 0x00

/// CRC-8-DVB-S2 polynomial
const CRC8_POLY: u8 = 0xD5;

/// Precomputed CRC8 lookup table
const CRC8_TABLE: [u8; 256] = generate_crc8_table();

const fn generate_crc8_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;

    while i < 256 {
        let mut crc = i as u8;
        let mut j = 0;

        while j < 8 {
            if (crc & 0x80) != 0 {
                crc = (crc << 1) ^ CRC8_POLY;
            } else {
                crc <<= 1;
            }
            j += 1;
        }

        table[i] = crc;
        i += 1;
    }

    table
}

/// Calculate the CRC8-DVB-S2 checksum of `data`
///
/// # Examples
///
/// ```
/// use rev_matrix::matrix::crc::crc8_dvb_s2;
///
/// assert_eq!(crc8_dvb_s2(&[]), 0x00);
/// ```
pub fn crc8_dvb_s2(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |crc, &byte| CRC8_TABLE[(crc ^ byte) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bitwise reference implementation
    fn crc8_bitwise(data: &[u8]) -> u8 {
        let mut crc: u8 = 0;
        for &byte in data {
            crc ^= byte;
            for _ in 0..8 {
                crc = if crc & 0x80 != 0 { (crc << 1) ^ CRC8_POLY } else { crc << 1 };
            }
        }
        crc
    }

    #[test]
    fn test_crc8_empty() {
        assert_eq!(crc8_dvb_s2(&[]), 0x00);
    }

    #[test]
    fn test_crc8_check_value() {
        // Standard check input for CRC-8/DVB-S2
        assert_eq!(crc8_dvb_s2(b"123456789"), 0xBC);
    }

    #[test]
    fn test_crc8_table_matches_bitwise() {
        let inputs = [
            vec![0x01, 0x02, 0x03],
            vec![0xC2, 0x01, 0xFF, 0x00, 0xFF],
            vec![0x00; 192],
            vec![0xFF; 10],
        ];

        for data in inputs.iter() {
            assert_eq!(crc8_dvb_s2(data), crc8_bitwise(data), "CRC mismatch for {:?}", data);
        }
    }

    #[test]
    fn test_crc8_changes_with_data() {
        assert_ne!(crc8_dvb_s2(&[0xC2, 0x01, 0x00]), crc8_dvb_s2(&[0xC2, 0x01, 0x01]));
    }
}
