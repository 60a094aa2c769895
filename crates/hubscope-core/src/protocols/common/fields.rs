use std::net::Ipv4Addr;

/// Folds up to eight bytes into an unsigned big-endian integer.
pub(crate) fn uint_be(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
}

/// Uppercase hex text of `bytes`, two characters per byte.
pub(crate) fn upper_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

pub(crate) fn ipv4(octets: [u8; 4]) -> String {
    Ipv4Addr::from(octets).to_string()
}

/// Lowercase byte pairs joined by colons.
pub(crate) fn mac(octets: [u8; 6]) -> String {
    octets
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// `YYYY-MM-DD HH:MM:SS` from raw components.
///
/// Components are printed as decoded; month 13 or day 32 pass through.
pub(crate) fn timestamp(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> String {
    format!(
        "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
        year, month, day, hour, minute, second
    )
}

/// Joins the decimal digits of `int_part` and `frac_part` around a dot and
/// reads the text as a float.
///
/// The fraction is padded to two digits but never clamped, so a fraction
/// byte of 5 reads as `.05` and 123 reads as `.123`. This is not a divide
/// by 100 of the raw pair.
pub(crate) fn fixed_point_decimal(int_part: u8, frac_part: u8) -> f64 {
    let scale: u32 = if frac_part < 100 { 100 } else { 1000 };
    // Both operands are exact, so the quotient rounds the same way as
    // parsing the decimal text.
    let scaled = u32::from(int_part) * scale + u32::from(frac_part);
    f64::from(scaled) / f64::from(scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint_be_reads_big_endian() {
        assert_eq!(uint_be(&[0x00, 0x00, 0x30, 0x39]), 12345);
        assert_eq!(uint_be(&[0x07, 0xE9]), 2025);
        assert_eq!(uint_be(&[]), 0);
    }

    #[test]
    fn uint_be_reads_six_bytes() {
        assert_eq!(uint_be(&[0x00, 0x00, 0x00, 0x01, 0x00, 0x00]), 65536);
    }

    #[test]
    fn ipv4_is_dotted_decimal() {
        assert_eq!(ipv4([0xC0, 0xA8, 0x01, 0x0A]), "192.168.1.10");
        assert_eq!(ipv4([0, 0, 0, 0]), "0.0.0.0");
    }

    #[test]
    fn mac_is_lowercase_colon_hex() {
        assert_eq!(
            mac([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]),
            "aa:bb:cc:dd:ee:ff"
        );
        assert_eq!(mac([0x00, 0x01, 0x02, 0x03, 0x04, 0x05]), "00:01:02:03:04:05");
    }

    #[test]
    fn timestamp_formats_components() {
        assert_eq!(timestamp(2025, 8, 22, 10, 30, 0), "2025-08-22 10:30:00");
    }

    #[test]
    fn timestamp_skips_calendar_validation() {
        assert_eq!(timestamp(2025, 13, 22, 10, 30, 0), "2025-13-22 10:30:00");
        assert_eq!(timestamp(2025, 2, 32, 25, 61, 99), "2025-02-32 25:61:99");
    }

    #[test]
    fn fixed_point_concatenates_digits() {
        assert_eq!(fixed_point_decimal(23, 10), 23.10);
        assert_eq!(fixed_point_decimal(23, 5), 23.05);
        assert_eq!(fixed_point_decimal(23, 0), 23.0);
    }

    #[test]
    fn fixed_point_keeps_three_digit_fraction() {
        assert_eq!(fixed_point_decimal(23, 100), 23.100);
        assert_eq!(fixed_point_decimal(23, 123), 23.123);
        assert_ne!(fixed_point_decimal(23, 123), 24.23);
    }

    #[test]
    fn fixed_point_matches_decimal_text() {
        for int_part in 0..=u8::MAX {
            for frac_part in 0..=u8::MAX {
                let text = format!("{}.{:02}", int_part, frac_part);
                let expected: f64 = text.parse().unwrap();
                assert_eq!(fixed_point_decimal(int_part, frac_part), expected, "{text}");
            }
        }
    }
}
