use std::ops::Range;

use super::error::FieldError;
use super::fields;

/// Bounds-checked field access over a hub payload.
///
/// Offsets are byte offsets. Structured reads fail with
/// [`FieldError::TooShort`] when they would run past the end of the payload;
/// [`HubReader::hex_slice`] is the one lenient read and returns whatever is
/// available.
pub struct HubReader<'a> {
    payload: &'a [u8],
}

impl<'a> HubReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    /// True when a full record of `width` bytes starts at `offset`.
    pub fn fits(&self, offset: usize, width: usize) -> bool {
        offset
            .checked_add(width)
            .is_some_and(|end| end <= self.payload.len())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, FieldError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(FieldError::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], FieldError> {
        self.payload.get(range.clone()).ok_or(FieldError::TooShort {
            needed: range.end,
            actual: self.payload.len(),
        })
    }

    pub fn read_u16_be(&self, offset: usize) -> Result<u16, FieldError> {
        let bytes = self.read_array::<2>(offset)?;
        Ok(u16::from_be_bytes(bytes))
    }

    /// Unsigned big-endian integer over `range` (at most eight bytes).
    pub fn read_uint(&self, range: Range<usize>) -> Result<u64, FieldError> {
        debug_assert!(range.len() <= 8);
        Ok(fields::uint_be(self.read_slice(range)?))
    }

    /// Unsigned integer over `range`, re-expressed as decimal text.
    pub fn read_decimal_id(&self, range: Range<usize>) -> Result<String, FieldError> {
        Ok(self.read_uint(range)?.to_string())
    }

    /// Raw uppercase hex of `range`, truncated at the end of the payload.
    pub fn hex_slice(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.payload.len());
        let start = range.start.min(end);
        fields::upper_hex(&self.payload[start..end])
    }

    pub fn read_ipv4(&self, offset: usize) -> Result<String, FieldError> {
        Ok(fields::ipv4(self.read_array::<4>(offset)?))
    }

    pub fn read_mac(&self, offset: usize) -> Result<String, FieldError> {
        Ok(fields::mac(self.read_array::<6>(offset)?))
    }

    /// Timestamp laid out as year(2B) month day hour minute second.
    pub fn read_timestamp(&self, offset: usize) -> Result<String, FieldError> {
        let year = self.read_u16_be(offset)?;
        let [month, day, hour, minute, second] = self.read_array::<5>(offset + 2)?;
        Ok(fields::timestamp(year, month, day, hour, minute, second))
    }

    /// Textual fixed-point pair: integer byte at `offset`, fraction byte after it.
    pub fn read_fixed_point(&self, offset: usize) -> Result<f64, FieldError> {
        let [int_part, frac_part] = self.read_array::<2>(offset)?;
        Ok(fields::fixed_point_decimal(int_part, frac_part))
    }

    fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N], FieldError> {
        let bytes = self.read_slice(offset..offset + N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}
