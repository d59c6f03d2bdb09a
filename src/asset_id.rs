use std::fmt;
use std::str::FromStr;

use crate::error::{LabelError, Result};

const MINOR_PER_MAJOR: u32 = 1000;

/// A two-part asset identifier, collapsed to `major * 1000 + minor`.
///
/// Displays as zero-padded `MMM-NNN`. The ordering of the collapsed integer
/// is the ordering used for ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId(u32);

impl AssetId {
    /// Wraps an already collapsed asset number.
    pub const fn new(number: u32) -> Self {
        AssetId(number)
    }

    /// Collapses `major` and `minor` into one asset number.
    ///
    /// A `minor` of 1000 or more is accepted but carries into the major part,
    /// so the result will not format back to the same pair.
    ///
    /// # Errors
    /// Returns [`LabelError::Format`] when the collapsed number overflows.
    pub fn from_parts(major: u32, minor: u32) -> Result<Self> {
        major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|n| n.checked_add(minor))
            .map(AssetId)
            .ok_or_else(|| {
                LabelError::format(&format!("{major}-{minor}"), "Asset ID is out of range.")
            })
    }

    /// The collapsed asset number.
    pub const fn number(self) -> u32 {
        self.0
    }

    /// Part before the separator.
    pub const fn major(self) -> u32 {
        self.0 / MINOR_PER_MAJOR
    }

    /// Part after the separator.
    pub const fn minor(self) -> u32 {
        self.0 % MINOR_PER_MAJOR
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}-{:03}", self.major(), self.minor())
    }
}

impl FromStr for AssetId {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self> {
        let mut piece_iter = s.split('-');
        let (Some(major), Some(minor), None) =
            (piece_iter.next(), piece_iter.next(), piece_iter.next())
        else {
            return Err(LabelError::format(s, "Asset ID must be in 'XXX-YYY' format."));
        };

        let parse_part = |part: &str| {
            let part = part.trim();
            part.parse::<u32>()
                .map_err(|e| LabelError::format(s, format!("'{part}' is not a number: {e}")))
        };

        let major = parse_part(major)?;
        let minor = parse_part(minor)?;
        if minor >= MINOR_PER_MAJOR {
            tracing::warn!(input = s, minor, "minor part of 1000 or more will not round-trip");
        }

        AssetId::from_parts(major, minor)
            .map_err(|_| LabelError::format(s, "Asset ID is out of range."))
    }
}

/// An inclusive, ascending run of asset IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetRange {
    start: AssetId,
    end: AssetId,
}

impl AssetRange {
    /// Builds the range `start..=end`.
    ///
    /// # Errors
    /// Returns [`LabelError::InvertedRange`] when `start` sorts after `end`.
    pub fn new(start: AssetId, end: AssetId) -> Result<Self> {
        if start > end {
            return Err(LabelError::InvertedRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(AssetRange { start, end })
    }

    /// First ID of the range.
    pub fn start(&self) -> AssetId {
        self.start
    }

    /// Last ID of the range.
    pub fn end(&self) -> AssetId {
        self.end
    }

    /// Number of IDs in the range. Never zero.
    pub fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize + 1
    }

    /// Always `false`; present for symmetry with [`AssetRange::len`].
    pub fn is_empty(&self) -> bool {
        false
    }

    /// IDs in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = AssetId> {
        (self.start.0..=self.end.0).map(AssetId)
    }
}

impl IntoIterator for AssetRange {
    type Item = AssetId;
    type IntoIter = std::iter::Map<std::ops::RangeInclusive<u32>, fn(u32) -> AssetId>;

    fn into_iter(self) -> Self::IntoIter {
        (self.start.0..=self.end.0).map(AssetId as fn(u32) -> AssetId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padded_ids_round_trip() {
        for text in ["000-000", "001-086", "042-999", "999-001", "123-456"] {
            let id: AssetId = text.parse().unwrap();
            assert_eq!(id.to_string(), text);
        }
    }

    #[test]
    fn collapses_to_major_times_thousand_plus_minor() {
        let id: AssetId = "001-086".parse().unwrap();
        assert_eq!(id.number(), 1086);
        assert_eq!(id.major(), 1);
        assert_eq!(id.minor(), 86);
    }

    #[test]
    fn unpadded_parts_are_accepted() {
        let id: AssetId = "1-2".parse().unwrap();
        assert_eq!(id.number(), 1002);
        assert_eq!(id.to_string(), "001-002");
    }

    #[test]
    fn wrong_separator_count_is_rejected() {
        for text in ["", "001", "001086", "001-002-003", "--", "001-", "-001"] {
            let err = text.parse::<AssetId>().unwrap_err();
            assert!(matches!(err, LabelError::Format { .. }), "{text:?} gave {err:?}");
        }
    }

    #[test]
    fn non_numeric_parts_are_rejected() {
        for text in ["abc-001", "001-xyz", "0x1-001", "1.5-002"] {
            assert!(matches!(text.parse::<AssetId>(), Err(LabelError::Format { .. })));
        }
    }

    #[test]
    fn format_error_names_the_input() {
        let err = "001".parse::<AssetId>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid asset ID format: 001. Asset ID must be in 'XXX-YYY' format."
        );
    }

    #[test]
    fn oversized_minor_carries_into_major() {
        let id: AssetId = "001-1500".parse().unwrap();
        assert_eq!(id.number(), 2500);
        assert_eq!(id.to_string(), "002-500");
    }

    #[test]
    fn overflow_is_a_format_error() {
        assert!(matches!("4294968-000".parse::<AssetId>(), Err(LabelError::Format { .. })));
    }

    #[test]
    fn range_yields_every_id_in_order() {
        let (start, end) = ("001-000".parse().unwrap(), "001-002".parse().unwrap());
        let range = AssetRange::new(start, end).unwrap();
        let ids: Vec<_> = range.iter().collect();
        assert_eq!(ids.iter().map(|id| id.number()).collect::<Vec<_>>(), [1000, 1001, 1002]);
        assert_eq!(
            ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
            ["001-000", "001-001", "001-002"]
        );
        assert_eq!(range.len(), 3);
        assert_eq!(range.into_iter().count(), 3);
    }

    #[test]
    fn single_id_range_has_one_entry() {
        let id = AssetId::new(7);
        let range = AssetRange::new(id, id).unwrap();
        assert_eq!(range.iter().collect::<Vec<_>>(), [id]);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = AssetRange::new(AssetId::new(1002), AssetId::new(1000)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Starting asset ID (001-002) cannot be greater than ending asset ID (001-000)."
        );
    }
}
