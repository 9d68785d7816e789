//! Sets of byte values.

use std::ops::{Bound, RangeBounds};

/// A set of byte values in the closed range `0..=255`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ByteSet {
    bytes: [bool; 256],
}

impl Default for ByteSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteSet {
    /// Creates a new empty byte set.
    #[must_use]
    pub const fn new() -> Self {
        ByteSet {
            bytes: [false; 256],
        }
    }

    /// Creates a byte set containing every byte value.
    #[must_use]
    pub const fn full() -> Self {
        ByteSet { bytes: [true; 256] }
    }

    /// Creates a byte set containing a single byte.
    #[must_use]
    pub const fn single(b: u8) -> Self {
        let mut set = Self::new();
        set.add_byte(b);
        set
    }

    /// Adds the given byte to the set.
    #[inline]
    pub const fn add_byte(&mut self, b: u8) {
        self.bytes[b as usize] = true;
    }

    /// Adds an inclusive range of bytes to the set. The endpoints may be
    /// given in either order.
    pub fn add_range(&mut self, start: u8, end: u8) {
        let (lo, hi) = if start <= end {
            (start, end)
        } else {
            (end, start)
        };
        self.bytes[to_usize(lo..=hi)].fill(true);
    }

    /// Adds every byte whose set bits include all the bits of `mask`.
    pub fn add_all_bitmask(&mut self, mask: u8) {
        for b in 0..=u8::MAX {
            if b & mask == mask {
                self.add_byte(b);
            }
        }
    }

    /// Adds every byte which shares at least one set bit with `mask`.
    pub fn add_any_bitmask(&mut self, mask: u8) {
        for b in 0..=u8::MAX {
            if b & mask != 0 {
                self.add_byte(b);
            }
        }
    }

    /// Adds every byte of `other` to this set.
    pub fn union_with(&mut self, other: &ByteSet) {
        for (mine, theirs) in self.bytes.iter_mut().zip(other.bytes.iter()) {
            *mine |= *theirs;
        }
    }

    /// Returns `true` if the set contains the given byte.
    #[inline]
    #[must_use]
    pub const fn contains(&self, b: u8) -> bool {
        self.bytes[b as usize]
    }

    /// Inverts the set within `0..=255`.
    #[inline]
    pub fn invert(&mut self) {
        for i in 0..256 {
            self.bytes[i] = !self.bytes[i];
        }
    }

    /// Returns the complement of the set within `0..=255`.
    #[must_use]
    pub fn inverted(&self) -> Self {
        let mut set = self.clone();
        set.invert();
        set
    }

    /// The number of bytes in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.iter().filter(|&&on| on).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.bytes.contains(&true)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        !self.bytes.contains(&false)
    }

    /// Iterates over the bytes in the set in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (0..=u8::MAX).filter(|&b| self.contains(b))
    }

    /// Returns the set as a list of inclusive ranges in ascending order.
    #[must_use]
    pub fn ranges(&self) -> Vec<(u8, u8)> {
        let mut ranges: Vec<(u8, u8)> = Vec::new();
        for b in self.iter() {
            match ranges.last_mut() {
                Some((_, hi)) if hi.checked_add(1) == Some(b) => *hi = b,
                _ => ranges.push((b, b)),
            }
        }
        ranges
    }
}

impl FromIterator<u8> for ByteSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::new();
        for b in iter {
            set.add_byte(b);
        }
        set
    }
}

impl std::fmt::Debug for ByteSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (i, (lo, hi)) in self.ranges().into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if lo == hi {
                write!(f, "{lo:02x}")?;
            } else {
                write!(f, "{lo:02x}-{hi:02x}")?;
            }
        }
        f.write_str("]")
    }
}

#[inline]
fn to_usize<R: RangeBounds<u8>>(r: R) -> (Bound<usize>, Bound<usize>) {
    (
        r.start_bound().map(|n| usize::from(*n)),
        r.end_bound().map(|n| usize::from(*n)),
    )
}
