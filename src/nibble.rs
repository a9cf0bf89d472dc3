use std::fmt;
use std::ops::{Index, IndexMut};

/// A 4-bit unsigned integer (nibble), used for register indices and key codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(non_camel_case_types)]
pub struct u4(u8);

impl u4 {
    pub const MAX: u4 = u4(0x0F);

    /// Creates a new `u4` from a `u8`.
    ///
    /// Panics if the value is greater than 0x0F.
    pub const fn new(value: u8) -> Self {
        assert!(value <= 0x0F, "u4 value must be in range 0x0-0xF");
        Self(value)
    }

    /// Creates a `u4` from the low four bits of `value`, discarding the rest.
    pub const fn low(value: u8) -> Self {
        Self(value & 0x0F)
    }

    /// Returns `None` if `value` does not fit in four bits.
    pub const fn try_new(value: u8) -> Option<Self> {
        if value <= 0x0F { Some(Self(value)) } else { None }
    }

    pub const fn get(self) -> u8 {
        self.0
    }
}

impl From<u4> for usize {
    fn from(v: u4) -> usize {
        v.0 as usize
    }
}

impl From<u4> for u8 {
    fn from(v: u4) -> u8 {
        v.0
    }
}

impl fmt::Display for u4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.0)
    }
}

impl<T> Index<u4> for [T; 16] {
    type Output = T;

    fn index(&self, index: u4) -> &Self::Output {
        &self[index.0 as usize]
    }
}

impl<T> IndexMut<u4> for [T; 16] {
    fn index_mut(&mut self, index: u4) -> &mut Self::Output {
        &mut self[index.0 as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_masks_high_bits() {
        assert_eq!(u4::low(0xAB).get(), 0x0B);
        assert_eq!(u4::low(0x0F), u4::MAX);
    }

    #[test]
    fn try_new_rejects_wide_values() {
        assert_eq!(u4::try_new(0x0F), Some(u4::new(0x0F)));
        assert_eq!(u4::try_new(0x10), None);
    }

    #[test]
    #[should_panic]
    fn new_panics_on_wide_value() {
        let _ = u4::new(0x10);
    }

    #[test]
    fn indexes_register_file() {
        let mut regs = [0u8; 16];
        regs[u4::new(0xF)] = 7;
        assert_eq!(regs[15], 7);
        assert_eq!(regs[u4::new(0xF)], 7);
    }
}
