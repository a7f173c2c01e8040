//! Integer types accepted by the index guards.

/// A primitive integer usable as an index or a bound.
///
/// Guards compare index and bound in this type, so no width or signedness
/// conversion happens before the check. Values are only widened to `i64`
/// (saturating at the ends) when a violation is recorded.
pub trait IndexInt: Copy + PartialOrd {
    fn is_negative(self) -> bool;

    fn to_i64_saturating(self) -> i64;
}

macro_rules! impl_signed {
    ($($ty:ty),*) => {$(
        impl IndexInt for $ty {
            #[inline]
            fn is_negative(self) -> bool {
                self < 0
            }

            #[inline]
            fn to_i64_saturating(self) -> i64 {
                i64::try_from(self).unwrap_or(if self < 0 { i64::MIN } else { i64::MAX })
            }
        }
    )*};
}

macro_rules! impl_unsigned {
    ($($ty:ty),*) => {$(
        impl IndexInt for $ty {
            #[inline]
            fn is_negative(self) -> bool {
                false
            }

            #[inline]
            fn to_i64_saturating(self) -> i64 {
                i64::try_from(self).unwrap_or(i64::MAX)
            }
        }
    )*};
}

impl_signed!(i8, i16, i32, i64, i128, isize);
impl_unsigned!(u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests;
