use pretty_assertions::assert_eq;

use super::*;

#[test]
fn negativity() {
    assert!((-1_i32).is_negative());
    assert!(!0_i64.is_negative());
    assert!(!u8::MAX.is_negative());
    assert!(isize::MIN.is_negative());
}

#[test]
fn widening_is_exact_in_range() {
    assert_eq!(42_u8.to_i64_saturating(), 42);
    assert_eq!((-7_i16).to_i64_saturating(), -7);
    assert_eq!(usize::from(3_u8).to_i64_saturating(), 3);
}

#[test]
fn widening_saturates_out_of_range() {
    assert_eq!(u64::MAX.to_i64_saturating(), i64::MAX);
    assert_eq!(u128::MAX.to_i64_saturating(), i64::MAX);
    assert_eq!(i128::MIN.to_i64_saturating(), i64::MIN);
    assert_eq!(i128::MAX.to_i64_saturating(), i64::MAX);
}
