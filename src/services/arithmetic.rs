#![forbid(unsafe_code)]

// ---------------------------------------------------------------------------
// add:
// ---------------------------------------------------------------------------
/** Add two 32-bit integers.  Overflow wraps around (two's complement). */
pub fn add(a: i32, b: i32) -> i32 {
    a.wrapping_add(b)
}

// ***************************************************************************
//                                  Tests
// ***************************************************************************
#[cfg(test)]
mod tests {
    use super::add;
    use proptest::prelude::*;

    #[test]
    fn add_adds_two_integers() {
        assert_eq!(add(3, 4), 7);
        assert_eq!(add(-3, 4), 1);
        assert_eq!(add(0, 0), 0);
    }

    #[test]
    fn add_wraps_on_overflow() {
        assert_eq!(add(i32::MAX, 1), i32::MIN);
        assert_eq!(add(i32::MIN, -1), i32::MAX);
    }

    proptest! {
        #[test]
        fn add_is_commutative(a: i32, b: i32) {
            prop_assert_eq!(add(a, b), add(b, a));
        }

        #[test]
        fn subtracting_a_recovers_b(a: i32, b: i32) {
            prop_assert_eq!(add(a, b).wrapping_sub(a), b);
        }
    }
}
