//! Levelled assertions.
//!
//! The simple level is always active and is the level at which protocol violations (e.g. restoring
//! without an outstanding checkpoint) are reported. The higher levels guard more expensive
//! consistency checks and are only enabled with the `debug-checks` feature.

#[cfg(not(feature = "debug-checks"))]
pub const SAPLING_ASSERT_LEVEL_DEFINITION: u8 = SAPLING_ASSERT_SIMPLE;

#[cfg(feature = "debug-checks")]
pub const SAPLING_ASSERT_LEVEL_DEFINITION: u8 = SAPLING_ASSERT_ADVANCED;

pub const SAPLING_ASSERT_SIMPLE: u8 = 1;
pub const SAPLING_ASSERT_MODERATE: u8 = 2;
pub const SAPLING_ASSERT_ADVANCED: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! sapling_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::SAPLING_ASSERT_LEVEL_DEFINITION >= $crate::asserts::SAPLING_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! sapling_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::SAPLING_ASSERT_LEVEL_DEFINITION >= $crate::asserts::SAPLING_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}
