#![cfg(test)]

mod harness;
mod tests;

pub use harness::{OpsHarness, SvgHarness, TestHarness};

macro_rules! assert_plots_eq {
    ($harness:ty, $expected:expr, $actual:expr, $size:expr) => {
        if let Err(diff) = <$harness as $crate::TestHarness>::check_same($expected, $actual, $size) {
            panic!(
                "{} assertion failed: plots differ\n{}",
                <$harness as $crate::TestHarness>::id(),
                diff
            );
        }
    };
    ($expected:expr, $actual:expr, $size:expr) => {
        assert_plots_eq!($crate::OpsHarness, $expected, $actual, $size);
        assert_plots_eq!($crate::SvgHarness, $expected, $actual, $size);
    };
    ($expected:expr, $actual:expr) => {
        assert_plots_eq!($expected, $actual, $crate::tests::size_small());
    };
}

pub(crate) use assert_plots_eq;
