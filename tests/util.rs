/// Check that `$actual` lies within a relative distance `$tolerance` of `$expected`.
#[macro_export]
macro_rules! assert_relative_near {
    ($expected:expr, $actual:expr, $tolerance:expr, $msg:expr) => {{
        let expected: f64 = $expected;
        let actual: f64 = $actual;
        let relative_diff = ((actual - expected) / expected).abs();
        assert!(
            relative_diff <= $tolerance,
            "{}: expected {} but got {} (relative difference {:.3})",
            $msg,
            expected,
            actual,
            relative_diff,
        );
    }};
}
