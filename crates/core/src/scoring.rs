//! Scoring module - points and gravity speed-up for cleared rows
//!
//! Clearing `n` rows with one piece is worth `n²` points, and multiplies the
//! gravity interval by `0.95^(n²)`, never going below the minimum interval.

use std::time::Duration;

use crate::types::SPEEDUP_FACTOR;

/// Points for clearing `rows` rows with a single piece
pub fn line_clear_score(rows: u32) -> u32 {
    rows * rows
}

/// Gravity interval after clearing `rows` rows
pub fn next_fall_interval(current: Duration, rows: u32, floor: Duration) -> Duration {
    if rows == 0 {
        return current;
    }
    let exponent = (rows * rows) as i32;
    current.mul_f64(SPEEDUP_FACTOR.powi(exponent)).max(floor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn close(a: Duration, b: Duration) -> bool {
        let diff = if a > b { a - b } else { b - a };
        diff < Duration::from_micros(10)
    }

    #[test]
    fn test_score_is_square_of_rows() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 1);
        assert_eq!(line_clear_score(2), 4);
        assert_eq!(line_clear_score(3), 9);
        assert_eq!(line_clear_score(4), 16);
    }

    #[test]
    fn test_no_rows_keeps_interval() {
        assert_eq!(next_fall_interval(ms(734), 0, ms(100)), ms(734));
    }

    #[test]
    fn test_interval_scales_by_squared_rows() {
        assert!(close(next_fall_interval(ms(1000), 1, ms(100)), ms(950)));
        // 0.95^4 = 0.81450625
        assert!(close(
            next_fall_interval(ms(1000), 2, ms(100)),
            Duration::from_micros(814_506)
        ));
    }

    #[test]
    fn test_interval_is_floored() {
        // 0.95^16 ≈ 0.44
        assert_eq!(next_fall_interval(ms(150), 4, ms(100)), ms(100));
        assert_eq!(next_fall_interval(ms(100), 1, ms(100)), ms(100));
    }
}
