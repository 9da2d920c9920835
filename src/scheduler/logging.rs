//! Iteration log filtering and formatting.

use std::fmt;
use std::time::Duration;

/// `tracing` target of the iteration log.
pub const ITER_TARGET: &str = "u_scheduler::iter";

/// Method name used for the line of an initially given solution.
pub const INITIAL_METHOD: &str = "-";

/// Returns `true` for numbers of the form `d * 10^k` with `d` in {1, 2, 5}.
pub fn is_logarithmic_number(x: usize) -> bool {
    if x == 0 {
        return false;
    }
    let mut d = x;
    while d % 10 == 0 {
        d /= 10;
    }
    matches!(d, 1 | 2 | 5)
}

/// Decides whether the given iteration gets a log line.
///
/// `in_any_case` is set for the terminating iteration and for the initial
/// solution.
pub fn should_log(
    iteration: usize,
    log_frequency: i64,
    log_new_incumbent: bool,
    new_incumbent: bool,
    in_any_case: bool,
) -> bool {
    if in_any_case || (new_incumbent && log_new_incumbent) {
        return true;
    }
    match log_frequency {
        f if f > 0 => iteration as u64 % f as u64 == 0,
        f if f < 0 => is_logarithmic_number(iteration),
        _ => false,
    }
}

/// Column header matching [`IterationRecord`]'s `Display`.
pub fn header() -> String {
    format!(
        "{:>10} {:>17} {:>12} {:>12} {:<20} info",
        "iteration", "best", "current", "time", "method"
    )
}

/// One line of the iteration log.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord<'a> {
    pub iteration: usize,
    pub best: f64,
    pub current: f64,
    pub elapsed: Duration,
    pub method: &'a str,
    pub info: Option<&'a str>,
}

impl fmt::Display for IterationRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>10} {:16.5} {:16.5} {:9.4} {:<20} {}",
            self.iteration,
            self.best,
            self.current,
            self.elapsed.as_secs_f64(),
            self.method,
            self.info.unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logarithmic_numbers() {
        let expected = [1, 2, 5, 10, 20, 50, 100, 200, 500, 1000];
        let got: Vec<usize> = (0..=1000).filter(|&x| is_logarithmic_number(x)).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_not_logarithmic() {
        for x in [0, 3, 4, 11, 25, 150, 250, 1001, 2500] {
            assert!(!is_logarithmic_number(x), "{x} is not logarithmic");
        }
        assert!(is_logarithmic_number(5_000_000));
    }

    #[test]
    fn test_frequency_filter() {
        assert!(should_log(30, 10, false, false, false));
        assert!(!should_log(31, 10, false, false, false));
        assert!(!should_log(30, 0, false, false, false));
        assert!(should_log(50, -1, false, false, false));
        assert!(!should_log(51, -1, false, false, false));
    }

    #[test]
    fn test_new_incumbent_and_forced() {
        assert!(should_log(7, 0, true, true, false));
        assert!(!should_log(7, 0, false, true, false));
        assert!(should_log(7, 0, false, false, true));
    }

    #[test]
    fn test_record_format() {
        let rec = IterationRecord {
            iteration: 12,
            best: 3.0,
            current: 4.5,
            elapsed: Duration::from_millis(250),
            method: "de1+re2",
            info: Some("moved 3"),
        };
        let line = rec.to_string();
        assert!(line.starts_with("        12 "), "{line}");
        assert!(line.contains("3.00000"));
        assert!(line.contains("4.50000"));
        assert!(line.contains("0.2500"));
        assert!(line.contains("de1+re2"));
        assert!(line.ends_with("moved 3"));
    }

    #[test]
    fn test_header_columns() {
        let h = header();
        assert!(h.trim_start().starts_with("iteration"));
        assert!(h.ends_with("info"));
    }
}
