//! Per-method performance statistics.

use std::fmt::Write;
use std::time::Duration;

/// Counters collected over all applications of one method.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodStatistics {
    /// Number of applications.
    pub applications: usize,
    /// Time spent inside the method itself.
    pub netto_time: Duration,
    /// Number of applications that improved the objective.
    pub successes: usize,
    /// Sum of objective changes over all successful applications.
    ///
    /// Negative for minimization, positive for maximization.
    pub obj_gain: f64,
    /// Netto time plus follow-up costs attributed to the method
    /// (e.g. a local search run after a shaking move).
    pub brutto_time: Duration,
}

impl MethodStatistics {
    /// Fraction of applications that were successful, `NaN` if never applied.
    pub fn success_rate(&self) -> f64 {
        sdiv(self.successes as f64, self.applications as f64)
    }

    /// Average objective gain per application, `NaN` if never applied.
    pub fn average_gain(&self) -> f64 {
        sdiv(self.obj_gain, self.applications as f64)
    }

    pub(crate) fn record_success(&mut self, obj_old: f64, obj_new: f64) {
        self.successes += 1;
        self.obj_gain += obj_new - obj_old;
    }
}

/// Safe division: `x / y`, or `NaN` when `y` is zero.
///
/// ```
/// use u_scheduler::scheduler::sdiv;
///
/// assert_eq!(sdiv(6.0, -2.0), -3.0);
/// assert!(sdiv(1.0, 0.0).is_nan());
/// ```
pub fn sdiv(x: f64, y: f64) -> f64 {
    if y == 0.0 {
        f64::NAN
    } else {
        x / y
    }
}

/// Renders the method statistics table.
///
/// Shares of run time are relative to `run_time`; the last line sums (or
/// averages, for the ratios) over all methods.
pub(crate) fn render_report<'a, I>(entries: I, run_time: Duration) -> String
where
    I: IntoIterator<Item = (&'a str, &'a MethodStatistics)>,
    I::IntoIter: Clone,
{
    let entries = entries.into_iter();
    let run_time = run_time.as_secs_f64();

    let mut total = MethodStatistics::default();
    let mut count = 0usize;
    for (_, ms) in entries.clone() {
        total.applications += ms.applications;
        total.netto_time += ms.netto_time;
        total.successes += ms.successes;
        total.brutto_time += ms.brutto_time;
        total.obj_gain += ms.obj_gain;
        count += 1;
    }
    let total_successes = total.successes as f64;

    let mut s = String::from("Method statistics:\n");
    s.push_str(
        " method    iter   succ succ-rate%  tot-obj-gain  avg-obj-gain rel-succ%  \
         net-time  net-time%  brut-time  brut-time%\n",
    );
    for (name, ms) in entries {
        write_row(
            &mut s,
            name,
            ms,
            sdiv(ms.successes as f64, total_successes),
            run_time,
        );
    }
    let relative = sdiv(sdiv(total_successes, count as f64), total_successes);
    write_row(&mut s, "SUM/AVG", &total, relative, run_time);
    s
}

fn write_row(s: &mut String, name: &str, ms: &MethodStatistics, relative: f64, run_time: f64) {
    let netto = ms.netto_time.as_secs_f64();
    let brutto = ms.brutto_time.as_secs_f64();
    // Writing into a String cannot fail.
    let _ = writeln!(
        s,
        "{:>7} {:7} {:6} {:10.4} {:13.5} {:13.5} {:9.4} {:9.4} {:10.4} {:10.4} {:11.4}",
        name,
        ms.applications,
        ms.successes,
        ms.success_rate() * 100.0,
        ms.obj_gain,
        ms.average_gain(),
        relative * 100.0,
        netto,
        sdiv(netto, run_time) * 100.0,
        brutto,
        sdiv(brutto, run_time) * 100.0,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdiv() {
        assert_eq!(sdiv(1.0, 4.0), 0.25);
        assert_eq!(sdiv(-3.0, -1.5), 2.0);
        assert_eq!(sdiv(0.0, 5.0), 0.0);
        assert!(sdiv(3.0, 0.0).is_nan());
        assert!(sdiv(0.0, 0.0).is_nan());
        assert!(sdiv(1.0, -0.0).is_nan());
    }

    #[test]
    fn test_unused_method_ratios_are_nan() {
        let ms = MethodStatistics::default();
        assert!(ms.success_rate().is_nan());
        assert!(ms.average_gain().is_nan());
    }

    #[test]
    fn test_ratios() {
        let mut ms = MethodStatistics {
            applications: 4,
            ..Default::default()
        };
        ms.record_success(100.0, 90.0);
        ms.record_success(90.0, 85.0);
        assert_eq!(ms.successes, 2);
        assert!((ms.obj_gain - (-15.0)).abs() < 1e-12);
        assert!((ms.success_rate() - 0.5).abs() < 1e-12);
        assert!((ms.average_gain() - (-3.75)).abs() < 1e-12);
    }

    #[test]
    fn test_report_lists_methods_in_order() {
        let a = MethodStatistics {
            applications: 10,
            successes: 2,
            obj_gain: -4.0,
            netto_time: Duration::from_millis(500),
            brutto_time: Duration::from_millis(700),
        };
        let b = MethodStatistics::default();
        let report = render_report(
            [("ch0", &a), ("li1", &b)],
            Duration::from_secs(1),
        );
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 5, "title, header, two methods, sum line");
        assert!(lines[2].trim_start().starts_with("ch0"));
        assert!(lines[3].trim_start().starts_with("li1"));
        assert!(lines[4].trim_start().starts_with("SUM/AVG"));
        assert!(lines[2].contains("20.0000"), "success rate: {}", lines[2]);
        assert!(lines[3].contains("NaN"), "unused method: {}", lines[3]);
    }

    #[test]
    fn test_report_without_run_time_does_not_panic() {
        let a = MethodStatistics::default();
        let report = render_report([("m", &a)], Duration::ZERO);
        assert!(report.contains("NaN"));
    }
}
