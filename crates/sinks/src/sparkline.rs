use feed_core::{UpdateSink, WindowUpdate};
use std::io::Write;
use tracing::warn;

const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Render the last `width` values as a sparkline with a latest/min/max legend.
///
/// Returns `None` for fewer than two values; a single point is not a line.
pub fn render(values: &[f64], width: usize) -> Option<String> {
    let tail = &values[values.len().saturating_sub(width)..];
    if tail.len() < 2 {
        return None;
    }

    let min = tail.iter().copied().fold(f64::INFINITY, f64::min);
    let max = tail.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    let line: String = tail
        .iter()
        .map(|v| {
            if span <= f64::EPSILON {
                return BARS[BARS.len() / 2];
            }
            let level = ((v - min) / span * (BARS.len() - 1) as f64).round() as usize;
            BARS[level.min(BARS.len() - 1)]
        })
        .collect();

    let latest = tail[tail.len() - 1];
    Some(format!("{line} {latest:.2} (min {min:.2}, max {max:.2})"))
}

/// Redraws a single terminal line with the current window on every update.
pub struct SparklineSink<W> {
    out:    W,
    width:  usize,
    failed: bool,
}

impl<W: Write + Send> SparklineSink<W> {
    pub fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width: width.max(2),
            failed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl SparklineSink<std::io::Stdout> {
    pub fn stdout(width: usize) -> Self {
        Self::new(std::io::stdout(), width)
    }
}

impl<W: Write + Send> UpdateSink for SparklineSink<W> {
    fn on_update(&mut self, update: &WindowUpdate) {
        let values: Vec<f64> = update.snapshot.values().collect();
        let Some(line) = render(&values, self.width) else {
            return;
        };

        // \r + erase-line keeps redrawing the same row.
        let result = write!(self.out, "\r\x1b[2K{line}").and_then(|()| self.out.flush());
        if let Err(e) = result {
            if !self.failed {
                warn!("Sparkline output failed: {e}");
                self.failed = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_core::{Sample, Snapshot};

    fn update(values: &[f64]) -> WindowUpdate {
        let snapshot: Snapshot = values.iter().map(|v| Sample::now(*v)).collect();
        WindowUpdate {
            sample: *snapshot.latest().unwrap(),
            snapshot,
            capacity: 100,
        }
    }

    #[test]
    fn nothing_below_two_points() {
        assert_eq!(render(&[], 10), None);
        assert_eq!(render(&[1.0], 10), None);
    }

    #[test]
    fn scales_between_min_and_max() {
        let line = render(&[0.0, 50.0, 100.0], 10).unwrap();
        assert!(line.starts_with("▁▅█"), "{line}");
        assert!(line.ends_with("100.00 (min 0.00, max 100.00)"), "{line}");
    }

    #[test]
    fn flat_series_uses_middle_bar() {
        let line = render(&[3.0, 3.0, 3.0], 10).unwrap();
        assert!(line.starts_with("▅▅▅"), "{line}");
    }

    #[test]
    fn only_last_width_values_are_drawn() {
        let line = render(&[100.0, 1.0, 2.0], 2).unwrap();
        assert!(line.starts_with("▁█ "), "{line}");
        assert!(line.contains("min 1.00"), "{line}");
    }

    #[test]
    fn sink_skips_single_sample_then_draws() {
        let mut sink = SparklineSink::new(Vec::new(), 20);
        sink.on_update(&update(&[1.0]));
        assert!(sink.out.is_empty());

        sink.on_update(&update(&[1.0, 2.0]));
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.starts_with("\r\x1b[2K▁█ 2.00"), "{out:?}");
    }
}
