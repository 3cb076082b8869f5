use std::collections::HashMap;
use std::io::{self, Write};

use chrono::Local;

use crate::constants::{AVG_WINDOW, DELTA_BUCKET_W, HIST_BAR_WIDTH, HIST_BUCKET_MS, POLL_INTERVAL_MS};
use crate::event::ChangeEvent;
use crate::histogram::{Summary, bar, delta_bucket, interval_bucket};

/// Prints the startup banner and the report column header
pub fn print_header(battery_dir: &str, initial_charge: i64) {
	println!("Watching {}/charge_now (polling every {}ms)", battery_dir, POLL_INTERVAL_MS);
	println!("Initial value: {} uAh", initial_charge);
	println!("Waiting for changes... Ctrl-C for histogram\n");

	println!(
		"{:<5}  {:<15}  {:>10}  {:>14}  {:>8}  {:>9}  {:>8}  {:>8}  {:>8}  {:>9}  {:>8}",
		"#",
		"TIME",
		"INTERVAL",
		"CHARGE (uAh)",
		"DELTA",
		"VOLTAGE",
		"POWER",
		format!("AVG{}", AVG_WINDOW),
		"RAPL",
		"RAPL_AVG",
		"DELTA",
	);
}

/// Current local time with millisecond precision
fn timestamp_now() -> String {
	Local::now().format("%H:%M:%S%.3f").to_string()
}

/// Formats one report line for a change event
fn format_report_line(event: &ChangeEvent, timestamp: &str) -> String {
	format!(
		"{:<5}  {:<15}  {:>7.0} ms  {:>14}  {:>+8}  {:>7.3} V  {:>5.2} W  {:>5.2} W  {:>5.2} W  {:>6.2} W  {:>+5.2} W",
		event.seq,
		timestamp,
		event.interval_ms,
		event.charge_uah,
		event.delta_uah,
		event.voltage_uv as f64 / 1e6,
		event.power_w,
		event.avg_power_w,
		event.rapl_power_w,
		event.rapl_avg_power_w,
		event.power_delta_w,
	)
}

/// Prints the report line for one detected change
pub fn print_report_line(event: &ChangeEvent) {
	println!("{}", format_report_line(event, &timestamp_now()));
}

fn format_interval_row(bucket: i64, count: usize, max_count: usize) -> String {
	format!(
		"  {:>5}-{:<5} ms  |{:<width$}  {}",
		bucket,
		bucket + HIST_BUCKET_MS,
		bar(count, max_count, HIST_BAR_WIDTH),
		count,
		width = HIST_BAR_WIDTH,
	)
}

fn format_delta_row(bucket: f64, count: usize, max_count: usize) -> String {
	format!(
		"  {:>+6.1} to {:<+5.1} W  |{:<width$}  {}",
		bucket,
		bucket + DELTA_BUCKET_W,
		bar(count, max_count, HIST_BAR_WIDTH),
		count,
		width = HIST_BAR_WIDTH,
	)
}

/// Prints the end-of-run reports to stdout; runs once after the watch loop stops
pub fn print_summary(intervals: &[f64], power_deltas: &[f64]) -> io::Result<()> {
	write_summary(&mut io::stdout(), intervals, power_deltas)
}

/// Writes the end-of-run reports
///
/// Every bucket between the minimum and maximum is printed, including empty
/// ones, so the histogram shape stays continuous. The power-delta histogram
/// only appears once warmup has produced at least one delta sample.
fn write_summary(out: &mut impl Write, intervals: &[f64], power_deltas: &[f64]) -> io::Result<()> {
	let Some(stats) = Summary::of(intervals) else {
		writeln!(out, "\nNo intervals recorded.")?;
		return Ok(());
	};

	writeln!(out, "\n\n{}", "=".repeat(60))?;
	writeln!(out, "  Update interval histogram ({} samples)", stats.count)?;
	writeln!(
		out,
		"  Min: {:.0} ms  Median: {:.0} ms  Max: {:.0} ms  Mean: {:.0} ms",
		stats.min, stats.median, stats.max, stats.mean
	)?;
	writeln!(out)?;

	let mut buckets: HashMap<i64, usize> = HashMap::new();
	for &interval in intervals {
		*buckets.entry(interval_bucket(interval, HIST_BUCKET_MS)).or_insert(0) += 1;
	}
	let max_count = buckets.values().copied().max().unwrap_or(1);

	let lo = interval_bucket(stats.min, HIST_BUCKET_MS);
	let hi = interval_bucket(stats.max, HIST_BUCKET_MS);
	let mut bucket = lo;
	while bucket <= hi {
		let count = buckets.get(&bucket).copied().unwrap_or(0);
		writeln!(out, "{}", format_interval_row(bucket, count, max_count))?;
		bucket += HIST_BUCKET_MS;
	}
	writeln!(out)?;

	let Some(delta_stats) = Summary::of(power_deltas) else {
		return Ok(());
	};

	writeln!(out, "{}", "=".repeat(60))?;
	writeln!(
		out,
		"  Battery - RAPL power delta histogram ({} samples, after {} warmup)",
		delta_stats.count, AVG_WINDOW
	)?;
	writeln!(
		out,
		"  Min: {:+.2} W  Median: {:+.2} W  Max: {:+.2} W  Mean: {:+.2} W",
		delta_stats.min, delta_stats.median, delta_stats.max, delta_stats.mean
	)?;
	writeln!(out)?;

	// Key delta buckets by multiples of the bucket width so negative bucket
	// starts stay exact while stepping the printed range
	let bucket_index = |value: f64| (delta_bucket(value, DELTA_BUCKET_W) / DELTA_BUCKET_W).round() as i64;

	let mut delta_buckets: HashMap<i64, usize> = HashMap::new();
	for &delta in power_deltas {
		*delta_buckets.entry(bucket_index(delta)).or_insert(0) += 1;
	}
	let delta_max_count = delta_buckets.values().copied().max().unwrap_or(1);

	for index in bucket_index(delta_stats.min)..=bucket_index(delta_stats.max) {
		let bucket = index as f64 * DELTA_BUCKET_W;
		let count = delta_buckets.get(&index).copied().unwrap_or(0);
		writeln!(out, "{}", format_delta_row(bucket, count, delta_max_count))?;
	}
	writeln!(out)?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_event() -> ChangeEvent {
		ChangeEvent {
			seq: 1,
			interval_ms: 1000.0,
			charge_uah: 1_234_567,
			delta_uah: -5,
			voltage_uv: 12_000_000,
			power_w: 0.216,
			avg_power_w: 0.216,
			rapl_power_w: 0.05,
			rapl_avg_power_w: 0.05,
			power_delta_w: 0.166,
			energy_delta_uj: 50_000,
		}
	}

	#[test]
	fn report_line_fields_are_formatted() {
		let line = format_report_line(&sample_event(), "12:00:00.000");
		assert!(line.starts_with("1    "));
		assert!(line.contains("12:00:00.000"));
		assert!(line.contains("   1000 ms"));
		assert!(line.contains("       1234567"));
		assert!(line.contains("      -5"));
		assert!(line.contains(" 12.000 V"));
		assert!(line.contains(" 0.22 W"));
		assert!(line.contains(" 0.05 W"));
		assert!(line.contains("+0.17 W"));
	}

	#[test]
	fn interval_row_spans_one_bucket_width() {
		let row = format_interval_row(100, 3, 3);
		assert!(row.contains("100-200"));
		assert!(row.contains(&"#".repeat(40)));
		assert!(row.trim_end().ends_with('3'));
	}

	#[test]
	fn empty_interval_row_has_no_bar() {
		let row = format_interval_row(200, 0, 7);
		assert!(row.contains("200-300"));
		assert!(!row.contains('#'));
		assert!(row.trim_end().ends_with('0'));
	}

	fn summary_string(intervals: &[f64], power_deltas: &[f64]) -> String {
		let mut out = Vec::new();
		write_summary(&mut out, intervals, power_deltas).unwrap();
		String::from_utf8(out).unwrap()
	}

	#[test]
	fn summary_with_no_events_prints_only_the_message() {
		assert_eq!(summary_string(&[], &[]), "\nNo intervals recorded.\n");
	}

	#[test]
	fn summary_before_warmup_omits_power_delta_histogram() {
		let text = summary_string(&[150.0, 250.0], &[]);
		assert!(text.contains("Update interval histogram (2 samples)"));
		assert!(text.contains("Min: 150 ms  Median: 250 ms  Max: 250 ms  Mean: 200 ms"));
		assert!(text.contains("100-200"));
		assert!(text.contains("200-300"));
		assert!(!text.contains("power delta histogram"));
	}

	#[test]
	fn summary_after_warmup_includes_power_delta_histogram() {
		let text = summary_string(&[150.0], &[-0.1, 0.3]);
		assert!(text.contains("Battery - RAPL power delta histogram (2 samples, after 30 warmup)"));
		assert!(text.contains("Min: -0.10 W  Median: +0.30 W  Max: +0.30 W  Mean: +0.10 W"));
		assert!(text.contains("-0.5 to +0.0"));
		assert!(text.contains("+0.0 to +0.5"));
	}

	#[test]
	fn delta_row_labels_are_signed() {
		let row = format_delta_row(-0.5, 2, 4);
		assert!(row.contains("-0.5 to +0.0"));

		let row = format_delta_row(0.0, 1, 4);
		assert!(row.contains("+0.0 to +0.5"));
	}
}
