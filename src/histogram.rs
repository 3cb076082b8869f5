/// Summary statistics over a sequence of samples
///
/// Median is the lower median: element `n / 2` of the sorted sequence, so an
/// even-length sequence reports the lower element of the upper half.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
	pub count: usize,
	pub min: f64,
	pub median: f64,
	pub max: f64,
	pub mean: f64,
}

impl Summary {
	pub fn of(values: &[f64]) -> Option<Self> {
		if values.is_empty() {
			return None;
		}
		let mut sorted = values.to_vec();
		sorted.sort_by(f64::total_cmp);
		let n = sorted.len();
		Some(Self {
			count: n,
			min: sorted[0],
			median: sorted[n / 2],
			max: sorted[n - 1],
			mean: sorted.iter().sum::<f64>() / n as f64,
		})
	}
}

/// Bucket start for a non-negative interval value
pub fn interval_bucket(value_ms: f64, width_ms: i64) -> i64 {
	(value_ms / width_ms as f64).floor() as i64 * width_ms
}

/// Bucket start for a possibly-negative power delta
///
/// Negative values floor toward negative infinity, so -0.1 W with 0.5 W
/// buckets lands in the -0.5 bucket rather than 0.
pub fn delta_bucket(value_w: f64, width_w: f64) -> f64 {
	if value_w < 0.0 {
		-((-value_w / width_w).floor() + 1.0) * width_w
	} else {
		(value_w / width_w).floor() * width_w
	}
}

/// Proportional histogram bar of '#' characters
///
/// Lengths landing exactly on .5 round to even.
pub fn bar(count: usize, max_count: usize, width: usize) -> String {
	if count == 0 {
		return String::new();
	}
	let len = (count as f64 / max_count as f64 * width as f64).round_ties_even() as usize;
	"#".repeat(len)
}
