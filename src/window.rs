use std::collections::VecDeque;

use crate::constants::CHARGE_TO_WMS;

/// Raw fields of one change event retained for trailing averages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowEntry {
	pub delta_uah: i64,
	pub interval_ms: f64,
	pub voltage_uv: i64,
	pub energy_delta_uj: i64,
}

/// Bounded FIFO of the most recent change events
///
/// Oldest entries are evicted as new ones arrive once the capacity is
/// reached; the window is only ever consulted for trailing averages.
#[derive(Debug)]
pub struct SlidingWindow {
	entries: VecDeque<WindowEntry>,
	capacity: usize,
}

impl SlidingWindow {
	pub fn new(capacity: usize) -> Self {
		Self {
			entries: VecDeque::with_capacity(capacity),
			capacity,
		}
	}

	pub fn push(&mut self, entry: WindowEntry) {
		self.entries.push_back(entry);
		if self.entries.len() > self.capacity {
			self.entries.pop_front();
		}
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	fn total_interval_ms(&self) -> f64 {
		self.entries.iter().map(|e| e.interval_ms).sum()
	}

	/// Trailing-average battery power in watts
	///
	/// Total charge-derived energy over the window divided by total elapsed
	/// time, absolute value. Zero when no time has accumulated.
	pub fn avg_battery_power_w(&self) -> f64 {
		let sum_dt = self.total_interval_ms();
		if sum_dt <= 0.0 {
			return 0.0;
		}
		let energy_wms: f64 = self
			.entries
			.iter()
			.map(|e| e.delta_uah as f64 * e.voltage_uv as f64 * CHARGE_TO_WMS)
			.sum();
		(energy_wms / sum_dt).abs()
	}

	/// Trailing-average RAPL power in watts, zero when no time has accumulated
	pub fn avg_rapl_power_w(&self) -> f64 {
		let sum_dt = self.total_interval_ms();
		if sum_dt <= 0.0 {
			return 0.0;
		}
		let sum_uj: f64 = self.entries.iter().map(|e| e.energy_delta_uj as f64).sum();
		sum_uj / (sum_dt * 1000.0)
	}
}
