use std::io;
use std::time::Instant;

use crate::constants::{AVG_WINDOW, CHARGE_TO_WMS};
use crate::counter::CounterSource;
use crate::event::ChangeEvent;
use crate::window::{SlidingWindow, WindowEntry};

/// Tracks the charge counter between polls and accumulates the run's histories
///
/// One watcher exists per run. `poll` performs a single sample; the interval
/// and power-delta histories only grow until the process exits.
pub struct ChargeWatcher {
	source: Box<dyn CounterSource>,
	prev_charge: i64,
	prev_energy: i64,
	prev_time: Instant,
	seq: u64,
	window: SlidingWindow,
	intervals: Vec<f64>,
	power_deltas: Vec<f64>,
}

impl ChargeWatcher {
	/// Reads baseline counter values and starts the interval clock
	pub fn new(mut source: Box<dyn CounterSource>) -> io::Result<Self> {
		let prev_charge = source.read_charge()?;
		let prev_energy = source.read_energy()?;

		Ok(Self {
			source,
			prev_charge,
			prev_energy,
			prev_time: Instant::now(),
			seq: 0,
			window: SlidingWindow::new(AVG_WINDOW),
			intervals: Vec::new(),
			power_deltas: Vec::new(),
		})
	}

	/// Charge counter value captured at startup, micro-amp-hours
	pub fn initial_charge(&self) -> i64 {
		self.prev_charge
	}

	/// Reads the charge counter once; returns a change event if it moved
	pub fn poll(&mut self) -> io::Result<Option<ChangeEvent>> {
		let charge = self.source.read_charge()?;
		if charge == self.prev_charge {
			return Ok(None);
		}

		let now = Instant::now();
		let interval_ms = now.duration_since(self.prev_time).as_secs_f64() * 1000.0;
		let voltage = self.source.read_voltage()?;
		let energy = self.source.read_energy()?;

		let event = self.record(charge, voltage, energy, interval_ms);
		self.prev_time = now;
		Ok(Some(event))
	}

	/// Folds one detected change into the running state
	fn record(&mut self, charge: i64, voltage: i64, energy: i64, interval_ms: f64) -> ChangeEvent {
		let delta = charge - self.prev_charge;
		let energy_delta = energy - self.prev_energy;

		let power_w = if interval_ms > 0.0 {
			(delta as f64 * voltage as f64 * CHARGE_TO_WMS / interval_ms).abs()
		} else {
			0.0
		};
		// uJ / ms = mW, / 1000 = W
		let rapl_power_w = if interval_ms > 0.0 {
			energy_delta as f64 / (interval_ms * 1000.0)
		} else {
			0.0
		};

		self.seq += 1;
		self.intervals.push(interval_ms);
		self.window.push(WindowEntry {
			delta_uah: delta,
			interval_ms,
			voltage_uv: voltage,
			energy_delta_uj: energy_delta,
		});

		let avg_power_w = self.window.avg_battery_power_w();
		let rapl_avg_power_w = self.window.avg_rapl_power_w();
		let power_delta_w = avg_power_w - rapl_avg_power_w;

		// The power-delta history only starts once the window has filled
		if self.window.len() >= AVG_WINDOW {
			self.power_deltas.push(power_delta_w);
		}

		self.prev_charge = charge;
		self.prev_energy = energy;

		ChangeEvent {
			seq: self.seq,
			interval_ms,
			charge_uah: charge,
			delta_uah: delta,
			voltage_uv: voltage,
			energy_delta_uj: energy_delta,
			power_w,
			avg_power_w,
			rapl_power_w,
			rapl_avg_power_w,
			power_delta_w,
		}
	}

	/// Elapsed time of every change event so far, milliseconds
	pub fn intervals(&self) -> &[f64] {
		&self.intervals
	}

	/// Windowed battery-minus-RAPL power deltas recorded after warmup
	pub fn power_deltas(&self) -> &[f64] {
		&self.power_deltas
	}
}
