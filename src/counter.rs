use std::io;
use std::path::{Path, PathBuf};
use std::fs;

use crate::constants::{BATTERY_DIR, RAPL_ENERGY_PATH};

/// Source of the three hardware counters the watcher polls
///
/// The real implementation reads sysfs files; tests substitute scripted
/// value sequences.
pub trait CounterSource {
	/// Battery remaining charge in micro-amp-hours
	fn read_charge(&mut self) -> io::Result<i64>;

	/// Battery voltage in microvolts
	fn read_voltage(&mut self) -> io::Result<i64>;

	/// RAPL energy counter in micro-joules
	fn read_energy(&mut self) -> io::Result<i64>;
}

/// Reads an integer counter from a sysfs file
///
/// Sysfs counter files hold a single decimal integer followed by a newline.
/// A malformed file is reported as `InvalidData`.
pub fn read_counter(path: &Path) -> io::Result<i64> {
	let content = fs::read_to_string(path)?;
	content
		.trim()
		.parse::<i64>()
		.map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// The real sysfs-backed counters
#[derive(Debug, Clone)]
pub struct SysfsCounters {
	charge_path: PathBuf,
	voltage_path: PathBuf,
	energy_path: PathBuf,
}

impl SysfsCounters {
	pub fn new() -> Self {
		Self {
			charge_path: Path::new(BATTERY_DIR).join("charge_now"),
			voltage_path: Path::new(BATTERY_DIR).join("voltage_now"),
			energy_path: PathBuf::from(RAPL_ENERGY_PATH),
		}
	}
}

impl Default for SysfsCounters {
	fn default() -> Self {
		Self::new()
	}
}

impl CounterSource for SysfsCounters {
	fn read_charge(&mut self) -> io::Result<i64> {
		read_counter(&self.charge_path)
	}

	fn read_voltage(&mut self) -> io::Result<i64> {
		read_counter(&self.voltage_path)
	}

	fn read_energy(&mut self) -> io::Result<i64> {
		read_counter(&self.energy_path)
	}
}
