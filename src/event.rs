/// One detected change of the battery charge counter
///
/// Carries the raw readings at the moment of detection together with the
/// derived power figures, ready for a single report line.
#[derive(Debug, Clone)]
pub struct ChangeEvent {
	/// Sequence number, 1-based
	pub seq: u64,

	/// Elapsed time since the previous change event in milliseconds
	pub interval_ms: f64,

	/// Charge counter value at detection, micro-amp-hours
	pub charge_uah: i64,

	/// Signed charge delta over the interval (current - previous)
	pub delta_uah: i64,

	/// Battery voltage at detection, microvolts
	pub voltage_uv: i64,

	/// RAPL energy counter delta over the interval, micro-joules
	pub energy_delta_uj: i64,

	/// Instantaneous battery power from the charge delta, watts (unsigned)
	pub power_w: f64,

	/// Windowed-average battery power, watts
	pub avg_power_w: f64,

	/// Instantaneous RAPL power, watts
	pub rapl_power_w: f64,

	/// Windowed-average RAPL power, watts
	pub rapl_avg_power_w: f64,

	/// Windowed battery power minus windowed RAPL power, watts
	pub power_delta_w: f64,
}
