// Watched sysfs counters
pub const BATTERY_DIR: &str = "/sys/class/power_supply/BAT1";
pub const RAPL_ENERGY_PATH: &str = "/sys/class/powercap/intel-rapl:1/energy_uj"; // psys (whole system)

// Polling and averaging settings
pub const POLL_INTERVAL_MS: u64 = 1;
pub const AVG_WINDOW: usize = 30;

// Histogram settings
pub const HIST_BUCKET_MS: i64 = 100;
pub const DELTA_BUCKET_W: f64 = 0.5;
pub const HIST_BAR_WIDTH: usize = 40;

// uAh * uV -> watt-milliseconds
pub const CHARGE_TO_WMS: f64 = 3.6e-6;
