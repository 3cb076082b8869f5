pub mod constants;
pub mod counter;
pub mod event;
pub mod histogram;
pub mod report;
pub mod watcher;
pub mod window;

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::watcher::ChargeWatcher;

/// Polls the charge counter until `running` is cleared
///
/// This is the main entry point for the watch loop. Prints the header, then
/// one report line per detected counter change. The caller owns the
/// cancellation flag, typically cleared from a SIGINT handler; the end-of-run
/// report is the caller's responsibility once this returns.
pub fn watch_charge_counter(watcher: &mut ChargeWatcher, running: &AtomicBool) -> io::Result<()> {
	report::print_header(constants::BATTERY_DIR, watcher.initial_charge());

	while running.load(Ordering::SeqCst) {
		thread::sleep(Duration::from_millis(constants::POLL_INTERVAL_MS));
		if let Some(event) = watcher.poll()? {
			report::print_report_line(&event);
		}
	}

	Ok(())
}
