use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use battery_watch::counter::SysfsCounters;
use battery_watch::watcher::ChargeWatcher;
use battery_watch::{report, watch_charge_counter};

static RUNNING: AtomicBool = AtomicBool::new(true);

extern "C" fn handle_sigint(_signum: libc::c_int) {
	RUNNING.store(false, Ordering::SeqCst);
}

fn install_sigint_handler() {
	let handler = handle_sigint as extern "C" fn(libc::c_int);
	unsafe {
		libc::signal(libc::SIGINT, handler as libc::sighandler_t);
	}
}

fn main() -> io::Result<()> {
	install_sigint_handler();

	let mut watcher = ChargeWatcher::new(Box::new(SysfsCounters::new()))?;

	watch_charge_counter(&mut watcher, &RUNNING)?;

	report::print_summary(watcher.intervals(), watcher.power_deltas())
}
