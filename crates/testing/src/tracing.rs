// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static INIT: Lazy<()> = Lazy::new(|| {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	// another subscriber may already be installed by the test harness
	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
});

/// Installs a fmt subscriber writing through the test harness. `RUST_LOG`
/// overrides the default `warn` filter. Safe to call from every test.
pub fn init() {
	Lazy::force(&INIT);
}
