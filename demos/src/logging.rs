// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot logger setup for the command-line driver.

use std::sync::Once;

/// Logger configuration.
///
/// `filter` uses `env_logger` filter syntax, e.g. `info` or
/// `kaleido_tiling=debug`. When unset, `RUST_LOG` is consulted, then `warn`.
#[derive(Debug, Clone, Default)]
pub(crate) struct LoggingConfig {
    pub(crate) filter: Option<String>,
}

static INIT: Once = Once::new();

/// Install the global logger. Later calls are ignored.
pub(crate) fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        match config.filter.or_else(|| std::env::var("RUST_LOG").ok()) {
            Some(filter) => {
                builder.parse_filters(&filter);
            }
            None => {
                builder.filter_level(log::LevelFilter::Warn);
            }
        }
        builder.format_timestamp(None);
        builder.init();
        log::debug!("logging initialized");
    });
}
