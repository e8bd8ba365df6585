// Copyright 2025 the Kaleido Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Completion notifications for hosts.

/// Receives a label each time a pattern finishes a redraw, trim, or rotation.
///
/// Notifications are fire-and-forget. Initial draws are not reported.
pub trait RedrawListener {
    /// Called once per completed operation with the pattern's label, such as
    /// `frieze:p2mm`, `pmg`, or `radial`.
    fn notify_redraw(&self, label: &str);
}

/// Listener that reports through the [`log`] facade at `info` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogListener;

impl RedrawListener for LogListener {
    fn notify_redraw(&self, label: &str) {
        log::info!(target: "kaleido::telemetry", "redraw {label}");
    }
}

impl<F: Fn(&str)> RedrawListener for F {
    fn notify_redraw(&self, label: &str) {
        self(label);
    }
}
