//! Progress reporting for batch runs

use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::debug;

/// A sink the workers advance as files complete
///
/// Implementations are shared by every worker of a batch, so they must be
/// safe to call concurrently.
pub trait ProgressIndicator: Send + Sync {
    /// Record `n` more completed files
    fn advance(&self, n: u64);

    /// Stop drawing; called once after the last file
    fn finish(&self);

    /// Whether anything is actually drawn
    fn is_visible(&self) -> bool {
        true
    }
}

/// Terminal progress bar on stderr
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub const TEMPLATE: &'static str =
        "{spinner:.green} Processing images... [{bar:40.green/white}] {pos}/{len} ({per_sec}, {eta})";

    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
        bar.set_style(
            ProgressStyle::default_bar()
                .template(Self::TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        Self { bar }
    }

    /// Wrap an existing bar, e.g. one drawn to a hidden target in tests
    pub fn from_bar(bar: ProgressBar) -> Self {
        Self { bar }
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ProgressIndicator for BarProgress {
    fn advance(&self, n: u64) {
        self.bar.inc(n);
    }

    fn finish(&self) {
        self.bar.finish();
    }
}

/// Stand-in used when no bar should be drawn
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressIndicator for NoProgress {
    fn advance(&self, _n: u64) {}

    fn finish(&self) {}

    fn is_visible(&self) -> bool {
        false
    }
}

/// Pick the indicator for a batch of `total` files
///
/// A bar is only drawn for more than one file, when enabled, and when stderr
/// is an interactive terminal.
pub fn progress_for(total: usize, enabled: bool) -> Box<dyn ProgressIndicator> {
    if !enabled || total <= 1 {
        return Box::new(NoProgress);
    }
    if !Term::stderr().is_term() {
        debug!("stderr is not a terminal, progress bar disabled");
        return Box::new(NoProgress);
    }
    Box::new(BarProgress::new(total as u64))
}
