//! Progress display while reading input files
//!
//! This implementation relies heavily on the `indicatif` crate, see <https://docs.rs/indicatif>

use std::io::Read;

use indicatif::{HumanBytes, HumanDuration, ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::info;

/// Inputs smaller than this are read without drawing a bar
const MIN_SIZE_FOR_BAR: usize = 8 * 1024 * 1024;

/// A wrapper around a reader that keeps track of how many bytes have been read
/// from the total.
pub struct ProgressMonitor<R: Read> {
    /// The total amount that the reader will read
    pub total: usize,
    /// Amount read so far
    pub read: usize,
    /// The internal reader
    reader: R,
    progress_bar: ProgressBar,
}

impl<R: Read> ProgressMonitor<R> {
    /// Create a new progress monitor, initialized with zero bytes read
    pub fn new(reader: R, size: usize) -> Self {
        let progress_bar = if size < MIN_SIZE_FOR_BAR {
            ProgressBar::hidden()
        } else {
            // https://docs.rs/indicatif/latest/indicatif/index.html#templates
            let bar = ProgressBar::new(size as u64);
            if let Ok(style) = ProgressStyle::with_template(
                "reading {wide_bar} {binary_bytes}/{binary_total_bytes} [est. {eta} remaining]",
            ) {
                bar.set_style(style);
            }
            // The default is 20hz, this reduces rendering overhead
            bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(8));
            bar
        };
        Self {
            reader,
            total: size,
            read: 0,
            progress_bar,
        }
    }

    /// Called whenever a new read is made, responsible for updating the UI
    fn update(&mut self, delta: u64) {
        self.progress_bar.inc(delta);
        if self.read >= self.total && !self.progress_bar.is_finished() {
            self.progress_bar.finish_and_clear();
            let elapsed = self.progress_bar.elapsed();
            let per_sec = self.total as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
            info!(
                "read {} in {} ({}/s avg)",
                HumanBytes(self.total as u64),
                HumanDuration(elapsed),
                HumanBytes(per_sec as u64)
            );
        }
    }
}

impl<R: Read> Read for ProgressMonitor<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        // Fall back on the internally stored reader, but filch the number of bytes read
        // along the way
        let out = self.reader.read(buf)?;
        self.read += out;
        self.update(out as u64);
        Ok(out)
    }
}
