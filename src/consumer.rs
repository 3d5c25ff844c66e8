//! Draining and rendering of iteration results.

use crate::channel::ResultChannel;
use crate::error::Result;
use crate::types::{IterationResult, RegressionResult};
use std::io::Write;

/// Line written once the channel has been drained.
pub const COMPLETION_MARKER: &str = "Finished all iterations";

/// Drains a sealed [`ResultChannel`], optionally rendering every result.
pub struct ResultConsumer<W: Write> {
    writer: W,
    verbose: bool,
    response_name: String,
}

impl<W: Write> ResultConsumer<W> {
    pub fn new(writer: W, verbose: bool, response_name: impl Into<String>) -> Self {
        Self {
            writer,
            verbose,
            response_name: response_name.into(),
        }
    }

    /// Receive until the channel is sealed and empty, then write the
    /// completion marker. Returns the number of results received.
    pub fn consume(&mut self, channel: &ResultChannel<IterationResult>) -> Result<usize> {
        let mut received = 0;
        for result in channel.iter() {
            received += 1;
            if self.verbose {
                self.render(&result)?;
            }
        }
        writeln!(self.writer, "{}", COMPLETION_MARKER)?;
        self.writer.flush()?;
        log::debug!("Consumed {} results", received);
        Ok(received)
    }

    fn render(&mut self, result: &IterationResult) -> Result<()> {
        writeln!(self.writer, "Iteration {}:", result.iteration)?;
        self.render_line(&result.predictor_a)?;
        self.render_line(&result.predictor_b)?;
        Ok(())
    }

    fn render_line(&mut self, fit: &RegressionResult) -> Result<()> {
        writeln!(
            self.writer,
            "{} vs {}: {} , R-squared: {}",
            fit.x_name,
            self.response_name,
            fit.equation(),
            fit.r_squared
        )?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
