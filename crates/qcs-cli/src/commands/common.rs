//! Helpers shared by commands.

use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

/// A steadily ticking spinner showing `message`.
pub fn spinner(message: impl Into<String>) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

/// A bar of `fraction * width` blocks.
pub fn bar(fraction: f64, width: usize) -> String {
    let len = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    "█".repeat(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_scales_and_clamps() {
        assert_eq!(bar(0.0, 10), "");
        assert_eq!(bar(0.5, 10).chars().count(), 5);
        assert_eq!(bar(2.0, 10).chars().count(), 10);
    }
}
