//! Progress bars for running worlds.

use indicatif::{ProgressBar, ProgressStyle};

/// A bar counting the generations of one world.
pub fn world_bar(world: usize, generations: usize) -> ProgressBar {
    let style = ProgressStyle::with_template("world {prefix:>3} [{bar:60}] {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#.");
    let bar = ProgressBar::new(generations as u64).with_style(style);
    bar.set_prefix(world.to_string());
    bar
}
