/*!
 * Terminal styling and cosmetic screens.
 *
 * ANSI escape constants used by the renderers, the startup banner, and the
 * opening/closing progress bars drawn with indicatif.
 */

use std::time::Duration;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

pub const YELLOW: &str = "\x1b[93m";
pub const RED: &str = "\x1b[91m";
pub const GREEN: &str = "\x1b[92m";
pub const GRAY: &str = "\x1b[90m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RESET: &str = "\x1b[0m";

/// Cells in the loading and completion bars
const BAR_WIDTH: u64 = 20;

/// Redraw interval of the loading and completion bars
const BAR_TICK: Duration = Duration::from_millis(50);

const BANNER: &str = r"
╔═══════════════════════════════════════╗
║      L Y R I C S   P L A Y E R        ║
╚═══════════════════════════════════════╝
";

/// De-emphasized variant of a genre color
pub fn dimmed(color: &str) -> String {
    format!("{}{}", DIM, color)
}

/// Print the startup banner
pub fn print_banner() {
    println!("{}{}{}", GRAY, BANNER, RESET);
}

/// Fill a progress bar over `duration_ms`, then leave it at 100%.
///
/// A zero duration draws the full bar immediately.
pub async fn animate_bar(message: &str, duration_ms: u64) -> Result<()> {
    let bar = ProgressBar::with_draw_target(Some(BAR_WIDTH), ProgressDrawTarget::stdout());
    let template = format!("{}{{msg}}[{{bar:{}}}] {{percent:>3}}%{}", GRAY, BAR_WIDTH, RESET);
    bar.set_style(
        ProgressStyle::with_template(&template)
            .context("Invalid progress bar template")?
            .progress_chars("#-"),
    );
    if !message.is_empty() {
        bar.set_message(format!("{} ", message));
    }

    let duration = Duration::from_millis(duration_ms);
    let total_steps = (duration.as_millis() / BAR_TICK.as_millis()).max(1) as u64;
    if duration_ms > 0 {
        for step in 0..=total_steps {
            bar.set_position(step * BAR_WIDTH / total_steps);
            tokio::time::sleep(BAR_TICK).await;
        }
    }

    bar.set_position(BAR_WIDTH);
    bar.finish();
    Ok(())
}

/// Opening loading bar
pub async fn animate_loading(message: &str, duration_ms: u64) -> Result<()> {
    animate_bar(message, duration_ms).await?;
    println!();
    Ok(())
}

/// Closing completion bar
pub async fn animate_completion(duration_ms: u64) -> Result<()> {
    print!("\n\n");
    animate_bar("", duration_ms).await?;
    println!();
    Ok(())
}
