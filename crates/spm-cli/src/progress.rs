//! Spinner shown on stderr while a request is in flight.

use std::future::Future;
use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Awaits `future` behind a spinner labelled `message`.
///
/// The spinner is hidden when stderr is not a terminal or logs go there in
/// a machine-readable format.
pub async fn with_spinner<F: Future>(message: &str, visible: bool, future: F) -> F::Output {
    let spinner = if visible && io::stderr().is_terminal() {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    } else {
        ProgressBar::hidden()
    };
    spinner.set_message(message.to_string());
    let output = future.await;
    spinner.finish_and_clear();
    output
}
