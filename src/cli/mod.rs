pub mod doctor;
pub mod embed;
pub mod mine;
pub mod stats;
pub mod validate;

use indicatif::{ProgressBar, ProgressStyle};

/// Standard progress bar for long sequential loops.
pub(crate) fn progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  {msg:20} {bar:40.cyan/blue} {pos}/{len} ({eta})")
            .expect("valid template")
            .progress_chars("##-"),
    );
    pb.set_message(label.to_string());
    pb
}
