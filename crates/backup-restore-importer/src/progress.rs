use indicatif::{ProgressBar, ProgressStyle, style::TemplateError};

/// Byte progress for a download; falls back to a spinner when the server
/// does not announce a content length.
pub fn get_progress_bar(len: Option<u64>) -> Result<ProgressBar, TemplateError> {
    let pb = match len {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta}) - {msg}")?
                    .progress_chars("#>-"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::default_spinner().template("{spinner} {bytes} - {msg}")?);
            pb
        }
    };
    Ok(pb)
}
