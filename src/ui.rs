// UI layer: the stdout report, a spinner while the generator works, and
// optional interactive editing of the cover fields with `dialoguer`.

use crate::api::CoverResponse;
use crate::config::CoverParams;
use anyhow::Result;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// The parameter set as one JSON line, printed before the request is sent.
pub fn params_line(params: &CoverParams) -> String {
    let params_json = serde_json::to_string(params).unwrap_or_else(|_| format!("{:?}", params));
    format!("params: {}", params_json)
}

/// Diagnostic lines printed after a request: status line,
/// `Content-Disposition` and body length.
pub fn report_lines(response: &CoverResponse) -> Vec<String> {
    let status = match response.status.canonical_reason() {
        Some(reason) => format!("{} {}", response.status.as_u16(), reason),
        None => response.status.as_u16().to_string(),
    };
    vec![
        format!("status: {}", status),
        format!(
            "Content-Disposition: {}",
            response.content_disposition.as_deref().unwrap_or("(none)")
        ),
        format!("body length: {} bytes", response.body.len()),
    ]
}

/// Print the report and the saved-file line to `out`.
pub fn print_report<W: Write>(
    out: &mut W,
    response: &CoverResponse,
    path: &Path,
    written: u64,
) -> std::io::Result<()> {
    for line in report_lines(response) {
        writeln!(out, "{}", line)?;
    }
    writeln!(out, "wrote {} bytes to {}", written, path.display())
}

/// Spinner on stderr while the request is in flight. indicatif hides it
/// when stderr is not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Prompt for each cover field, seeded with the current value. The
/// `model` field is left alone.
pub fn edit_params(params: &mut CoverParams) -> Result<()> {
    params.degree = prompt("Degree", &params.degree)?;
    params.exam = Input::new().with_prompt("Exam").default(params.exam).interact_text()?;
    params.area = prompt("Area", &params.area)?;
    params.year = Input::new().with_prompt("Year").default(params.year).interact_text()?;
    params.school = prompt("School", &params.school)?;
    params.title = prompt("Title", &params.title)?;
    params.secondary_title = prompt("Secondary title", &params.secondary_title)?;
    params.author = prompt("Author", &params.author)?;
    params.trita = prompt("TRITA number", &params.trita)?;
    Ok(())
}

fn prompt(label: &str, current: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(label)
        .default(current.to_string())
        .interact_text()?;
    Ok(value)
}
