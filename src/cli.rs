// Command-line surface. With no flags a run posts the stock Swedish test
// cover and saves it as `test1.pdf` in the current directory.

use crate::api::CoverClient;
use crate::config::{CoverParams, Language, RequestConfig};
use crate::{output, ui};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Request a thesis cover from the KTH cover generator",
    long_about = None
)]
pub struct Cli {
    /// File the response body is written to
    #[arg(short, long, default_value = output::DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// JSON file with cover fields (degree, title, secondaryTitle, ...)
    #[arg(short, long)]
    pub params: Option<PathBuf>,

    /// Cover generator endpoint [env: KTH_COVER_URL]
    #[arg(short, long)]
    pub url: Option<String>,

    /// Year printed on the cover
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Request the English cover instead of the Swedish one
    #[arg(short, long, default_value_t = false)]
    pub english: bool,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Prompt for each cover field before sending
    #[arg(short, long, default_value_t = false)]
    pub interactive: bool,

    /// Debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// Parameter set: defaults, then parameter file, then flags.
    pub fn cover_params(&self) -> Result<CoverParams> {
        let file = match &self.params {
            Some(path) => Some(path.clone()),
            None => CoverParams::default_file().filter(|p| p.is_file()),
        };
        let mut params = match file {
            Some(path) => {
                debug!(path = %path.display(), "loading cover parameters");
                CoverParams::from_file(&path)?
            }
            None => CoverParams::default(),
        };
        if let Some(year) = self.year {
            params.year = year;
        }
        Ok(params)
    }

    /// Request settings: defaults, then `KTH_COVER_URL`, then flags.
    pub fn request_config(&self) -> RequestConfig {
        let mut config = RequestConfig::from_env();
        if let Some(url) = &self.url {
            config.endpoint = url.clone();
        }
        if self.english {
            config.language = Language::English;
        }
        config.timeout = self.timeout.map(Duration::from_secs);
        config
    }

    /// Run one request and save the body.
    pub fn run(&self) -> Result<()> {
        let mut params = self.cover_params()?;
        if self.interactive {
            ui::edit_params(&mut params)?;
        }
        let client = CoverClient::new(self.request_config())?;

        let stdout = std::io::stdout();
        writeln!(stdout.lock(), "{}", ui::params_line(&params))
            .context("failed to print parameters")?;

        let spinner = ui::spinner("Generating cover...");
        let result = client.request_cover(&params);
        spinner.finish_and_clear();
        let response = result
            .with_context(|| format!("cover request to {} failed", client.config().endpoint))?;

        if !response.is_pdf() {
            warn!(
                content_type = response.content_type.as_deref().unwrap_or("unknown"),
                "response body does not look like a PDF"
            );
        }

        let written = output::write_body(&self.output, &response.body)?;
        ui::print_report(&mut stdout.lock(), &response, &self.output, written)
            .context("failed to print report")?;
        Ok(())
    }
}
