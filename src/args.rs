use clap::{Parser, ValueEnum};
use listing_scout::output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "listing-scout")]
#[command(about = "Scrapes property listings from a paginated embedded inventory widget")]
#[command(version)]
pub struct Args {
    /// URL of the page carrying the embedded inventory widget
    pub url: String,

    /// Maximum number of result pages to visit
    #[arg(short, long)]
    pub max_pages: Option<u32>,

    /// File the accumulated records are written to
    #[arg(short, long, default_value = "listings.json")]
    pub output: PathBuf,

    /// On-disk shape of the output file
    #[arg(short, long, value_enum, default_value_t = FormatArg::Wrapped)]
    pub format: FormatArg,

    /// WebDriver endpoint (overrides the config file)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// JSON configuration file; command-line flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Contact address written into the flat output shape
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Metadata object wrapping the full records
    Wrapped,
    /// Bare array of flattened records
    Flat,
}

/// Convert from CLI argument format to the output module's format
pub fn convert_format(arg: FormatArg) -> OutputFormat {
    match arg {
        FormatArg::Wrapped => OutputFormat::Wrapped,
        FormatArg::Flat => OutputFormat::Flat,
    }
}
