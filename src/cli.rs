use anyhow::Result;
use clap::{Args, Parser};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "git-wrapped")]
#[command(about = "Spotify Wrapped, but for your Git history")]
#[command(after_help = "Example: git-wrapped --year 2025 --path ~/projects/myrepo")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    #[arg(long, help = "Output raw stats as JSON instead of the visual report")]
    pub json: bool,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,

    #[arg(short, long, help = "Log debug details to stderr")]
    pub verbose: bool,
}

#[derive(Args, Clone, Debug)]
pub struct CommonArgs {
    #[arg(short, long, help = "Path to the git repository (default: current directory)")]
    pub path: Option<PathBuf>,

    #[arg(short, long, help = "Year to analyze (default: all time)")]
    pub year: Option<i32>,

    #[arg(short, long, help = "Filter by author name or email (partial match)")]
    pub author: Option<String>,

    #[arg(
        long,
        help = "Give up on git after this long (e.g. 90s, 5m)",
        default_value = "120s",
        value_parser = parse_timeout
    )]
    pub timeout: Duration,
}

fn parse_timeout(input: &str) -> std::result::Result<Duration, humantime::DurationError> {
    humantime::parse_duration(input)
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        crate::wrapped::exec(self.common, self.json)
    }
}
