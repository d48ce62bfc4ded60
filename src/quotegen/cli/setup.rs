use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "quotegen", bin_name = "quotegen", version)]
#[command(about = "Build, preview and print client quotations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only)
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive quote session (default)
    #[command(display_order = 1)]
    Session,

    /// Apply a script of session commands to a fresh quote and write one rendition
    #[command(display_order = 2)]
    Render {
        /// File with one session command per line ("-" reads stdin)
        #[arg(long, short)]
        script: PathBuf,

        /// Which rendition to write
        #[arg(long, value_enum, default_value_t = RenderView::Editor)]
        view: RenderView,

        /// Editor section to show (editor view only)
        #[arg(long)]
        section: Option<String>,

        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Username for the access gate
        #[arg(long)]
        username: Option<String>,

        /// Password for the access gate
        #[arg(long)]
        password: Option<String>,
    },

    /// Get or set configuration values
    #[command(display_order = 3)]
    Config {
        /// Configuration key (e.g. company-name, payment-ifsc)
        key: Option<String>,
        /// Value to set
        value: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RenderView {
    /// The editor panel
    Editor,
    /// The terminal outline of the preview
    Preview,
    /// The standalone print document
    Html,
}
