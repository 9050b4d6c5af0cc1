use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "devbox",
    version = env!("CARGO_PKG_VERSION"),
    about = "Developer toolbox - Markdown to HTML rendering and color palette generation",
    long_about = r#"
devbox bundles small text and color utilities for everyday development work. It renders a safe subset of Markdown to HTML and derives tonal palettes and complementary tones from a single hex color.

Examples:
  devbox markdown README.md        # Render a Markdown file to HTML
  devbox markdown -s README.md     # Render a standalone HTML document
  cat notes.md | devbox markdown   # Read Markdown from stdin
  devbox palette '#529DFF'         # Show shades and complementary tones
  devbox palette f09 -f yaml       # Palette as YAML
  devbox convert '#3a7d44'         # Show hex, rgb and hsl forms
"#
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Alternative config file path
    #[arg(
        short = 'F',
        long = "config-file",
        value_name = "CONFIG_PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    /// Skip loading configuration files
    #[arg(short = 'n', long = "no-config", global = true)]
    pub no_config: bool,

    /// Strip all ANSI colors
    #[arg(short = 'A', long = "no-colors", global = true)]
    pub no_colors: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render Markdown to an HTML fragment
    Markdown(MarkdownArgs),
    /// Generate shades and complementary tones for a base color
    Palette(PaletteArgs),
    /// Show a color as hex, rgb and hsl
    Convert(ConvertArgs),
}

#[derive(clap::Args, Debug)]
pub struct MarkdownArgs {
    /// Path to markdown file (use '-' for stdin)
    #[arg(value_name = "FILE")]
    pub filename: Option<String>,

    /// Wrap the fragment in a complete HTML document
    #[arg(short = 's', long = "standalone")]
    pub standalone: bool,

    /// Write HTML to this file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Monitor file for changes and re-render
    #[arg(short = 'm', long = "monitor")]
    pub monitor: bool,
}

#[derive(clap::Args, Debug)]
pub struct PaletteArgs {
    /// Base color as 3 or 6 hex digits, with or without '#'
    #[arg(value_name = "COLOR")]
    pub color: Option<String>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value = "table")]
    pub format: Option<PaletteFormat>,
}

#[derive(clap::Args, Debug)]
pub struct ConvertArgs {
    /// Color as 3 or 6 hex digits, with or without '#'
    #[arg(value_name = "COLOR")]
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteFormat {
    #[value(help = "Table with color swatches")]
    Table,
    #[value(help = "YAML document")]
    Yaml,
    #[value(help = "One color per line")]
    Plain,
}
