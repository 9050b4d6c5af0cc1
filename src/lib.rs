pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod markdown;
pub mod monitor;
pub mod output;
pub mod table;
pub mod terminal;
pub mod utils;

use anyhow::Result;
use clap::ArgMatches;
use cli::{Cli, Command, ConvertArgs, MarkdownArgs, PaletteArgs};
use color::{FALLBACK_HEX, generate_palette, is_valid_hex};
use config::Config;
use error::DevboxError;
use markdown::MarkdownRenderer;
use std::io::{self, Read, Write};
use std::path::Path;

/// Main entry point for the devbox application
pub fn run(cli: Cli, matches: &ArgMatches) -> Result<()> {
    let config = Config::from_cli(&cli, matches)?;

    match &cli.command {
        Command::Markdown(args) => run_markdown(args, &config),
        Command::Palette(args) => run_palette(args, &config),
        Command::Convert(args) => run_convert(args, &config),
    }
}

/// Render Markdown to HTML, optionally as a complete document
pub fn render_document(markdown: &str, standalone: bool) -> String {
    let fragment = MarkdownRenderer::new().render(markdown);

    if standalone {
        let title = utils::extract_title(markdown);
        utils::wrap_html_document(title.as_deref(), &fragment)
    } else {
        fragment
    }
}

/// Write `html` to `path`, or to stdout when no path is given
pub fn write_output(html: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => {
            let mut content = html.to_string();
            if !content.ends_with('\n') {
                content.push('\n');
            }
            std::fs::write(path, content)?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", html)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn run_markdown(args: &MarkdownArgs, config: &Config) -> Result<()> {
    let content = get_input_content(args.filename.as_deref())?;
    let html = render_document(&content, config.standalone);
    write_output(&html, args.output.as_deref())?;

    if args.monitor {
        match args.filename.as_deref() {
            Some(filename) if filename != "-" => {
                monitor::watch_file(filename, config, args.output.as_deref())?;
            }
            _ => log::warn!("--monitor needs a file argument; ignoring it for stdin input"),
        }
    }

    Ok(())
}

fn run_palette(args: &PaletteArgs, config: &Config) -> Result<()> {
    let raw = args.color.as_deref().unwrap_or(&config.base_color);
    warn_on_fallback(raw);

    let palette = generate_palette(raw);
    let rendered = output::format_palette(&palette, config.palette_format, no_colors(config))?;
    print!("{}", rendered);
    Ok(())
}

fn run_convert(args: &ConvertArgs, config: &Config) -> Result<()> {
    warn_on_fallback(&args.color);
    print!("{}", output::format_conversion(&args.color, no_colors(config)));
    Ok(())
}

fn no_colors(config: &Config) -> bool {
    config.no_colors || !terminal::supports_color()
}

fn warn_on_fallback(raw: &str) {
    if !is_valid_hex(raw) {
        log::warn!(
            "'{}' is not a 3 or 6 digit hex color; using {}",
            raw,
            FALLBACK_HEX
        );
    }
}

fn get_input_content(filename: Option<&str>) -> Result<String> {
    let mut content = match filename {
        Some(filename) if filename != "-" => {
            let path = Path::new(filename);
            if !path.exists() {
                anyhow::bail!("File not found: {}", filename);
            }
            std::fs::read_to_string(path).map_err(DevboxError::from)?
        }
        _ => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .map_err(DevboxError::from)?;
            content
        }
    };

    utils::strip_leading_bom(&mut content);
    Ok(content)
}
