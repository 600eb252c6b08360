//! htmlblocks CLI - HTML to content block converter

mod server;

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;

use htmlblocks::{Block, Converter, KeyGenerator, OutputShape, RenderOptions};

#[derive(Parser)]
#[command(name = "htmlblocks")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert HTML fragments into rich-text content blocks", long_about = None)]
struct Cli {
    /// Input HTML file ("-" for stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert HTML to JSON blocks
    Convert {
        /// Input HTML file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Emit the Volto block shape
        #[arg(long)]
        volto: bool,

        /// Produce text blocks only
        #[arg(long)]
        text_only: bool,

        /// Do not map class="callout" to a callout block
        #[arg(long)]
        no_callout: bool,

        /// Seed for reproducible block keys
        #[arg(long, value_name = "N")]
        seed: Option<u64>,
    },

    /// Show a summary of the blocks in an HTML file
    Info {
        /// Input HTML file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Serve the conversion endpoint over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, env = "HTMLBLOCKS_ADDR", default_value = "127.0.0.1:3000")]
        addr: SocketAddr,

        /// Emit the Volto block shape
        #[arg(long)]
        volto: bool,

        /// Request body limit in MiB
        #[arg(long, default_value = "50")]
        body_limit_mb: usize,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            compact,
            volto,
            text_only,
            no_callout,
            seed,
        }) => {
            let mut converter = Converter::new();
            if text_only {
                converter = converter.text_only();
            }
            if no_callout {
                converter = converter.without_hook();
            }
            let mut render_options = RenderOptions::new();
            if compact {
                render_options = render_options.compact();
            }
            if volto {
                render_options = render_options.volto();
            }
            cmd_convert(&input, output.as_deref(), &converter, &render_options, seed)
        }
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Serve {
            addr,
            volto,
            body_limit_mb,
        }) => cmd_serve(addr, volto, body_limit_mb),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, None, &Converter::new(), &RenderOptions::new(), None)
            } else {
                println!("{}", "Usage: htmlblocks <FILE>".yellow());
                println!("       htmlblocks --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_input(input: &Path) -> io::Result<String> {
    if input == Path::new("-") {
        let mut html = String::new();
        io::stdin().read_to_string(&mut html)?;
        Ok(html)
    } else {
        fs::read_to_string(input)
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    converter: &Converter,
    render_options: &RenderOptions,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = read_input(input)?;
    let mut keys = seed.map(KeyGenerator::with_seed).unwrap_or_default();
    let blocks = converter.convert_with_keys(&html, &mut keys);
    let json = htmlblocks::render::to_json(&blocks, render_options)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let html = read_input(input)?;
    let blocks = Converter::new().convert(&html);

    println!("{}", "Fragment Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Input".bold(), input.display());
    println!("{}: {} bytes", "Size".bold(), html.len());
    println!("{}: {}", "Blocks".bold(), blocks.len());

    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for block in &blocks {
        *kinds.entry(block.kind()).or_default() += 1;
    }
    for (kind, count) in &kinds {
        println!("  {} {}: {}", "•".dimmed(), kind, count);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let text: String = blocks
        .iter()
        .map(Block::plain_text)
        .collect::<Vec<_>>()
        .join("\n");
    let entities: usize = blocks
        .iter()
        .map(|block| match block {
            Block::Text { content } => content.entity_map.len(),
            _ => 0,
        })
        .sum();

    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());
    println!("{}: {}", "Entities".bold(), entities);

    Ok(())
}

fn cmd_serve(
    addr: SocketAddr,
    volto: bool,
    body_limit_mb: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let shape = if volto {
        OutputShape::Volto
    } else {
        OutputShape::Blocks
    };
    let state = server::AppState::new(Converter::new())
        .with_shape(shape)
        .with_body_limit(body_limit_mb.saturating_mul(1024 * 1024));

    println!("{} http://{}/html_converter", "Serving".green().bold(), addr);
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::serve(addr, state))?;
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "htmlblocks".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("HTML to rich-text content block converter");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["htmlblocks", "serve"]).unwrap();
        match cli.command {
            Some(Commands::Serve {
                volto,
                body_limit_mb,
                ..
            }) => {
                assert!(!volto);
                assert_eq!(body_limit_mb, 50);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_convert_to_file() {
        let mut input = tempfile::NamedTempFile::new().unwrap();
        write!(input, "<p>foo</p><p><img src=\"a/image_large\"></p>").unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("blocks.json");

        cmd_convert(
            input.path(),
            Some(&output),
            &Converter::new(),
            &RenderOptions::new().compact(),
            Some(7),
        )
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(json[0]["type"], "text");
        assert_eq!(json[1]["type"], "image");
        assert_eq!(json[1]["size"], "l");
    }

    #[test]
    fn test_convert_missing_input() {
        let result = cmd_convert(
            Path::new("/nonexistent/page.html"),
            None,
            &Converter::new(),
            &RenderOptions::new(),
            None,
        );
        assert!(result.is_err());
    }
}
