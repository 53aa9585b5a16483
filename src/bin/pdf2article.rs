//! CLI binary for pdf2article.
//!
//! A thin shim over the library crate: `serve` runs the upload front-end,
//! `convert` and `inspect` work on a local file or URL directly.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pdf2article::pipeline::{html, input};
use pdf2article::server::{self, ServeOptions};
use pdf2article::{convert_to_file, inspect, ConversionConfig};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const AFTER_HELP: &str = r#"EXAMPLES:
  # Run the upload front-end on the default port
  pdf2article serve

  # Bind elsewhere, allow bigger uploads
  pdf2article serve --bind 127.0.0.1 --port 9000 --max-upload-mb 100

  # One-shot conversion (stdout)
  pdf2article convert document.pdf

  # Convert to a file, from a URL, with an explicit title
  pdf2article convert https://arxiv.org/pdf/1706.03762 -o attention.html --title "Attention"

  # Inspect PDF metadata as JSON, no conversion
  pdf2article inspect document.pdf

ENVIRONMENT VARIABLES:
  PDF2ARTICLE_PORT   Port for `serve` (default 8000)
  PDFIUM_LIB_PATH    Path to an existing libpdfium shared library
"#;

/// Convert PDF documents to reader-mode HTML.
#[derive(Parser, Debug)]
#[command(
    name = "pdf2article",
    version,
    about = "Convert PDF documents to reader-mode HTML",
    arg_required_else_help = true,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "PDF2ARTICLE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "PDF2ARTICLE_QUIET")]
    quiet: bool,

    /// PDF user password for encrypted documents.
    #[arg(long, global = true, env = "PDF2ARTICLE_PASSWORD")]
    password: Option<String>,

    /// Path to a pdfium shared library.
    #[arg(long, global = true, env = "PDFIUM_LIB_PATH")]
    pdfium_lib: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP upload front-end.
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "0.0.0.0")]
        bind: IpAddr,

        /// Port to listen on.
        #[arg(short, long, env = "PDF2ARTICLE_PORT", default_value_t = 8000)]
        port: u16,

        /// Upload size ceiling in megabytes.
        #[arg(long, default_value_t = 50)]
        max_upload_mb: usize,
    },

    /// Convert one PDF (local path or URL) to HTML.
    Convert {
        /// Local PDF file path or HTTP/HTTPS URL.
        input: String,

        /// Write HTML to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Document title (default: derived from the filename).
        #[arg(long)]
        title: Option<String>,

        /// HTTP download timeout in seconds for URL inputs.
        #[arg(long, default_value_t = 120)]
        download_timeout: u64,
    },

    /// Print PDF metadata as JSON, no conversion.
    Inspect {
        /// Local PDF file path or HTTP/HTTPS URL.
        input: String,

        /// HTTP download timeout in seconds for URL inputs.
        #[arg(long, default_value_t = 120)]
        download_timeout: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let mut builder = ConversionConfig::builder();
    if let Some(ref pwd) = cli.password {
        builder = builder.password(pwd.as_str());
    }
    if let Some(ref path) = cli.pdfium_lib {
        builder = builder.pdfium_library_path(path);
    }
    let config = builder.build().context("invalid configuration")?;

    match cli.command {
        Command::Serve {
            bind,
            port,
            max_upload_mb,
        } => {
            let opts = ServeOptions {
                addr: SocketAddr::new(bind, port),
                max_upload_bytes: max_upload_mb * 1024 * 1024,
            };
            server::serve(opts, config).await.context("server failed")?;
        }

        Command::Convert {
            input: input_str,
            output,
            title,
            download_timeout,
        } => {
            let resolved = input::resolve_input(&input_str, download_timeout)
                .await
                .context("failed to resolve input")?;

            // Same contract as the web glue: the renderer embeds the title
            // verbatim, so escape the filename-derived (or user-given) one.
            let title = title
                .or(resolved.suggested_title)
                .unwrap_or_else(|| config.default_title.clone());
            let title = html::escape_text(&title);

            match output {
                Some(path) => {
                    convert_to_file(resolved.bytes, &title, &path, &config)
                        .await
                        .context("conversion failed")?;
                    eprintln!("wrote {}", path.display());
                }
                None => {
                    let rendered = pdf2article::convert(resolved.bytes, &title, &config)
                        .await
                        .context("conversion failed")?;
                    println!("{}", rendered);
                }
            }
        }

        Command::Inspect {
            input: input_str,
            download_timeout,
        } => {
            let resolved = input::resolve_input(&input_str, download_timeout)
                .await
                .context("failed to resolve input")?;
            let info = inspect(resolved.bytes, &config)
                .await
                .context("inspection failed")?;
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}
