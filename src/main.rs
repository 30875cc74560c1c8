// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Dispatch to the appropriate subcommand handler
// 4. Write the tree / sitemap / JSON report
// 5. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod cli;
mod crawl;
mod fetch;
mod logging;
mod output;
mod tree;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Duration;
use tracing::{info, warn};
use url::Url;

use cli::{Cli, Commands, SitemapFormat};
use crawl::{CrawlConfig, CrawlMode, CrawlReport, Crawler};
use fetch::{Fetcher, HttpFetcher};
use output::{write_sitemap_text, write_sitemap_xml};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match cli.command {
        Commands::Crawl {
            seed_url,
            max_depth,
            show_tree,
            sitemap,
            output_file,
            json,
            sequential,
            max_in_flight,
            timeout_secs,
            request_timeout_secs,
        } => {
            let mode = if sequential {
                CrawlMode::Sequential
            } else {
                CrawlMode::Concurrent {
                    max_in_flight: usize::from(max_in_flight),
                }
            };
            let config = CrawlConfig {
                max_depth,
                record_tree: show_tree,
                mode,
                deadline: timeout_secs.map(Duration::from_secs),
            };
            let output = Output {
                show_tree,
                sitemap,
                json,
                file: output_file,
            };
            handle_crawl(&seed_url, config, request_timeout_secs, &output).await
        }
        Commands::Links {
            page_url,
            request_timeout_secs,
        } => handle_links(&page_url, request_timeout_secs).await,
    }
}

// What to print once the crawl is done
struct Output {
    show_tree: bool,
    sitemap: SitemapFormat,
    json: bool,
    file: Option<String>,
}

// Handles the 'crawl' subcommand
async fn handle_crawl(
    seed_url: &str,
    config: CrawlConfig,
    request_timeout_secs: u64,
    output: &Output,
) -> Result<()> {
    let seed = parse_seed(seed_url)?;
    let fetcher = HttpFetcher::new(Duration::from_secs(request_timeout_secs))
        .context("failed to create HTTP client")?;

    let crawler = Crawler::new(fetcher, config);

    // Ctrl-C stops new fetches; whatever was found so far is still printed
    let cancel = crawler.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, finishing up");
            cancel.cancel();
        }
    });

    let report = crawler.run(seed.as_str()).await;
    if let Some(tree) = &report.tree {
        info!(nodes = tree.node_count(), "recorded link tree");
    }

    let mut writer = open_output(output.file.as_deref())?;
    write_report(&report, output, &mut writer)?;
    writer.flush()?;
    Ok(())
}

// Handles the 'links' subcommand
async fn handle_links(page_url: &str, request_timeout_secs: u64) -> Result<()> {
    let page = parse_seed(page_url)?;
    let fetcher = HttpFetcher::new(Duration::from_secs(request_timeout_secs))
        .context("failed to create HTTP client")?;

    let links = fetcher
        .fetch(page.as_str())
        .await
        .with_context(|| format!("failed to fetch {}", page))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for link in links {
        writeln!(out, "{}", link)?;
    }
    Ok(())
}

// The seed must be an absolute URL with a host. Query and fragment are
// dropped so the seed matches the links the extractor produces for it.
fn parse_seed(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).map_err(|e| anyhow!("Invalid URL '{}': {}", raw, e))?;
    if url.host_str().is_none() {
        return Err(anyhow!("URL has no host: {}", raw));
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn open_output(path: Option<&str>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("failed to create {}", path))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

fn write_report(report: &CrawlReport, output: &Output, writer: &mut impl Write) -> Result<()> {
    if output.json {
        let json = serde_json::to_string_pretty(report)?;
        writeln!(writer, "{}", json)?;
        return Ok(());
    }

    if output.show_tree {
        if let Some(tree) = &report.tree {
            tree.write_to(&mut *writer)?;
            writeln!(writer)?;
        }
    }

    match output.sitemap {
        SitemapFormat::Xml => write_sitemap_xml(&report.visited, writer)?,
        SitemapFormat::Text => write_sitemap_text(&report.visited, writer)?,
        SitemapFormat::Skip => {}
    }

    if report.cancelled {
        warn!(visited = report.visited.len(), "crawl was cancelled, output is partial");
    }
    Ok(())
}
