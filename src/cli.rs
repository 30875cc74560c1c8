// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "sitemapper",
    version = "0.1.0",
    about = "Crawl a website to a fixed depth and print its link tree and sitemap",
    long_about = "sitemapper follows links from a seed URL, staying on the same domain, \
                  up to a maximum depth. It prints a sitemap of every URL it saw and, \
                  optionally, the tree of which page linked to which."
)]
pub struct Cli {
    /// Log progress to stderr (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a website starting from a seed URL
    ///
    /// Example: sitemapper crawl https://example.com --max-depth 3 --show-tree
    Crawl {
        /// Seed URL (e.g., https://example.com)
        seed_url: String,

        /// Maximum crawl depth
        ///
        /// Depth 0 = just the seed URL, nothing is fetched
        /// Depth 1 = the seed page and the links on it
        /// etc.
        #[arg(long, default_value_t = 2)]
        max_depth: usize,

        /// Print the tree of links before the sitemap
        #[arg(long)]
        show_tree: bool,

        /// Sitemap format
        #[arg(long, value_enum, default_value_t = SitemapFormat::Xml)]
        sitemap: SitemapFormat,

        /// Write output to this file instead of stdout
        #[arg(long)]
        output_file: Option<String>,

        /// Print the full crawl report as JSON instead of tree/sitemap
        #[arg(long)]
        json: bool,

        /// Crawl one page at a time, depth-first (reproducible output)
        #[arg(long)]
        sequential: bool,

        /// Maximum number of pages fetched at the same time
        #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u16).range(1..))]
        max_in_flight: u16,

        /// Stop starting new fetches after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// Timeout for each HTTP request, in seconds
        #[arg(long, default_value_t = 5)]
        request_timeout_secs: u64,
    },

    /// Fetch a single page and list the links found on it
    ///
    /// Example: sitemapper links https://example.com/docs/
    Links {
        /// Page URL
        page_url: String,

        /// Timeout for the HTTP request, in seconds
        #[arg(long, default_value_t = 5)]
        request_timeout_secs: u64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SitemapFormat {
    /// sitemaps.org XML
    Xml,
    /// One URL per line
    Text,
    /// Do not print a sitemap
    #[value(name = "none")]
    Skip,
}
