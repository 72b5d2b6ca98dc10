use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use docpager::{
    Ingested, Library, Manifest, OrdinalLocale, PageView, Pager, PagerConfig, PolicyOverrides,
    RetentionPolicy, SeriesId,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "docpager", version, about = "Split documents into pages grouped into series")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Paginate files or directories and list the resulting series
    Paginate {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Print the manifest JSON instead of a table
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        settings: Settings,
    },
    /// Paginate one document and print a single page
    Read {
        path: PathBuf,
        /// 1-based series position
        #[arg(long, default_value_t = 1)]
        series: usize,
        /// 1-based page within the series
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        settings: Settings,
    },
    /// Page through a document interactively
    Browse {
        path: PathBuf,
        #[command(flatten)]
        settings: Settings,
    },
    /// Write the manifest of the paginated documents to a file
    Export {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
        #[command(flatten)]
        settings: Settings,
    },
}

/// Pagination flags shared by every subcommand; they override DOCPAGER_* values
#[derive(Args, Debug)]
struct Settings {
    #[arg(long, value_parser = ["fixed", "sentence", "hybrid", "lines"])]
    policy: Option<String>,
    /// Characters per page
    #[arg(long)]
    chunk_size: Option<usize>,
    /// Lines per page for the `lines` policy
    #[arg(long)]
    max_lines: Option<usize>,
    /// Page cap for the `hybrid` policy
    #[arg(long)]
    max_pages: Option<usize>,
    #[arg(long)]
    pages_per_series: Option<usize>,
    /// Series title language: ko or en
    #[arg(long)]
    locale: Option<OrdinalLocale>,
    /// replace or accumulate
    #[arg(long)]
    retention: Option<RetentionPolicy>,
}

impl Settings {
    fn into_config(self) -> Result<PagerConfig> {
        let mut config =
            PagerConfig::from_env().context("Invalid DOCPAGER_* environment settings")?;

        let overrides = PolicyOverrides {
            kind: self.policy,
            chunk_size: self.chunk_size,
            max_lines: self.max_lines,
            max_pages: self.max_pages,
        };
        if !overrides.is_empty() {
            config.policy = overrides.apply(config.policy)?;
        }
        if let Some(pages_per_series) = self.pages_per_series {
            config.pages_per_series = pages_per_series;
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if let Some(retention) = self.retention {
            config.retention = retention;
        }

        config.validate()?;
        Ok(config)
    }

    fn into_pager(self) -> Result<Pager> {
        Ok(Pager::new(self.into_config()?)?)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docpager=info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Paginate {
            paths,
            json,
            settings,
        } => paginate(&settings.into_pager()?, &paths, json),
        Command::Read {
            path,
            series,
            page,
            json,
            settings,
        } => read(&settings.into_pager()?, &path, series, page, json),
        Command::Browse { path, settings } => browse(&settings.into_pager()?, &path),
        Command::Export {
            paths,
            output,
            settings,
        } => export(&settings.into_pager()?, &paths, &output),
    }
}

fn paginate(pager: &Pager, paths: &[PathBuf], json: bool) -> Result<()> {
    let ingested = pager.ingest_paths(paths)?;

    if json {
        let manifest = Manifest::from_library(&pager.snapshot(), pager.config());
        println!("{}", manifest.to_json()?);
        return Ok(());
    }

    if ingested.is_empty() {
        println!(
            "Nothing to show: no supported documents found (looking for {})",
            supported_extensions(pager)
        );
        return Ok(());
    }

    println!("Policy: {}\n", pager.config().policy);
    for document in &ingested {
        print_document(document);
    }

    Ok(())
}

fn supported_extensions(pager: &Pager) -> String {
    pager
        .extractors()
        .registered_extensions()
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_document(ingested: &Ingested) {
    let document = &ingested.document;
    println!(
        "{} [{}] - {} chars, {} series",
        document.source,
        document.format,
        document.char_count,
        document.series_ids.len()
    );

    if document.series_ids.is_empty() {
        println!("  Nothing to show: no pages were produced\n");
        return;
    }

    for series in ingested.series() {
        let position = ingested
            .library
            .position(&series.id)
            .map_or(0, |index| index + 1);
        println!(
            "  {:>3}. {} ({} pages) {}",
            position,
            series.title,
            series.page_count(),
            series.id
        );
    }
    println!();
}

fn read(pager: &Pager, path: &Path, series: usize, page: usize, json: bool) -> Result<()> {
    pager.ingest_file(path)?;

    if pager.snapshot().is_empty() {
        println!("Nothing to show: {} produced no pages", path.display());
        return Ok(());
    }

    let view = pager.resolve_position(series, page)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print_page(&view, &pager.snapshot());
    }

    Ok(())
}

fn print_page(view: &PageView, library: &Library) {
    println!(
        "== {} | page {}/{} ==\n",
        view.series_title, view.page_number, view.total_pages
    );
    println!("{}\n", view.content);

    let title_of = |id: SeriesId| library.get(&id).map(|s| s.title.clone()).unwrap_or_default();
    if let Some(id) = view.prev_series_id {
        println!("previous series: {}", title_of(id));
    }
    if let Some(id) = view.next_series_id {
        println!("next series: {}", title_of(id));
    }
}

fn browse(pager: &Pager, path: &Path) -> Result<()> {
    pager.ingest_file(path)?;

    let Some(mut view) = pager.first_page()? else {
        println!("Nothing to show: {} produced no pages", path.display());
        return Ok(());
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_page(&view, &pager.snapshot());
        print!("\n{} > ", browse_hint(&view));
        io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        let target = match line.trim().split_once(' ').unwrap_or((line.trim(), "")) {
            ("q", _) => break,
            ("n", _) => view.next_page().map(|page| (view.series_id, page)),
            ("p", _) => view.prev_page().map(|page| (view.series_id, page)),
            ("]", _) => view.next_series_id.map(|id| (id, 1)),
            ("[", _) => view.prev_series_id.map(|id| (id, 1)),
            ("g", number) => match number.trim().parse::<usize>() {
                Ok(page) => Some((view.series_id, page)),
                Err(_) => {
                    eprintln!("usage: g <page>");
                    continue;
                }
            },
            _ => {
                eprintln!("unknown command: {}", line.trim());
                continue;
            }
        };

        let Some((series_id, page)) = target else {
            eprintln!("nowhere to go from here");
            continue;
        };

        match pager.resolve_page(series_id, page) {
            Ok(next) => view = next,
            Err(e) => eprintln!("{}", e),
        }
    }

    Ok(())
}

fn browse_hint(view: &PageView) -> String {
    let mut options = Vec::new();
    if view.has_prev_page() {
        options.push("p: prev");
    }
    if view.has_next_page() {
        options.push("n: next");
    }
    if view.prev_series_id.is_some() {
        options.push("[: prev series");
    }
    if view.next_series_id.is_some() {
        options.push("]: next series");
    }
    options.push("g <n>: go to page");
    options.push("q: quit");
    options.join(" | ")
}

fn export(pager: &Pager, paths: &[PathBuf], output: &Path) -> Result<()> {
    let ingested = pager.ingest_paths(paths)?;
    if ingested.is_empty() {
        println!(
            "Nothing to show: no supported documents found (looking for {})",
            supported_extensions(pager)
        );
    }

    let manifest = Manifest::from_library(&pager.snapshot(), pager.config());
    manifest.write_to_file(output)?;

    println!(
        "✓ Wrote {} series ({} pages) to {}",
        manifest.stats.series_count,
        manifest.stats.page_count,
        output.display()
    );
    Ok(())
}
