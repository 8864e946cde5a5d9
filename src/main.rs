#![feature(error_generic_member_access)]

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

mod dal;
mod geometry;
mod lines;
mod model;
mod overpass;
mod pipeline;

#[derive(Debug, Parser)]
#[command(about = "Stitches OSM metro line relations into station-annotated polylines")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fetch and stitch lines given as relation ids or known line names
    Fetch {
        #[arg(required = true)]
        lines: Vec<String>,
        /// Regenerate even when a usable artifact already exists
        #[arg(long)]
        force: bool,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Fetch and stitch every known line
    FetchAll {
        #[arg(long)]
        force: bool,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print the path between two stations of a stitched line
    Segment {
        file: PathBuf,
        from: String,
        to: String,
    },
    /// List the known lines
    Lines,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    _ = dotenv();

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let appender = tracing_appender::rolling::daily("./logs", "metro_line_stitcher.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);

    // A layer that logs events to rolling files.
    let file_log = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_appender)
        .with_ansi(false)
        .pretty();

    let console_log = tracing_subscriber::fmt::layer().compact();

    Registry::default()
        .with(file_log)
        .with(console_log)
        .with(env_filter)
        .init();

    match Cli::parse().command {
        Command::Fetch {
            lines,
            force,
            out_dir,
        } => {
            for line in lines {
                let relation_id = resolve_line(&line)?;
                if let Err(e) = pipeline::process_line(relation_id, &out_dir, force).await {
                    error!("relation {relation_id} failed: {e:?}");
                }
            }
        }
        Command::FetchAll { force, out_dir } => {
            for line in lines::KNOWN_LINES {
                info!("processing {} (relation {})", line.name, line.relation_id);
                if let Err(e) = pipeline::process_line(line.relation_id, &out_dir, force).await {
                    error!("{} failed: {e:?}", line.name);
                }
            }
        }
        Command::Segment { file, from, to } => {
            let artifact = dal::load_line(&file)?;
            let segment = geometry::segment::extract_segment(&artifact.path_points, &from, &to);

            if segment.is_empty() {
                warn!("no segment between {from} and {to} on {}", artifact.name);
            } else {
                println!("{from} -> {to} on {} ({} points)", artifact.name, segment.len());
                for point in &segment {
                    match &point.station_name {
                        Some(name) if point.is_station => {
                            println!("  [{:>10.5}, {:>9.5}] {name}", point.lon, point.lat)
                        }
                        _ => println!("  [{:>10.5}, {:>9.5}]", point.lon, point.lat),
                    }
                }
            }
        }
        Command::Lines => {
            for line in lines::KNOWN_LINES {
                println!("{:<20} relation {}", line.name, line.relation_id);
            }
        }
    }

    Ok(())
}

/// A line argument is either a raw relation id or a known line name.
fn resolve_line(line: &str) -> Result<i64> {
    if let Ok(relation_id) = line.parse::<i64>() {
        return Ok(relation_id);
    }

    match lines::relation_id_for(line) {
        Some(relation_id) => Ok(relation_id),
        None => bail!("unknown line {line}, see the `lines` command"),
    }
}
