use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use bitmerge::report::{export_jsonl, level_stats, render_mermaid, render_tree, write_level_stats};
use bitmerge::{random_sequence, DepthPolicy, GameTree, Sequence};

#[derive(Debug, Parser)]
#[command(name = "inspect", about = "Bitmerge game graph explorer")]
struct Args {
    /// Explicit starting sequence of '0'/'1' digits (overrides --length)
    #[arg(long)]
    sequence: Option<String>,

    /// Length of the randomly generated starting sequence
    #[arg(long, default_value_t = 12)]
    length: usize,

    /// Seed for random sequence generation (deterministic)
    #[arg(long, default_value_t = 0x00C0FFEEu64)]
    seed: u64,

    /// Lookahead depth to materialize (defaults to the full remaining length)
    #[arg(long)]
    depth_limit: Option<usize>,

    /// Print the ASCII tree (output grows with path count; short sequences only)
    #[arg(long, default_value_t = false)]
    tree: bool,

    /// Print a mermaid flowchart of the graph
    #[arg(long, default_value_t = false)]
    mermaid: bool,

    /// Write one JSON line per distinct node to this file
    #[arg(long)]
    jsonl: Option<PathBuf>,
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let sequence = match &args.sequence {
        Some(s) => Sequence::parse(s)?,
        None => {
            if args.length == 0 {
                return Err("sequence length must be positive".into());
            }
            random_sequence(args.length, args.seed)
        }
    };
    let limit = args.depth_limit.unwrap_or(sequence.len());
    let policy = DepthPolicy::Fixed(limit);

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("[{elapsed_precise}] {spinner} {msg}")?);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb.set_message(format!("materializing {sequence} to depth {limit}"));
    let t0 = Instant::now();
    let tree = GameTree::from_sequence(&sequence.to_string(), policy)?;
    pb.finish_and_clear();
    eprintln!(
        "[inspect] materialized {} to depth {} in {:.0} ms",
        sequence,
        limit,
        t0.elapsed().as_secs_f64() * 1000.0
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let stats = level_stats(tree.root());
    write_level_stats(&stats, &mut out)?;

    if args.tree {
        render_tree(tree.root(), &mut out)?;
    }
    if args.mermaid {
        render_mermaid(tree.root(), &mut out)?;
    }
    if let Some(path) = &args.jsonl {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let lines = export_jsonl(tree.root(), &mut writer)?;
        writer.flush()?;
        eprintln!("[inspect] wrote {} lines to {}", lines, path.display());
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("[inspect] error: {e}");
        std::process::exit(1);
    }
}
