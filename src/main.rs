use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use circlevolve::engine_thread::{spawn_engine, EngineUpdate};
use circlevolve::{raster_io, EvolutionConfig};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image to approximate
    target: PathBuf,

    /// Where to write the final rendering (PNG)
    #[arg(short, long, default_value = "result/output.png")]
    output: PathBuf,

    /// JSON file with population parameters; missing keys use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override max_generations
    #[arg(long)]
    generations: Option<u64>,

    /// Override worker_count
    #[arg(long)]
    workers: Option<usize>,

    /// Override the RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Also save the best genome as JSON
    #[arg(long)]
    genome_out: Option<PathBuf>,

    /// Log progress every N generations
    #[arg(long, default_value_t = 1)]
    report_every: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // named workers show up as rayon-N in profilers and panics
    let _ = rayon::ThreadPoolBuilder::new()
        .thread_name(|i| format!("rayon-{i}"))
        .build_global();

    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => EvolutionConfig::load(path).with_context(|| format!("reading config {}", path.display()))?,
        None => EvolutionConfig::default(),
    };
    if let Some(generations) = args.generations {
        cfg.max_generations = generations;
    }
    if let Some(workers) = args.workers {
        cfg.worker_count = workers;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }

    let target = raster_io::load_target(&args.target)
        .with_context(|| format!("loading target image {}", args.target.display()))?;

    let running = spawn_engine(target, cfg)?;
    let report_every = args.report_every.max(1);
    for update in running.updates.iter() {
        match update {
            EngineUpdate::Started { width, height, seed, initial_fitness } => {
                log::info!("evolving {width}x{height} target (seed {seed}), initial fitness {initial_fitness:.6}");
            }
            EngineUpdate::Progress(report) if report.generation % report_every == 0 => {
                log::info!(
                    "Currently on generation {}, fitness {:.6} ({} genes, PSNR {:.2} dB)",
                    report.generation,
                    report.fitness,
                    report.genes,
                    report.metrics.psnr
                );
            }
            EngineUpdate::Progress(_) => {}
        }
    }
    let best = running.join()?;

    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    raster_io::save_png(&best.raster, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!("wrote {}", args.output.display());

    if let Some(path) = &args.genome_out {
        best.genome.save_json(path).with_context(|| format!("writing {}", path.display()))?;
        log::info!("wrote genome ({} genes) to {}", best.genome.len(), path.display());
    }

    Ok(())
}
