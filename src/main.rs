use clap::Parser;
use ljvariants::md_implementation::{
    cluster::Cluster,
    lj_direct_summation::Variant,
    timing::{time_variants, TimingConfig},
    xyz::read_xyz,
};
use log::info;
use std::path::PathBuf;

use mimalloc::MiMalloc;
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Times the separated, merged and rearranged LJ direct summation,
/// sequentially and in parallel.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Number of standard normal distributed atoms
    #[arg(short = 'n', long, default_value_t = 10_000)]
    nb_atoms: usize,

    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Read the cluster from an XYZ file instead of generating it
    #[arg(short, long)]
    input: Option<PathBuf>,

    #[arg(short, long, default_value_t = 7)]
    repeats: usize,

    #[arg(short, long, default_value_t = 1)]
    warmup: usize,

    /// Size of the thread pool used in parallel mode
    #[arg(short, long)]
    threads: Option<usize>,

    /// Only time these variants (separated, merged, rearranged), default all
    #[arg(long = "variant", value_name = "VARIANT")]
    variants: Vec<Variant>,

    /// Print the reports as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let cluster = match &cli.input {
        Some(path) => read_xyz(path)?,
        None => Cluster::random_normal(cli.nb_atoms, cli.seed),
    };
    info!(
        "cluster with {} atoms, {} pairs, {} threads",
        cluster.nb_atoms(),
        cluster.nb_pairs(),
        rayon::current_num_threads()
    );

    let config = TimingConfig {
        warmup: cli.warmup,
        repeats: cli.repeats,
    };

    let variants = if cli.variants.is_empty() {
        Variant::ALL.to_vec()
    } else {
        cli.variants.clone()
    };

    let reports = time_variants(&cluster, &variants, &config);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    for reports_of_mode in reports.chunks(variants.len()) {
        println!("parallel {}", reports_of_mode[0].mode.is_parallel());
        for report in reports_of_mode {
            println!("{}", report);
        }
        println!();
    }
    Ok(())
}
