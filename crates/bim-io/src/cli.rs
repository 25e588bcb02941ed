use crate::evaluate::evaluate_prefixes;
use crate::loader::load_graph;
use crate::results::{load_result, manifest_path, save_eval, save_result, RunManifest};
use anyhow::{ensure, Context};
use bim_core::{CascadeSimulator, DiffusionModel, Graph, Seed};
use bim_greedy::{select, BaiParams, SelectionParams, Strategy};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Plain greedy is only run on graphs up to this size.
pub const GREEDY_MAX_VERTICES: usize = 40;

#[derive(Parser)]
#[command(name = "bim")]
#[command(about = "BIM - Bandit-based Influence Maximization")]
#[command(long_about = "Seed selection for influence maximization with sampled cascades \
and confidence-bound greedy")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Select seed sets with every strategy and store the results
    Select(SelectArgs),
    /// Re-measure the spread of stored seed sets prefix by prefix
    Eval(EvalArgs),
}

#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Dataset name; the graph is read from <data-dir>/<dataset>/<dataset>.txt
    pub dataset: String,

    /// Run id; selects the random seeds and names the result files
    pub run: u64,

    /// Accuracy of each greedy step
    pub eps: f64,

    /// Failure probability of the whole run
    pub delta: f64,

    /// Number of seeds to select
    #[arg(long, default_value = "10")]
    pub n_top: usize,

    /// Best-arm search parameters (JSON), e.g. {"beta": 0.5, "policy": "Lazy"}
    #[arg(long)]
    pub params: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Dataset name
    pub dataset: String,

    /// Run id of the stored results; also seeds the evaluation
    pub run: u64,

    /// Target half-width of each spread estimate
    pub eps: f64,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Diffusion model
    #[arg(long, value_enum, default_value = "ic")]
    pub model: ModelType,

    /// Shorthand for --model lt
    #[arg(long, conflicts_with = "model")]
    pub lt: bool,

    /// Directory holding the datasets
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory receiving the results
    #[arg(long, default_value = "results")]
    pub results_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ModelType {
    #[value(name = "ic")]
    IndependentCascade,
    #[value(name = "lt")]
    LinearThreshold,
}

impl From<ModelType> for DiffusionModel {
    fn from(model_type: ModelType) -> Self {
        match model_type {
            ModelType::IndependentCascade => DiffusionModel::IndependentCascade,
            ModelType::LinearThreshold => DiffusionModel::LinearThreshold,
        }
    }
}

impl CommonArgs {
    pub fn diffusion_model(&self) -> DiffusionModel {
        if self.lt {
            DiffusionModel::LinearThreshold
        } else {
            self.model.into()
        }
    }

    pub fn dataset_path(&self, dataset: &str) -> PathBuf {
        self.data_dir.join(dataset).join(format!("{}.txt", dataset))
    }

    fn load_dataset(&self, dataset: &str) -> anyhow::Result<Graph> {
        let path = self.dataset_path(dataset);
        let graph = load_graph(&path).with_context(|| format!("dataset {} not found", dataset))?;
        info!(
            path = %path.display(),
            n = graph.num_vertices(),
            m = graph.num_edges(),
            "graph loaded"
        );
        Ok(graph)
    }
}

/// Strategies run by `select` on a graph of `n` vertices, with their seeds.
pub fn planned_strategies(n: usize, run: u64) -> Vec<(Strategy, Seed)> {
    Strategy::ALL
        .into_iter()
        .filter(|&s| s != Strategy::Greedy || n <= GREEDY_MAX_VERTICES)
        .map(|s| (s, strategy_seed(s, run)))
        .collect()
}

pub fn strategy_seed(strategy: Strategy, run: u64) -> Seed {
    let offset = match strategy {
        Strategy::Greedy => 1,
        Strategy::Celf => 2,
        Strategy::GreedyCb => 3,
        Strategy::CelfCb => 4,
    };
    10 * run + offset
}

pub fn parse_bai_params(params: Option<&str>) -> anyhow::Result<BaiParams> {
    match params {
        Some(json) => serde_json::from_str(json).context("parsing --params"),
        None => Ok(BaiParams::default()),
    }
}

pub fn run_select_command(args: SelectArgs) -> anyhow::Result<()> {
    let model = args.common.diffusion_model();
    let bai = parse_bai_params(args.params.as_deref())?;
    let params = SelectionParams::new(model, args.n_top, args.eps, args.delta).with_bai(bai);
    params.validate()?;

    println!("BIM Seed Selection");
    println!("==================");
    println!("Dataset: {}", args.dataset);
    println!("Run: {}", args.run);
    println!("Model: {}", model);
    println!("k: {}", args.n_top);
    println!("eps: {}", args.eps);
    println!("delta: {}", args.delta);
    println!("BAI: {:?}", bai);

    let graph = args.common.load_dataset(&args.dataset)?;
    let root = args.common.results_dir.as_path();

    for (strategy, seed) in planned_strategies(graph.num_vertices(), args.run) {
        let selection = select(&graph, strategy, &params, seed)?;
        let alg = strategy.name();
        let (seeds, checkpoints) = (&selection.seeds, &selection.checkpoints);
        let path = save_result(root, &args.dataset, alg, args.run, seeds, checkpoints)?;

        let manifest = RunManifest::new(&args.dataset, args.run, seed, &graph, &params, &selection);
        manifest.save_to_file(manifest_path(root, &args.dataset, alg, args.run))?;

        println!();
        println!("{}: {:?}", strategy, selection.seeds);
        println!("  samples: {}", selection.samples);
        println!("  wrote {}", path.display());
    }

    println!("✓ Selection completed");
    Ok(())
}

/// Evaluate the stored results of every strategy. One simulator seeded with
/// the run id serves all strategies and prefixes.
pub fn run_eval_command(args: EvalArgs) -> anyhow::Result<()> {
    ensure!(
        args.eps.is_finite() && args.eps > 0.0,
        "eps must be finite and positive, got {}",
        args.eps
    );
    let model = args.common.diffusion_model();
    let graph = args.common.load_dataset(&args.dataset)?;
    let root = args.common.results_dir.as_path();
    let mut sim = CascadeSimulator::new(&graph, args.run);

    for strategy in Strategy::ALL {
        evaluate_stored(root, &mut sim, model, &args, strategy)?;
    }
    Ok(())
}

fn evaluate_stored(
    root: &Path,
    sim: &mut CascadeSimulator<'_>,
    model: DiffusionModel,
    args: &EvalArgs,
    strategy: Strategy,
) -> anyhow::Result<()> {
    let alg = strategy.name();
    let seeds = match load_result(root, &args.dataset, alg, args.run) {
        Ok(seeds) if !seeds.is_empty() => seeds,
        Ok(_) => {
            warn!(alg, run = args.run, "stored result is empty");
            return Ok(());
        }
        Err(err) => {
            warn!(alg, run = args.run, "{:#}", err);
            return Ok(());
        }
    };

    println!("Evaluating {}/{}/{}: {} seeds", args.dataset, alg, args.run, seeds.len());
    let estimates = evaluate_prefixes(sim, model, &seeds, args.eps);
    for (len, est) in estimates.iter().enumerate() {
        println!(
            "  size {}: {:.4} ± {:.4} ({} samples)",
            len + 1,
            est.mean,
            est.half_width,
            est.samples
        );
    }

    let means: Vec<f64> = estimates.iter().map(|e| e.mean).collect();
    save_eval(root, &args.dataset, alg, args.run, &means)?;
    Ok(())
}
