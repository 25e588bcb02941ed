use anyhow::{bail, Context};
use bim_bandit::StoppingPolicy;
use bim_core::{Graph, Seed, VertexId};
use bim_greedy::{SeedSelection, SelectionParams};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Run manifest stored next to every selection result
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub timestamp: String,
    pub dataset: String,
    pub strategy: String,
    pub run: u64,
    pub seed: Seed,
    pub model: String,
    pub k: usize,
    pub eps: f64,
    pub delta: f64,
    pub n_vertices: usize,
    pub n_edges: usize,
    pub policy: StoppingPolicy,
    pub beta: f64,
    pub kappa: f64,
    pub seeds: Vec<VertexId>,
    pub total_samples: usize,
    pub commit_hash: Option<String>,
    pub rust_version: String,
}

impl RunManifest {
    pub fn new(
        dataset: &str,
        run: u64,
        seed: Seed,
        graph: &Graph,
        params: &SelectionParams,
        selection: &SeedSelection,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            dataset: dataset.to_string(),
            strategy: selection.strategy.name().to_string(),
            run,
            seed,
            model: params.model.short_name().to_string(),
            k: params.k,
            eps: params.eps,
            delta: params.delta,
            n_vertices: graph.num_vertices(),
            n_edges: graph.num_edges(),
            policy: params.bai.policy,
            beta: params.bai.beta,
            kappa: params.bai.kappa,
            seeds: selection.seeds.clone(),
            total_samples: selection.samples,
            commit_hash: get_git_commit(),
            rust_version: get_rust_version(),
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let manifest = serde_json::from_str(&json)?;
        Ok(manifest)
    }
}

/// `<root>/<dataset>/<alg>`
pub fn result_dir(root: &Path, dataset: &str, alg: &str) -> PathBuf {
    root.join(dataset).join(alg)
}

pub fn result_path(root: &Path, dataset: &str, alg: &str, run: u64) -> PathBuf {
    result_dir(root, dataset, alg).join(format!("{}.txt", run))
}

pub fn eval_path(root: &Path, dataset: &str, alg: &str, run: u64) -> PathBuf {
    result_dir(root, dataset, alg).join(format!("{}_eval.txt", run))
}

pub fn manifest_path(root: &Path, dataset: &str, alg: &str, run: u64) -> PathBuf {
    result_dir(root, dataset, alg).join(format!("{}.manifest.json", run))
}

/// Write one `vertex samples` line per selection step, creating the
/// directory as needed.
pub fn save_result(
    root: &Path,
    dataset: &str,
    alg: &str,
    run: u64,
    seeds: &[VertexId],
    used_samples: &[usize],
) -> anyhow::Result<PathBuf> {
    if seeds.len() != used_samples.len() {
        bail!(
            "{} seeds but {} sample checkpoints for {}/{}",
            seeds.len(),
            used_samples.len(),
            dataset,
            alg
        );
    }

    let dir = result_dir(root, dataset, alg);
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut out = String::new();
    for (v, s) in seeds.iter().zip(used_samples) {
        writeln!(out, "{} {}", v, s)?;
    }
    let path = result_path(root, dataset, alg, run);
    std::fs::write(&path, out).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Vertex sequence of a stored result. Reading stops at the first line that
/// is not a `vertex samples` pair.
pub fn load_result(
    root: &Path,
    dataset: &str,
    alg: &str,
    run: u64,
) -> anyhow::Result<Vec<VertexId>> {
    let path = result_path(root, dataset, alg, run);
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("result {} not found", path.display()))?;

    let mut seeds = Vec::new();
    let mut tokens = text.split_whitespace();
    while let (Some(v), Some(s)) = (tokens.next(), tokens.next()) {
        match (v.parse::<VertexId>(), s.parse::<usize>()) {
            (Ok(v), Ok(_)) => seeds.push(v),
            _ => break,
        }
    }
    Ok(seeds)
}

/// One mean per line, in prefix order.
pub fn save_eval(
    root: &Path,
    dataset: &str,
    alg: &str,
    run: u64,
    means: &[f64],
) -> anyhow::Result<PathBuf> {
    let dir = result_dir(root, dataset, alg);
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut out = String::new();
    for mean in means {
        writeln!(out, "{}", mean)?;
    }
    let path = eval_path(root, dataset, alg, run);
    std::fs::write(&path, out).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Get git commit hash for reproducibility
fn get_git_commit() -> Option<String> {
    command_output("git", &["rev-parse", "HEAD"])
}

fn get_rust_version() -> String {
    command_output("rustc", &["--version"]).unwrap_or_else(|| "unknown".to_string())
}

fn command_output(program: &str, args: &[&str]) -> Option<String> {
    std::process::Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bim_core::DiffusionModel;
    use bim_greedy::Strategy;
    use tempfile::tempdir;

    #[test]
    fn test_result_file_layout() {
        let dir = tempdir().unwrap();
        let path =
            save_result(dir.path(), "karate", "celf-cb", 3, &[7, 0, 12], &[40, 95, 180]).unwrap();

        assert_eq!(path, dir.path().join("karate").join("celf-cb").join("3.txt"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "7 40\n0 95\n12 180\n");
        assert_eq!(load_result(dir.path(), "karate", "celf-cb", 3).unwrap(), vec![7, 0, 12]);
    }

    #[test]
    fn test_mismatched_checkpoints_rejected() {
        let dir = tempdir().unwrap();
        assert!(save_result(dir.path(), "d", "greedy", 0, &[1, 2], &[10]).is_err());
        assert!(!result_path(dir.path(), "d", "greedy", 0).exists());
    }

    #[test]
    fn test_missing_result_reported() {
        let dir = tempdir().unwrap();
        let err = load_result(dir.path(), "d", "celf", 5).unwrap_err();
        assert!(err.to_string().contains("5.txt"));
    }

    #[test]
    fn test_eval_lines() {
        let dir = tempdir().unwrap();
        let path = save_eval(dir.path(), "d", "celf", 1, &[1.5, 2.25]).unwrap();
        assert_eq!(path.file_name().unwrap(), "1_eval.txt");
        assert_eq!(std::fs::read_to_string(path).unwrap(), "1.5\n2.25\n");
    }

    #[test]
    fn test_manifest_round_trip() {
        let dir = tempdir().unwrap();
        let graph = Graph::path(4, 1.0);
        let params = SelectionParams::new(DiffusionModel::LinearThreshold, 2, 0.1, 0.05);
        let selection = SeedSelection {
            strategy: Strategy::CelfCb,
            seeds: vec![0, 3],
            checkpoints: vec![20, 31],
            samples: 31,
        };

        let manifest = RunManifest::new("path", 2, 24, &graph, &params, &selection);
        let path = manifest_path(dir.path(), "path", "celf-cb", 2);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        manifest.save_to_file(&path).unwrap();

        let loaded = RunManifest::load_from_file(&path).unwrap();
        assert_eq!(loaded.run_id, manifest.run_id);
        assert_eq!(loaded.strategy, "celf-cb");
        assert_eq!(loaded.model, "lt");
        assert_eq!(loaded.n_vertices, 5);
        assert_eq!(loaded.seeds, vec![0, 3]);
        assert_eq!(loaded.total_samples, 31);
        assert_eq!(loaded.policy, StoppingPolicy::Lazy);
    }
}
