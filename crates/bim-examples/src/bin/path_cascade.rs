use bim_core::{CascadeSimulator, DiffusionModel, Graph};

fn main() {
    // Directed path 0 → 1 → ... → len with a common edge weight
    let len = 20;
    let w: f64 = 0.8;
    let graph = Graph::path(len, w);

    let n_trials = 100_000;

    println!("Cascades on a path of {} edges, weight {}", len, w);
    println!("Trials per estimate: {}", n_trials);
    println!();

    for model in [DiffusionModel::IndependentCascade, DiffusionModel::LinearThreshold] {
        let mut sim = CascadeSimulator::new(&graph, 42);

        for origin in [0, len / 2, len - 1] {
            let total: usize = (0..n_trials).map(|_| sim.run(model, &[origin], &[])).sum();
            let mean = total as f64 / n_trials as f64;

            // both models activate the next vertex with probability w
            let remaining = (len - origin) as i32;
            let exact = (0..=remaining).map(|d| w.powi(d)).sum::<f64>();

            println!(
                "{} from {:>2}: mean spread = {:.4}, exact = {:.4}",
                model, origin, mean, exact
            );
        }
        println!("  clock after all trials: {}", sim.clock());
    }

    // Marginal spread of the head once the middle vertex is already seeded
    let mut sim = CascadeSimulator::new(&graph, 7);
    let total: usize = (0..n_trials)
        .map(|_| sim.run(DiffusionModel::IndependentCascade, &[0], &[len / 2]))
        .sum();
    println!();
    println!("IC marginal of 0 given {{{}}}: {:.4}", len / 2, total as f64 / n_trials as f64);
}
