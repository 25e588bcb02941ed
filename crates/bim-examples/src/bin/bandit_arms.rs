use bim_bandit::{BestArm, Decision, GaussianArms, LilConfidence, StoppingPolicy};

fn main() {
    let n = 8;
    let sigma = 0.25;
    let eps = 0.01;
    let lil = LilConfidence::new(0.01, 0.001, 2.0 * sigma).expect("valid confidence parameters");

    println!("Best-arm identification over {} Gaussian arms, σ={}", n, sigma);
    println!("LIL bound: κ={}, δ={}, σ={}", lil.kappa(), lil.delta(), lil.sigma());
    println!();

    for policy in [StoppingPolicy::Lazy, StoppingPolicy::Eager { alpha: 3.0 }] {
        let mut correct = 0;
        let mut total_pulls = 0;
        let mut decisions = Vec::new();
        let n_runs = 20;

        for seed in 0..n_runs {
            let arms = GaussianArms::evenly_spaced(n, sigma, seed);
            let best = arms.best();
            let mut bai = BestArm::new(n, policy, 1.0, eps, lil, arms).expect("at least one arm");

            if bai.best_arm() == best {
                correct += 1;
            }
            total_pulls += bai.n_pulls();
            decisions.push(bai.last_decision());
        }

        let by_share = decisions.iter().filter(|d| **d == Some(Decision::PullShare)).count();
        let by_separation = decisions.iter().filter(|d| **d == Some(Decision::Separated)).count();

        println!("{:?}:", policy);
        println!("  correct: {}/{}", correct, n_runs);
        println!("  mean pulls: {:.0}", total_pulls as f64 / n_runs as f64);
        println!("  stopped by pull share: {}, by separation: {}", by_share, by_separation);
    }
}
