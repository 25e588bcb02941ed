use bim_core::{CascadeSimulator, DiffusionModel, Graph, TrialRng};
use std::collections::HashSet;

/// Two directed paths: 0 -> 1 -> 2 -> 3 and 4 -> 5, all weights 1.
fn two_paths() -> Graph {
    let mut g = Graph::new(6);
    g.add_edge(0, 1, 1.0);
    g.add_edge(1, 2, 1.0);
    g.add_edge(2, 3, 1.0);
    g.add_edge(4, 5, 1.0);
    g
}

const MODELS: [DiffusionModel; 2] = [
    DiffusionModel::IndependentCascade,
    DiffusionModel::LinearThreshold,
];

#[test]
fn simple_paths() {
    let g = two_paths();
    let mut sim = CascadeSimulator::new(&g, 0);

    for model in MODELS {
        assert_eq!(sim.run(model, &[0], &[]), 4, "{model}");
        assert_eq!(sim.run(model, &[1], &[]), 3, "{model}");
        assert_eq!(sim.run(model, &[3], &[]), 1, "{model}");
        assert_eq!(sim.run(model, &[4], &[]), 2, "{model}");
        assert_eq!(sim.run(model, &[5], &[]), 1, "{model}");
        assert_eq!(sim.run(model, &[0, 4], &[]), 6, "{model}");
        assert_eq!(sim.run(model, &[1, 5], &[]), 4, "{model}");
    }
}

#[test]
fn prepared_set_is_excluded() {
    let g = two_paths();
    let mut sim = CascadeSimulator::new(&g, 0);

    for model in MODELS {
        assert_eq!(sim.run(model, &[0], &[4]), 4, "{model}");
        assert_eq!(sim.run(model, &[0], &[1]), 1, "{model}");
        assert_eq!(sim.run(model, &[0], &[2]), 2, "{model}");
        assert_eq!(sim.run(model, &[4], &[4]), 0, "{model}");
    }
}

#[test]
fn joined_paths() {
    let mut g = two_paths();
    g.add_edge(5, 2, 1.0);
    let mut sim = CascadeSimulator::new(&g, 0);

    for model in MODELS {
        assert_eq!(sim.run(model, &[0], &[]), 4, "{model}");
        assert_eq!(sim.run(model, &[4], &[]), 4, "{model}");
        assert_eq!(sim.run(model, &[0, 4], &[]), 6, "{model}");
        assert_eq!(sim.run(model, &[0, 4, 1], &[]), 6, "{model}");
    }
}

#[test]
fn long_path_reaches_every_vertex() {
    let len = 50;
    let g = Graph::path(len, 1.0);
    let mut sim = CascadeSimulator::new(&g, 9);

    for model in MODELS {
        // state from earlier trials must not leak into later ones
        for _ in 0..3 {
            assert_eq!(sim.run(model, &[0], &[]), len + 1);
        }
    }
}

fn reachable(g: &Graph, from: &[usize]) -> HashSet<usize> {
    let mut seen: HashSet<usize> = from.iter().copied().collect();
    let mut stack: Vec<usize> = from.to_vec();
    while let Some(u) = stack.pop() {
        for e in g.neighbors(u) {
            if seen.insert(e.to) {
                stack.push(e.to);
            }
        }
    }
    seen
}

#[test]
fn marginal_matches_reachability() {
    // Random graph with certain edges: cascades equal reachability.
    let n = 40;
    let mut rng = TrialRng::new(2024);
    let mut g = Graph::new(n);
    for u in 0..n {
        for v in 0..n {
            if u != v && rng.uniform() < 0.04 {
                g.add_edge(u, v, 1.0);
            }
        }
    }

    let mut sim = CascadeSimulator::new(&g, 1);
    for origin in 0..n {
        let prepare = [(origin * 7 + 3) % n, (origin * 11 + 5) % n];
        let covered = reachable(&g, &prepare);
        let expected = reachable(&g, &[origin]).difference(&covered).count();

        for model in MODELS {
            assert_eq!(sim.run(model, &[origin], &prepare), expected, "origin {origin} {model}");
        }
    }
}
