use bim_core::{DiffusionModel, Graph};
use bim_greedy::{select, SelectionParams, Strategy};

fn main() {
    // Two stars of different sizes joined by a weak bridge
    let mut graph = Graph::new(14);
    for leaf in 1..8 {
        graph.add_edge(0, leaf, 0.4);
    }
    for leaf in 9..14 {
        graph.add_edge(8, leaf, 0.4);
    }
    graph.add_edge(7, 8, 0.1);

    let params = SelectionParams::new(DiffusionModel::IndependentCascade, 3, 0.1, 0.05);

    println!(
        "Seed selection on two stars ({} vertices, {} edges)",
        graph.num_vertices(),
        graph.num_edges()
    );
    println!("k={}, eps={}, delta={}", params.k, params.eps, params.delta);
    println!();

    for strategy in Strategy::ALL {
        match select(&graph, strategy, &params, 1) {
            Ok(selection) => {
                println!(
                    "{:>10}: seeds {:?}, {} samples",
                    strategy.name(),
                    selection.seeds,
                    selection.samples
                );
                for (v, used) in selection.steps() {
                    println!("{:>12} -> cumulative samples {}", v, used);
                }
            }
            Err(err) => println!("{:>10}: {}", strategy.name(), err),
        }
    }
}
