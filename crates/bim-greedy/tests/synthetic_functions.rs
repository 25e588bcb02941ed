use bim_greedy::{greedy_lazy_forward, greedy_submodular, SetFunction};
use std::collections::BTreeSet;

fn as_set(v: &[usize]) -> BTreeSet<usize> {
    v.iter().copied().collect()
}

/// Sum of 1 / |x - 7.3|: modular, so the greedy picks the elements nearest 7.3.
fn inverse_distance(set: &[usize]) -> f64 {
    set.iter().map(|&x| 1.0 / (x as f64 - 7.3).abs()).sum()
}

/// Sorted elements weighted by 1 / (|S| - i): larger elements pay more when
/// the set is small.
fn halved(set: &[usize]) -> f64 {
    let mut s = set.to_vec();
    s.sort_unstable();
    let len = s.len();
    s.iter().enumerate().map(|(i, &x)| x as f64 / (len - i) as f64).sum()
}

/// Counts calls so the two strategies can be compared on cost.
struct Counted<F> {
    f: F,
    calls: usize,
    checkpoints: Vec<usize>,
}

impl<F: FnMut(&[usize]) -> f64> SetFunction for Counted<F> {
    fn value(&mut self, set: &[usize]) -> f64 {
        self.calls += 1;
        (self.f)(set)
    }

    fn checkpoint(&mut self) {
        self.checkpoints.push(self.calls);
    }
}

fn counted<F: FnMut(&[usize]) -> f64>(f: F) -> Counted<F> {
    Counted { f, calls: 0, checkpoints: Vec::new() }
}

#[test]
fn nearest_elements() {
    let mut f = |s: &[usize]| inverse_distance(s);
    let greedy = greedy_submodular(&mut f, 11, 3);
    assert_eq!(as_set(&greedy), BTreeSet::from([6, 7, 8]));

    let lazy = greedy_lazy_forward(&mut f, 11, 3);
    assert_eq!(as_set(&lazy), BTreeSet::from([6, 7, 8]));
}

#[test]
fn largest_elements() {
    let mut f = |s: &[usize]| halved(s);
    let greedy = greedy_submodular(&mut f, 10, 4);
    assert_eq!(as_set(&greedy), BTreeSet::from([6, 7, 8, 9]));

    let lazy = greedy_lazy_forward(&mut f, 10, 4);
    assert_eq!(as_set(&lazy), BTreeSet::from([6, 7, 8, 9]));
}

#[test]
fn lazy_forward_saves_evaluations() {
    let mut plain = counted(|s: &[usize]| inverse_distance(s));
    greedy_submodular(&mut plain, 11, 3);

    let mut lazy = counted(|s: &[usize]| inverse_distance(s));
    greedy_lazy_forward(&mut lazy, 11, 3);

    // 11 + 10 + 9 evaluations of f(S ∪ {x})
    assert_eq!(plain.calls, 30);
    assert_eq!(plain.checkpoints, vec![11, 21, 30]);
    assert_eq!(lazy.checkpoints.len(), 3);
    assert!(lazy.calls < plain.calls, "lazy {} vs plain {}", lazy.calls, plain.calls);
}

#[test]
fn coverage_function() {
    // Each element covers a set of items; value = number of covered items.
    let covers: Vec<Vec<u32>> = vec![
        vec![0, 1, 2, 3],
        vec![0, 1],
        vec![4, 5, 6],
        vec![2, 3, 7],
        vec![7],
        vec![8, 9],
    ];
    let mut f = |s: &[usize]| {
        let items: BTreeSet<u32> = s.iter().flat_map(|&x| covers[x].iter().copied()).collect();
        items.len() as f64
    };

    let greedy = greedy_submodular(&mut f, covers.len(), 3);
    let lazy = greedy_lazy_forward(&mut f, covers.len(), 3);
    assert_eq!(greedy, vec![0, 2, 5]);
    assert_eq!(as_set(&greedy), as_set(&lazy));
}
