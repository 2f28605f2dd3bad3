use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use crossword_csp::consistency::{ac3, enforce_node_consistency};
use crossword_csp::domain::Domains;
use crossword_csp::{solve, Crossword, SolverOptions, Structure, WordList};

/// Every three-letter string over a small alphabet, so that a full 3x3 square has plenty of
/// candidates per slot.
fn synthetic_words() -> Vec<String> {
    let alphabet = ['A', 'B', 'C', 'D', 'E'];
    let mut words = vec![];
    for &a in &alphabet {
        for &b in &alphabet {
            for &c in &alphabet {
                words.push([a, b, c].iter().collect());
            }
        }
    }
    words
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let fixture = Crossword::new(
        Structure::from_template(include_str!("../data/structure0.txt")).unwrap(),
        WordList::from_string(include_str!("../data/words0.txt")).unwrap(),
    );
    let square = Crossword::new(
        Structure::from_template("___\n___\n___").unwrap(),
        WordList::new(synthetic_words()),
    );

    c.bench_function("solve_fixture", |b| {
        b.iter(|| solve(black_box(&fixture), SolverOptions::default()))
    });

    c.bench_function("solve_3x3_square", |b| {
        b.iter(|| solve(black_box(&square), SolverOptions::default()))
    });

    c.bench_function("solve_3x3_square_without_inference", |b| {
        b.iter(|| {
            solve(
                black_box(&square),
                SolverOptions { inference: false, ..SolverOptions::default() },
            )
        })
    });

    c.bench_function("ac3_3x3_square", |b| {
        b.iter(|| {
            let mut domains = Domains::new(&square);
            enforce_node_consistency(&square, &mut domains);
            ac3(&square, &mut domains, None)
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
