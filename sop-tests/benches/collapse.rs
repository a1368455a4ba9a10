use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pprof::criterion::{Output, PProfProfiler};
use sop::{CPolyFn, Show, I, K};
use sop_tests::token::Token;

struct Describe;

impl CPolyFn<Show, I, K<String>> for Describe {
    #[inline(always)]
    fn call<S>(&mut self, show: fn(&S) -> String, value: S) -> String {
        show(&value)
    }
}

fn describe_by_hand(token: Token) -> Vec<String> {
    match token {
        Token::Literal(n) => vec![format!("{n:?}")],
        Token::Ident(name) => vec![format!("{name:?}")],
        Token::Pair(c, b) => vec![format!("{c:?}"), format!("{b:?}")],
        Token::Eof => vec![],
    }
}

fn tokens(len: usize) -> Vec<Token> {
    (0..len)
        .map(|i| match i % 4 {
            0 => Token::Literal(i as i64),
            1 => Token::Ident(format!("id_{i}")),
            2 => Token::Pair('p', i % 3 == 0),
            _ => Token::Eof,
        })
        .collect()
}

fn bench_collapse(criterion: &mut Criterion) {
    let test_cases = vec![tokens(1024), tokens(64 * 1024)];

    let mut group = criterion.benchmark_group("describe_fields");

    for input in test_cases.into_iter() {
        group.bench_with_input(
            BenchmarkId::new("match", input.len()),
            &input,
            |b, input| {
                b.iter(|| {
                    input
                        .iter()
                        .cloned()
                        .map(describe_by_hand)
                        .map(|fields| fields.len())
                        .sum::<usize>()
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("sop collapse", input.len()),
            &input,
            |b, input| {
                b.iter(|| {
                    input
                        .iter()
                        .cloned()
                        .map(|token| {
                            token
                                .into_sop()
                                .cmap::<Show, K<String>>(Describe)
                                .collapse()
                        })
                        .map(|fields| fields.len())
                        .sum::<usize>()
                })
            },
        );
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_profiler(
            PProfProfiler::new(100, Output::Flamegraph(None))
        );
    targets = bench_collapse
}
criterion_main!(benches);
