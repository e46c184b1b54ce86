#![allow(
    clippy::tests_outside_test_module,
    clippy::unwrap_used,
    reason = "benchmark"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use mustype::{Template, TemplateParams, gen_type};

mod utils;

const SOURCE: &str = include_str!("template_mustype.tmpl");

fn mustype_benchmark(c: &mut Criterion) {
    let template = utils::mustype_template();
    let orders: Vec<TemplateParams> = utils::generate_orders(100)
        .into_iter()
        .map(utils::params)
        .collect();

    utils::print_binary_size();

    let mut group = c.benchmark_group("mustype");
    group.sample_size(50);

    group.bench_function("parse", |b| {
        b.iter(|| Template::parse(black_box(SOURCE)).unwrap());
    });

    group.bench_function("render", |b| {
        b.iter(|| black_box(utils::render_all(&template, &orders)));
    });

    group.bench_function("gen_type", |b| {
        b.iter(|| gen_type(black_box(&template)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, mustype_benchmark);
criterion_main!(benches);
