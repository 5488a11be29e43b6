//! Benchmarks for select box configuration and rendering.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use formkit_controls::SelectBox;
use formkit_core::OptionSet;

fn grouped_options(groups: usize, per_group: usize) -> OptionSet {
    let mut set = OptionSet::new();
    for g in 0..groups {
        set.insert_group(
            format!("Group {g}"),
            (0..per_group).map(|i| (format!("k{g}_{i}"), format!("Label {g}/{i}"))),
        );
    }
    set
}

fn bench_set_options(c: &mut Criterion) {
    let options = grouped_options(20, 50);

    c.bench_function("select_set_options_1000", |b| {
        b.iter(|| {
            let mut select = SelectBox::new("s");
            select.set_options(black_box(options.clone()), true);
            select
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let mut select = SelectBox::new("s");
    select.set_options(grouped_options(20, 50), true);
    select.set_prompt("Choose");

    c.bench_function("select_render_1000", |b| {
        b.iter(|| black_box(&select).render().to_string())
    });
}

criterion_group!(benches, bench_set_options, bench_render);
criterion_main!(benches);
