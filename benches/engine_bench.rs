// SPDX-License-Identifier: PMPL-1.0-or-later
//! Benchmarks for the rule engine

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use uiscanbot::{Config, Rect, UiNode};

/// A list screen: `rows` clickable rows, each with an icon and two labels
fn list_screen(rows: i32) -> UiNode {
    let items = (0..rows).map(|i| {
        let top = i * 160;
        UiNode::new(format!("row{}", i), Rect::new(0, top, 1080, top + 160), "LinearLayout")
            .clickable()
            .with_child(UiNode::new(format!("icon{}", i), Rect::new(24, top + 40, 104, top + 120), "ImageView"))
            .with_child(
                UiNode::new(format!("title{}", i), Rect::new(128, top + 24, 900, top + 80), "TextView")
                    .with_text(format!("Item {}", i))
                    .with_extra("textColor", "#212121")
                    .with_extra("backgroundColor", "#ffffff"),
            )
            .with_child(
                UiNode::new(format!("more{}", i), Rect::new(960, top + 40, 1040, top + 120), "ImageButton")
                    .clickable(),
            )
    });
    UiNode::new("root", Rect::new(0, 0, 1080, rows * 160), "RecyclerView").with_children(items)
}

fn bench_sequential(c: &mut Criterion) {
    let mut config = Config::default();
    config.rules.touch_target.density = 2.625;
    let engine = config.build_engine().unwrap();
    let root = list_screen(500);

    c.bench_function("analyze_sequential_500_rows", |b| {
        b.iter(|| engine.analyze(black_box(&root)))
    });
}

fn bench_parallel(c: &mut Criterion) {
    let mut config = Config::default();
    config.rules.touch_target.density = 2.625;
    config.engine.parallel = true;
    let engine = config.build_engine().unwrap();
    let root = list_screen(500);

    c.bench_function("analyze_parallel_500_rows", |b| {
        b.iter(|| engine.analyze(black_box(&root)))
    });
}

criterion_group!(benches, bench_sequential, bench_parallel);
criterion_main!(benches);
