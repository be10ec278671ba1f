use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ink_core::config::{DitherConfig, DitherMode};
use ink_core::frame::FrameBuffer;
use ink_dither::{AsciiProjector, DitherEngine};

fn gradient(width: u32, height: u32) -> FrameBuffer {
    let mut frame = FrameBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let v = ((x + y) * 255 / (width + height)) as u8;
            frame.set_pixel(x, y, [v, v, v, 255]);
        }
    }
    frame
}

fn bench_engine(c: &mut Criterion) {
    let source = gradient(1920, 1080);
    let mut engine = DitherEngine::seeded(7);

    for mode in [
        DitherMode::OrderedMatrix,
        DitherMode::Stochastic,
        DitherMode::LuminanceThreshold,
    ] {
        let config = DitherConfig {
            mode,
            ..DitherConfig::default()
        };
        c.bench_function(&format!("dither_1080p_{mode}"), |b| {
            b.iter(|| engine.render(black_box(&source), black_box(&config)));
        });
    }

    let dithered = engine.render(&source, &DitherConfig::default());
    let projector = AsciiProjector::default();
    c.bench_function("ascii_project_1080p", |b| {
        b.iter(|| projector.project(black_box(&dithered)));
    });
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
