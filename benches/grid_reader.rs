use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use probegrid::container::{ContainerConfig, ContainerWriter, TranslationRequest};
use probegrid::grid::{GridReader, GridShape};
use tempfile::TempDir;

/// Tab-delimited data block with a trailing delimiter on every row
fn generate_data_block(num_positions: usize, spectral_length: usize) -> String {
    let mut text = String::with_capacity(num_positions * spectral_length * 10);
    for position in 0..num_positions {
        for point in 0..spectral_length {
            text.push_str(&format!("{:.6e}\t", (position * spectral_length + point) as f32 * 1e-3));
        }
        text.push('\n');
    }
    text
}

fn bench_grid_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_reader");

    for (side, points) in [(32, 128), (64, 256), (128, 512)] {
        let shape = GridShape::new(side, side, points).unwrap();
        let data = generate_data_block(shape.num_positions(), points);
        let reader = GridReader::new(shape);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("read", format!("{}x{}x{}", side, side, points)),
            &data,
            |b, data| b.iter(|| reader.read(data, 403).unwrap()),
        );
    }

    group.finish();
}

fn bench_container_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("container_write");
    group.sample_size(20);

    let shape = GridShape::new(64, 64, 256).unwrap();
    let grid = GridReader::new(shape)
        .read(&generate_data_block(shape.num_positions(), shape.spectral_length), 0)
        .unwrap();
    let bias: Vec<f64> = (0..shape.spectral_length)
        .map(|i| -1.0 + 2.0 * i as f64 / (shape.spectral_length - 1) as f64)
        .collect();

    for (name, config) in [
        ("default", ContainerConfig::default()),
        ("fast", ContainerConfig::fast_write()),
        ("max_compression", ContainerConfig::max_compression()),
    ] {
        let writer = ContainerWriter::new(config.with_overwrite(true));
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bench.pgrid");

        group.throughput(Throughput::Elements(shape.num_positions() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let request = TranslationRequest::builder(grid.clone(), shape.num_rows, shape.num_cols)
                    .spectroscopic("Bias", "V", bias.clone())
                    .scan_size(200.0, 200.0, "nm")
                    .build()
                    .unwrap();
                writer.write(&path, request).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_grid_reader, bench_container_write);
criterion_main!(benches);
