use criterion::{Criterion, criterion_group, criterion_main};
use las_writer::{
    Options, PointBuffer, Writer,
    table::{DataType, Layout, dimension},
};
use std::{hint::black_box, io::Cursor};

fn buffer(npoints: usize) -> PointBuffer {
    let mut layout = Layout::xyz();
    let _ = layout.add(dimension::INTENSITY, DataType::Unsigned16);
    let _ = layout.add(dimension::RETURN_NUMBER, DataType::Unsigned8);
    let _ = layout.add(dimension::NUMBER_OF_RETURNS, DataType::Unsigned8);
    let _ = layout.add(dimension::GPS_TIME, DataType::Double);
    let mut buffer = PointBuffer::new(layout);
    for i in 0..npoints {
        let i = i as f64;
        buffer
            .push(&[i, 2. * i, i / 10., i % 1000., 1., 1., i / 100.])
            .unwrap();
    }
    buffer
}

fn write(options: &Options, buffer: &PointBuffer) -> Vec<u8> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    writer.write_all_from(options, buffer, buffer).unwrap();
    writer.into_inner().unwrap().into_inner()
}

fn write_benchmark(c: &mut Criterion) {
    let options = Options::default();
    for npoints in [0, 1, 100, 10_000] {
        let buffer = buffer(npoints);
        c.bench_function(&format!("write_{}", npoints), |b| {
            b.iter(|| write(black_box(&options), black_box(&buffer)))
        });
    }
}

#[cfg(feature = "laz")]
fn write_compressed_benchmark(c: &mut Criterion) {
    let options = Options {
        compression: true,
        ..Default::default()
    };
    let buffer = buffer(10_000);
    c.bench_function("write_compressed_10000", |b| {
        b.iter(|| write(black_box(&options), black_box(&buffer)))
    });
}

#[cfg(not(feature = "laz"))]
fn write_compressed_benchmark(_: &mut Criterion) {}

criterion_group!(benches, write_benchmark, write_compressed_benchmark);
criterion_main!(benches);
