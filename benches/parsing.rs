use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use luatab::{output_from_str, schema_from_str};

fn synthetic_vali(params: usize) -> String {
    let mut vali = String::from("plant={");
    for i in 0..params {
        vali.push_str(&format!(
            "param{}={{type=\"Double\",default={}.5,range={{0,{}}}}},",
            i,
            i,
            params * 2
        ));
    }
    vali.push('}');
    vali
}

fn synthetic_descriptor(files: usize) -> String {
    let mut src = String::from("outputFiles={");
    for i in 0..files {
        src.push_str(&format!(
            "file{i}={{filename=\"file{i}.dat\",x={{time={{unit=\"s\",col=1}}}},y={{a{i}={{col=2,unit=\"K\"}},b{i}={{col=3,unit=\"K\"}}}}}},",
        ));
    }
    src.push('}');
    src
}

fn benchmark_parse_schema(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_schema");
    for size in [10, 100, 500].iter() {
        let vali = synthetic_vali(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &vali, |b, vali| {
            b.iter(|| schema_from_str(black_box(vali)))
        });
    }
    group.finish();
}

fn benchmark_parse_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_output");
    for size in [10, 100].iter() {
        let src = synthetic_descriptor(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &src, |b, src| {
            b.iter(|| output_from_str(black_box(src)))
        });
    }
    group.finish();
}

fn benchmark_validate(c: &mut Criterion) {
    let vali = synthetic_vali(200);
    let doc = schema_from_str(&vali).unwrap();
    let values: Vec<String> = std::iter::once(String::new())
        .chain((0..200).map(|i| format!("{}.5", i)))
        .collect();
    let refs: Vec<&str> = values.iter().map(|s| s.as_str()).collect();

    c.bench_function("validate_200_params", |b| {
        b.iter(|| doc.validate_values(black_box(&refs)))
    });
}

fn benchmark_write(c: &mut Criterion) {
    let vali = synthetic_vali(200);
    let doc = schema_from_str(&vali).unwrap();
    let values: Vec<String> = std::iter::once(String::new())
        .chain((0..200).map(|i| format!("{}.5", i)))
        .collect();
    let refs: Vec<&str> = values.iter().map(|s| s.as_str()).collect();

    c.bench_function("write_200_params", |b| {
        b.iter(|| doc.write_values(black_box(&refs)))
    });
}

criterion_group!(
    benches,
    benchmark_parse_schema,
    benchmark_parse_output,
    benchmark_validate,
    benchmark_write
);
criterion_main!(benches);
