// Benchmarks for the P-256 verification kernel

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use p256verify::{dispatch, verify, FieldElement, Point, Scalar, P256_FIELD_ELEMENT_SIZE};
use rand::{rngs::OsRng, RngCore};

/// Generate a random field element for benchmarking
fn random_field_element() -> FieldElement {
    let mut bytes = [0u8; P256_FIELD_ELEMENT_SIZE];
    loop {
        OsRng.fill_bytes(&mut bytes);
        if let Ok(fe) = FieldElement::from_bytes(&bytes) {
            return fe;
        }
    }
}

/// Generate a random non-zero scalar for benchmarking
fn random_scalar() -> Scalar {
    let mut bytes = [0u8; 32];
    loop {
        OsRng.fill_bytes(&mut bytes);
        if let Ok(scalar) = Scalar::new(&bytes) {
            return scalar;
        }
    }
}

fn fixture() -> ([u8; 32], [u8; 32], [u8; 32], [u8; 32], [u8; 32]) {
    let h32 = |s: &str| {
        let v = hex::decode(s).unwrap();
        let mut out = [0u8; 32];
        out.copy_from_slice(&v);
        out
    };
    (
        h32("bb5a52f42f9c9261ed4361f59422a1e30036e7c32b270c8807a419feca605023"),
        h32("2ba3a8be6b94d5ec80a6d9d1190a436effe50d85a1eee859b8cc6af9bd5c2e18"),
        h32("4cd60b855d442f5b3c7b11eb6c4e0ae7525fe710fab9aa7c77a67f79e6fadd76"),
        h32("2927b10512bae3eddcfe467828128bad2903269919f7086069c8c4df6c732838"),
        h32("c7787964eaac00e5921fb1498a60f4606766b3d9685001558d1a974e7341513e"),
    )
}

fn bench_field_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("p256-field");

    group.bench_function("multiplication", |b| {
        b.iter_batched(
            || (random_field_element(), random_field_element()),
            |(x, y)| black_box(x.mul(&y)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("squaring", |b| {
        b.iter_batched(
            random_field_element,
            |x| black_box(x.square()),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("inversion", |b| {
        b.iter_batched(
            random_field_element,
            |x| black_box(x.invert()),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_scalar_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("p256-scalar");
    group.sample_size(20);

    group.bench_function("multiplication", |b| {
        b.iter_batched(
            || (random_scalar(), random_scalar()),
            |(x, y)| black_box(x.mul_mod_n(&y)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("inversion", |b| {
        b.iter_batched(
            random_scalar,
            |x| black_box(x.invert()),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_point_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("p256-point");

    let g = Point::generator();
    let two_g = g.add(&g);

    group.bench_function("affine-addition", |b| {
        b.iter(|| black_box(g.add(&two_g)))
    });

    group.finish();
}

fn bench_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("p256-verify");
    group.sample_size(20);

    let (digest, r, s, qx, qy) = fixture();
    group.bench_function("verify", |b| {
        b.iter(|| black_box(verify(&digest, &r, &s, &qx, &qy)))
    });

    let mut request = Vec::new();
    for word in [&digest, &r, &s, &qx, &qy] {
        request.extend_from_slice(word);
    }
    group.bench_function("verify-request", |b| {
        b.iter(|| black_box(dispatch::verify_request(&request)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_field_operations,
    bench_scalar_operations,
    bench_point_operations,
    bench_verification
);
criterion_main!(benches);
