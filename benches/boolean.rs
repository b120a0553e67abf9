use criterion::{criterion_group, criterion_main, Criterion};

use csg2d::{Part, Point, Vector};

pub fn criterion_benchmark(c: &mut Criterion) {
  let small = Part::circle(10.0, 12);
  let big = Part::circle(10.0, 100);

  c.bench_function("union(circle-12)", |b| {
    let other = &small + Vector::from_units(5.0, 0.0);
    b.iter(|| &small + &other)
  });
  c.bench_function("union(circle-100)", |b| {
    let other = &big + Vector::from_units(5.0, 0.0);
    b.iter(|| &big + &other)
  });
  c.bench_function("difference(circle-100)", |b| {
    let inner = Part::circle(4.0, 100);
    b.iter(|| &big - &inner)
  });
  c.bench_function("offset(plus)", |b| {
    let plus = &Part::rect(10.0, 2.0) + &Part::rect(2.0, 10.0);
    b.iter(|| plus.offset(1.0))
  });
  c.bench_function("hull(circle-100)", |b| {
    let shifted = big.rotate(3.0, &Point::origin());
    let both = Part::new(
      big
        .segments()
        .iter()
        .chain(shifted.segments().iter())
        .cloned()
        .collect(),
    );
    b.iter(|| both.hull())
  });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
