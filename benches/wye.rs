criterion::criterion_main!(merge::merge_benches, yip::yip_benches);

mod merge {
    use criterion::async_executor::FuturesExecutor;
    use criterion::{black_box, criterion_group, Criterion};
    use futures_lite::prelude::*;
    use futures_lite::stream;
    use futures_wye::prelude::*;
    use futures_wye::wye;

    criterion_group!(merge_benches, merge_bench);

    fn merge_bench(c: &mut Criterion) {
        c.bench_function("wye::merge 10", |b| {
            b.to_async(FuturesExecutor).iter(|| merge_run(black_box(10)))
        });
        c.bench_function("wye::merge 100", |b| {
            b.to_async(FuturesExecutor).iter(|| merge_run(black_box(100)))
        });
        c.bench_function("wye::merge 1000", |b| {
            b.to_async(FuturesExecutor).iter(|| merge_run(black_box(1000)))
        });
    }

    async fn merge_run(max: u32) {
        let a = stream::iter(0..max);
        let b = stream::iter(max..max * 2);
        let mut s = a.wye(b, wye::merge());

        let mut counter = 0;
        while s.next().await.is_some() {
            counter += 1;
        }
        assert_eq!(counter, max * 2);
    }
}

mod yip {
    use criterion::async_executor::FuturesExecutor;
    use criterion::{black_box, criterion_group, Criterion};
    use futures_lite::prelude::*;
    use futures_lite::stream;
    use futures_wye::prelude::*;
    use futures_wye::wye;

    criterion_group!(yip_benches, yip_bench);

    fn yip_bench(c: &mut Criterion) {
        c.bench_function("wye::yip_with 1000", |b| {
            b.to_async(FuturesExecutor).iter(|| yip_run(black_box(1000)))
        });
    }

    async fn yip_run(max: u32) {
        let a = stream::iter(0..max);
        let b = stream::iter(0..max);
        let mut s = a.wye(b, wye::yip_with(|a, b| a + b));

        let mut counter = 0;
        while s.next().await.is_some() {
            counter += 1;
        }
        assert_eq!(counter, max);
    }
}
