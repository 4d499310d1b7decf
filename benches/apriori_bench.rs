use apriors::rules::candidate_rules;
use apriors::{apriori, encode_one_hot, TransactionContext};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array2;
use rand::Rng;

/// Generate a synthetic one-hot transaction table
///
/// Parameters:
/// - num_transactions: Number of transactions
/// - num_items: Total number of possible items
/// - avg_transaction_size: Average items per transaction
/// - density: How dense the data is (0.0-1.0)
fn generate_transactions(
    num_transactions: usize,
    num_items: usize,
    avg_transaction_size: usize,
    density: f64,
) -> TransactionContext<usize> {
    let mut rng = rand::thread_rng();
    let mut data = vec![0i32; num_transactions * num_items];

    for tx_idx in 0..num_transactions {
        let random_factor: f64 = rng.gen();
        let num_items_in_tx = (avg_transaction_size as f64 * (0.5 + random_factor)).round() as usize;
        let num_items_in_tx = num_items_in_tx.min(num_items);

        for _ in 0..num_items_in_tx {
            let density_check: f64 = rng.gen();
            if density_check < density {
                let item = rng.gen_range(0..num_items);
                data[tx_idx * num_items + item] = 1;
            }
        }
    }

    let matrix = Array2::from_shape_vec((num_transactions, num_items), data).unwrap();
    let labels: Vec<usize> = (0..num_items).collect();
    encode_one_hot(&labels, matrix.view()).unwrap()
}

/// Benchmark Apriori with different dataset sizes
fn bench_apriori_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("apriori_scaling");

    let configs = vec![
        ("small_100tx", 100, 20, 5),
        ("medium_500tx", 500, 50, 10),
        ("large_1000tx", 1000, 100, 15),
        ("xlarge_5000tx", 5000, 100, 20),
    ];

    for (name, num_tx, num_items, avg_size) in configs {
        let ctx = generate_transactions(num_tx, num_items, avg_size, 0.7);

        group.bench_with_input(BenchmarkId::from_parameter(name), &ctx, |b, ctx| {
            b.iter(|| apriori(black_box(ctx.matrix()), black_box(0.1), None));
        });
    }

    group.finish();
}

/// Benchmark Apriori with different min_support thresholds
fn bench_apriori_min_support(c: &mut Criterion) {
    let mut group = c.benchmark_group("apriori_min_support");

    let ctx = generate_transactions(1000, 50, 10, 0.7);

    for min_sup in [0.05, 0.1, 0.2, 0.3, 0.5] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:.2}", min_sup)),
            &min_sup,
            |b, &sup| {
                b.iter(|| apriori(black_box(ctx.matrix()), black_box(sup), None));
            },
        );
    }

    group.finish();
}

/// Benchmark rule enumeration and scoring on already mined itemsets
fn bench_rule_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_generation");

    let densities = vec![("sparse_30", 0.3), ("medium_50", 0.5), ("dense_70", 0.7)];

    for (name, density) in densities {
        let ctx = generate_transactions(1000, 30, 10, density);
        let itemsets = apriori(ctx.matrix(), 0.05, None).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(name), &itemsets, |b, itemsets| {
            b.iter(|| candidate_rules(black_box(itemsets)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_apriori_scaling,
    bench_apriori_min_support,
    bench_rule_generation
);
criterion_main!(benches);
