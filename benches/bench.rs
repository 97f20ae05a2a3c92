//! Criterion benchmarks for SpamSift.
//!
//! Covers the per-request path: analysis, TF-IDF transform and prediction
//! with each classifier.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use spamsift::analysis::{Analyzer, AnalyzerConfig};
use spamsift::artifact::{ArtifactSlot, ArtifactStore};
use spamsift::ml::{
    LogisticRegressionClassifier, ModelKind, NaiveBayesClassifier, TfIdfVectorizer,
};
use spamsift::service::ClassificationService;

const WORDS: [&str; 24] = [
    "free", "offer", "meeting", "lunch", "prize", "click", "report", "schedule", "cash",
    "winner", "project", "team", "invoice", "urgent", "account", "verify", "tomorrow", "noon",
    "thanks", "money", "claim", "update", "review", "agenda",
];

/// Generate test messages for benchmarking.
fn generate_messages(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            let len = 10 + (i % 40);
            (0..len)
                .map(|j| WORDS[(i * 7 + j * 13) % WORDS.len()]) // Pseudo-random distribution
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn build_service(messages: &[String]) -> (TfIdfVectorizer, ClassificationService) {
    let mut vectorizer = TfIdfVectorizer::new(AnalyzerConfig::default()).unwrap();
    vectorizer.fit(messages).unwrap();
    let n = vectorizer.vocabulary_size();

    let coef: Vec<f64> = (0..n).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
    let naive_bayes = NaiveBayesClassifier::new(
        vec![0, 1],
        vec![0.5_f64.ln(); 2],
        vec![
            coef.iter().map(|w| if *w > 0.0 { -3.0 } else { -1.0 }).collect(),
            coef.iter().map(|w| if *w > 0.0 { -1.0 } else { -3.0 }).collect(),
        ],
    )
    .unwrap();
    let logistic = LogisticRegressionClassifier::new(vec![0, 1], coef, 0.0).unwrap();

    let store = ArtifactStore::from_slots(
        ArtifactSlot::loaded(TfIdfVectorizer::from_state(vectorizer.to_state()).unwrap()),
        ArtifactSlot::loaded(naive_bayes),
        ArtifactSlot::loaded(logistic),
    );
    (vectorizer, ClassificationService::new(Arc::new(store)))
}

/// Benchmark text analysis and vectorization.
fn bench_vectorize(c: &mut Criterion) {
    let mut group = c.benchmark_group("vectorize");

    let messages = generate_messages(1000);
    let analyzer = AnalyzerConfig::default().build().unwrap();
    let (vectorizer, _) = build_service(&messages);

    group.bench_function("analyze_single_message", |b| {
        b.iter(|| black_box(analyzer.analyze(black_box(&messages[0])).unwrap().count()))
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("transform_batch", |b| {
        b.iter(|| {
            for message in messages.iter().take(100) {
                let _ = black_box(vectorizer.transform(black_box(message)));
            }
        })
    });

    group.finish();
}

/// Benchmark the full classify path for each model.
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    let messages = generate_messages(1000);
    let (_, service) = build_service(&messages);

    for kind in ModelKind::ALL {
        group.throughput(Throughput::Elements(100));
        group.bench_function(kind.tag(), |b| {
            b.iter(|| {
                for message in messages.iter().take(100) {
                    let _ = black_box(service.classify(black_box(message), Some(kind)));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_vectorize, bench_classify);
criterion_main!(benches);
