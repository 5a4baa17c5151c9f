//! Benchmark suite for stalepom
//!
//! Run with: `cargo bench --bench benchmarks`
//! View report: `open target/criterion/report/index.html`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use stalepom::cache::{MemoryCache, ReadCache, WriteCache};
use stalepom::oracle::StaticOracle;
use stalepom::parsers::Parser;
use stalepom::parsers::xml::XmlParser;
use stalepom::registries::VersionInfo;
use stalepom::registries::version_utils::{is_prerelease_maven, sort_newest_first};
use stalepom::validate;

// =============================================================================
// Test Data Generation
// =============================================================================

fn generate_pom_xml(dep_count: usize) -> String {
    let mut content = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <modelVersion>4.0.0</modelVersion>
  <groupId>com.example</groupId>
  <artifactId>bench</artifactId>
  <version>1.0.0</version>
  <dependencies>
"#,
    );

    for i in 0..dep_count {
        content.push_str(&format!(
            r#"    <dependency>
      <groupId>org.example.group{g}</groupId>
      <artifactId>artifact-{i}</artifactId>
      <version>1.{i}.0</version>
      <!-- dependency {i} -->
      <exclusions>
        <exclusion>
          <groupId>org.excluded</groupId>
          <artifactId>excluded-{i}</artifactId>
        </exclusion>
      </exclusions>
    </dependency>
"#,
            g = i % 7,
        ));
    }

    content.push_str("  </dependencies>\n</project>\n");
    content
}

fn generate_oracle(dep_count: usize) -> StaticOracle {
    let mut oracle = StaticOracle::new();
    for i in 0..dep_count {
        // Every other artifact is outdated
        let latest = if i % 2 == 0 {
            format!("1.{i}.0")
        } else {
            format!("2.{i}.0")
        };
        oracle.insert(format!("org.example.group{}", i % 7), format!("artifact-{i}"), latest);
    }
    oracle
}

fn create_version_info() -> VersionInfo {
    VersionInfo {
        latest: Some("33.0.0-jre".to_string()),
        latest_prerelease: Some("34.0.0-rc1".to_string()),
        versions: (0..50).map(|i| format!("1.{i}.0")).collect(),
    }
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");
    let parser = XmlParser::new();

    for dep_count in [10, 100, 1000] {
        let content = generate_pom_xml(dep_count);
        group.bench_with_input(
            BenchmarkId::new("pom_xml", dep_count),
            &content,
            |b, content| {
                b.iter(|| parser.parse("pom.xml", black_box(content)));
            },
        );
    }

    group.finish();
}

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let parser = XmlParser::new();

    for dep_count in [10, 100, 1000] {
        let document = match parser.parse("pom.xml", &generate_pom_xml(dep_count)) {
            Ok(document) => document,
            Err(e) => panic!("generated pom failed to parse: {e}"),
        };
        let oracle = generate_oracle(dep_count);

        group.bench_with_input(
            BenchmarkId::new("static_oracle", dep_count),
            &document,
            |b, document| {
                b.iter(|| black_box(validate(black_box(document), &oracle)));
            },
        );
    }

    group.finish();
}

fn bench_memory_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache/memory");

    for entry_count in [100, 1000, 10000] {
        let cache = MemoryCache::new();

        for i in 0..entry_count {
            cache.insert(format!("maven:org.example:artifact-{i}"), create_version_info());
        }

        group.bench_with_input(
            BenchmarkId::new("get_hit", entry_count),
            &cache,
            |b, cache| {
                b.iter(|| black_box(cache.get("maven:org.example:artifact-50")));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("get_miss", entry_count),
            &cache,
            |b, cache| {
                b.iter(|| black_box(cache.get("maven:org.example:missing")));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("insert", entry_count),
            &cache,
            |b, cache| {
                let mut i = entry_count;
                b.iter(|| {
                    cache.insert(format!("maven:org.example:new-{i}"), create_version_info());
                    i += 1;
                });
            },
        );
    }

    group.finish();
}

fn bench_version_utils(c: &mut Criterion) {
    let mut group = c.benchmark_group("version_utils");

    let versions = [
        "1.0.0",
        "2.0.0-alpha-1",
        "3.0.0-beta",
        "4.0.0-RC1",
        "5.0.0.Final",
        "6.0.0-SNAPSHOT",
        "7.0.0-M3",
        "33.0.0-jre",
        "2.0.0.CR2",
        "1.0-preview",
    ];

    group.bench_function("is_prerelease_maven", |b| {
        b.iter(|| {
            for v in &versions {
                black_box(is_prerelease_maven(v));
            }
        });
    });

    let semver_list: Vec<String> = (0..200).map(|i| format!("{}.{}.0", i / 10, i % 10)).collect();
    group.bench_function("sort_newest_first_semver", |b| {
        b.iter(|| {
            let mut list = semver_list.clone();
            sort_newest_first(&mut list);
            black_box(list);
        });
    });

    let maven_list: Vec<String> = (0..200).map(|i| format!("{i}.0-jre")).collect();
    group.bench_function("sort_newest_first_fallback", |b| {
        b.iter(|| {
            let mut list = maven_list.clone();
            sort_newest_first(&mut list);
            black_box(list);
        });
    });

    group.finish();
}

// =============================================================================
// Criterion Configuration
// =============================================================================

criterion_group!(
    benches,
    bench_parser,
    bench_validate,
    bench_memory_cache,
    bench_version_utils,
);

criterion_main!(benches);
