use crate::md_implementation::cluster::Cluster;
use crate::md_implementation::lj_direct_summation::{ExecutionMode, Variant};
use itertools::iproduct;
use log::{info, warn};
use serde::Serialize;
use std::fmt;
use std::hint::black_box;
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    /// untimed calls before measuring
    pub warmup: usize,
    pub repeats: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            warmup: 1,
            repeats: 7,
        }
    }
}

/// Wall-clock statistics in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub samples: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    pub fn from_samples(samples: &[Duration]) -> Self {
        if samples.is_empty() {
            return Self {
                samples: 0,
                mean: 0.0,
                std_dev: 0.0,
                min: 0.0,
                max: 0.0,
            };
        }
        let seconds: Vec<f64> = samples.iter().map(Duration::as_secs_f64).collect();
        let n = seconds.len() as f64;
        let mean = seconds.iter().sum::<f64>() / n;
        let variance = seconds.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / n;
        Self {
            samples: seconds.len(),
            mean,
            std_dev: variance.sqrt(),
            min: seconds.iter().copied().fold(f64::INFINITY, f64::min),
            max: seconds.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TimingReport {
    pub variant: Variant,
    pub mode: ExecutionMode,
    pub nb_atoms: usize,
    pub energy: f64,
    pub summary: Summary,
}

impl fmt::Display for TimingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12}{} ± {} per loop (mean ± std. dev. of {} runs), epot = {:.10e}",
            self.variant.name(),
            format_seconds(self.summary.mean),
            format_seconds(self.summary.std_dev),
            self.summary.samples,
            self.energy
        )
    }
}

fn format_seconds(seconds: f64) -> String {
    if seconds >= 1.0 {
        format!("{:.3} s", seconds)
    } else if seconds >= 1e-3 {
        format!("{:.3} ms", seconds * 1e3)
    } else if seconds >= 1e-6 {
        format!("{:.3} µs", seconds * 1e6)
    } else {
        format!("{:.1} ns", seconds * 1e9)
    }
}

pub fn time_evaluation(
    cluster: &Cluster,
    variant: Variant,
    mode: ExecutionMode,
    config: &TimingConfig,
) -> TimingReport {
    let mut energy = 0f64;
    for _ in 0..config.warmup {
        energy = black_box(cluster.potential_energy(variant, mode));
    }

    let mut samples = Vec::with_capacity(config.repeats);
    for _ in 0..config.repeats {
        let start = Instant::now();
        energy = black_box(cluster.potential_energy(variant, mode));
        samples.push(start.elapsed());
    }

    if config.warmup + config.repeats == 0 {
        energy = cluster.potential_energy(variant, mode);
    }
    if !energy.is_finite() {
        warn!("{} {} energy is not finite: {}", variant, mode, energy);
    }

    let report = TimingReport {
        variant,
        mode,
        nb_atoms: cluster.nb_atoms(),
        energy,
        summary: Summary::from_samples(&samples),
    };
    info!(
        "{} {} with {} atoms: mean {:.6e} s over {} runs",
        variant, mode, report.nb_atoms, report.summary.mean, report.summary.samples
    );
    report
}

/// Sequential first, then parallel, each over `variants` in the given order.
pub fn time_variants(
    cluster: &Cluster,
    variants: &[Variant],
    config: &TimingConfig,
) -> Vec<TimingReport> {
    iproduct!(ExecutionMode::ALL, variants.iter().copied())
        .map(|(mode, variant)| time_evaluation(cluster, variant, mode, config))
        .collect()
}

pub fn time_all_variants(cluster: &Cluster, config: &TimingConfig) -> Vec<TimingReport> {
    time_variants(cluster, &Variant::ALL, config)
}

#[cfg(test)]
mod tests {
    use crate::md_implementation::cluster::Cluster;
    use crate::md_implementation::lj_direct_summation::{ExecutionMode, Variant};
    use crate::md_implementation::timing::{
        time_all_variants, time_evaluation, time_variants, Summary, TimingConfig,
    };
    use googletest::{matchers::near, verify_that};
    use std::time::Duration;

    #[test]
    fn test_summary_statistics() {
        let samples = [
            Duration::from_millis(2),
            Duration::from_millis(4),
            Duration::from_millis(4),
            Duration::from_millis(4),
            Duration::from_millis(5),
            Duration::from_millis(5),
            Duration::from_millis(7),
            Duration::from_millis(9),
        ];
        let summary = Summary::from_samples(&samples);
        assert_eq!(summary.samples, 8);
        verify_that!(summary.mean, near(5e-3, 1e-12)).unwrap_or_else(|e| panic!("{}", e));
        verify_that!(summary.std_dev, near(2e-3, 1e-12)).unwrap_or_else(|e| panic!("{}", e));
        verify_that!(summary.min, near(2e-3, 1e-12)).unwrap_or_else(|e| panic!("{}", e));
        verify_that!(summary.max, near(9e-3, 1e-12)).unwrap_or_else(|e| panic!("{}", e));
    }

    #[test]
    fn test_empty_summary() {
        let summary = Summary::from_samples(&[]);
        assert_eq!(summary.samples, 0);
        assert_eq!(summary.mean, 0.0);
    }

    #[test]
    fn test_time_evaluation() {
        let cluster = Cluster::random_uniform(64, 0.0, 4.0, 7).unwrap();
        let config = TimingConfig {
            warmup: 1,
            repeats: 3,
        };
        let report = time_evaluation(&cluster, Variant::Merged, ExecutionMode::Sequential, &config);
        assert_eq!(report.summary.samples, 3);
        assert_eq!(report.nb_atoms, 64);
        assert_eq!(
            report.energy,
            cluster.potential_energy(Variant::Merged, ExecutionMode::Sequential)
        );
        assert!(report.summary.min <= report.summary.mean);
        assert!(report.summary.mean <= report.summary.max);
        assert!(report.to_string().starts_with("merged"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["variant"], "merged");
        assert_eq!(json["mode"], "sequential");
        assert_eq!(json["summary"]["samples"], 3);
    }

    #[test]
    fn test_time_all_variants_order() {
        let cluster = Cluster::random_uniform(16, 0.0, 3.0, 7).unwrap();
        let config = TimingConfig {
            warmup: 0,
            repeats: 1,
        };
        let reports = time_all_variants(&cluster, &config);
        let order: Vec<_> = reports.iter().map(|r| (r.mode, r.variant)).collect();
        assert_eq!(
            order,
            vec![
                (ExecutionMode::Sequential, Variant::Separated),
                (ExecutionMode::Sequential, Variant::Merged),
                (ExecutionMode::Sequential, Variant::Rearranged),
                (ExecutionMode::Parallel, Variant::Separated),
                (ExecutionMode::Parallel, Variant::Merged),
                (ExecutionMode::Parallel, Variant::Rearranged),
            ]
        );
    }

    #[test]
    fn test_time_selected_variants() {
        let cluster = Cluster::random_uniform(16, 0.0, 3.0, 7).unwrap();
        let config = TimingConfig {
            warmup: 0,
            repeats: 1,
        };
        let reports = time_variants(&cluster, &[Variant::Rearranged], &config);
        let order: Vec<_> = reports.iter().map(|r| (r.mode, r.variant)).collect();
        assert_eq!(
            order,
            vec![
                (ExecutionMode::Sequential, Variant::Rearranged),
                (ExecutionMode::Parallel, Variant::Rearranged),
            ]
        );
        assert!(time_variants(&cluster, &[], &config).is_empty());
    }
}
