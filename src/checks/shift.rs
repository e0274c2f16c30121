//! Distribution shift: two-sample Kolmogorov-Smirnov test plus PSI.

use opsmon_types::ShiftStats;

/// Floor applied to empty bin proportions so the PSI log term stays finite.
const PSI_EPSILON: f64 = 1e-6;

/// Fewer distinct quantile edges than this means the baseline is near-constant.
const MIN_DISTINCT_EDGES: usize = 3;

/// Largest `n * m` for which the exact KS distribution is computed.
const EXACT_MAX_CELLS: usize = 1_000_000;

/// Result of a two-sample KS test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KsTest {
    /// Largest absolute distance between the empirical CDFs.
    pub statistic: f64,
    pub pvalue: f64,
}

/// Compare baseline and recent windows (nulls already dropped).
///
/// Shift is flagged by KS when the p-value is below `ks_alpha`; the PSI is
/// reported alongside for the caller to threshold. If either window is empty
/// there is no evidence of shift.
pub fn distribution_shift(baseline: &[f64], recent: &[f64], ks_alpha: f64, bins: usize) -> ShiftStats {
    if baseline.is_empty() || recent.is_empty() {
        return ShiftStats::no_evidence();
    }

    let ks = ks_two_sample(baseline, recent);

    ShiftStats {
        ks_pvalue: ks.pvalue,
        ks_shift: ks.pvalue < ks_alpha,
        psi: psi(baseline, recent, bins),
    }
}

/// Two-sample Kolmogorov-Smirnov test.
///
/// The p-value is exact for small samples (`n * m` up to one million) and
/// otherwise comes from the asymptotic Kolmogorov distribution with
/// Stephens' effective sample size correction. Empty inputs give
/// `D = 0, p = 1`.
pub fn ks_two_sample(a: &[f64], b: &[f64]) -> KsTest {
    if a.is_empty() || b.is_empty() {
        return KsTest {
            statistic: 0.0,
            pvalue: 1.0,
        };
    }

    let a = sorted(a);
    let b = sorted(b);
    let (n, m) = (a.len() as f64, b.len() as f64);

    let (mut i, mut j) = (0usize, 0usize);
    let mut d = 0.0f64;
    while i < a.len() && j < b.len() {
        let x = a[i].min(b[j]);
        // Step past every sample equal to x on both sides so ties don't
        // register as a spurious gap.
        while i < a.len() && a[i] <= x {
            i += 1;
        }
        while j < b.len() && b[j] <= x {
            j += 1;
        }
        d = d.max((i as f64 / n - j as f64 / m).abs());
    }

    let pvalue = if d == 0.0 {
        1.0
    } else if a.len() * b.len() <= EXACT_MAX_CELLS {
        ks_exact_pvalue(a.len(), b.len(), d)
    } else {
        let en = (n * m / (n + m)).sqrt();
        kolmogorov_survival((en + 0.12 + 0.11 / en) * d)
    };

    KsTest { statistic: d, pvalue }
}

/// Exact two-sided P(D >= d) for sample sizes `n` and `m`.
///
/// Walks the lattice of merge orders from (0, 0) to (n, m). A random merge
/// order takes each step with probability proportional to the samples left
/// on that side, so every path is equally likely. The result is one minus
/// the probability of a path staying strictly inside
/// `|i * m - j * n| < d * n * m`.
fn ks_exact_pvalue(n: usize, m: usize, d: f64) -> f64 {
    let h = (d * (n * m) as f64).round() as i64;
    let inside = |i: usize, j: usize| (i as i64 * m as i64 - j as i64 * n as i64).abs() < h;

    let mut prev = vec![0.0f64; m + 1];
    let mut cur = vec![0.0f64; m + 1];
    for i in 0..=n {
        for j in 0..=m {
            // Samples still unmerged one step before (i, j).
            let left = (n + m + 1 - i - j) as f64;
            let mut p = if i == 0 && j == 0 { 1.0 } else { 0.0 };
            if i > 0 {
                p += prev[j] * (n + 1 - i) as f64 / left;
            }
            if j > 0 {
                p += cur[j - 1] * (m + 1 - j) as f64 / left;
            }
            cur[j] = if inside(i, j) { p } else { 0.0 };
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    (1.0 - prev[m]).clamp(0.0, 1.0)
}

/// Q_KS(λ) = 2 Σ (-1)^(k-1) exp(-2 k² λ²).
fn kolmogorov_survival(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }

    let a2 = -2.0 * lambda * lambda;
    let mut sign = 2.0;
    let mut sum = 0.0;
    let mut previous = 0.0f64;

    for k in 1..=100 {
        let k = k as f64;
        let term = sign * (a2 * k * k).exp();
        sum += term;
        if term.abs() <= 0.001 * previous || term.abs() <= 1e-8 * sum {
            return sum.clamp(0.0, 1.0);
        }
        sign = -sign;
        previous = term.abs();
    }

    // Series did not converge: λ is tiny and the samples are indistinguishable.
    1.0
}

/// Population Stability Index of `recent` against `baseline`.
///
/// Bins are baseline quantile edges (deduplicated). When the baseline is
/// near-constant and yields fewer than three distinct edges, `bins`
/// equal-width bins spanning both samples are used instead.
pub fn psi(baseline: &[f64], recent: &[f64], bins: usize) -> f64 {
    if baseline.is_empty() || recent.is_empty() {
        return 0.0;
    }
    let bins = bins.max(1);

    let sorted_baseline = sorted(baseline);
    let mut edges: Vec<f64> = (0..=bins)
        .map(|i| quantile(&sorted_baseline, i as f64 / bins as f64))
        .collect();
    edges.dedup();

    if edges.len() < MIN_DISTINCT_EDGES {
        let lo = baseline.iter().chain(recent).copied().fold(f64::INFINITY, f64::min);
        let hi = baseline.iter().chain(recent).copied().fold(f64::NEG_INFINITY, f64::max);
        edges = linspace(lo, hi, bins + 1);
    }

    let expected = proportions(&histogram(baseline, &edges));
    let actual = proportions(&histogram(recent, &edges));

    expected
        .iter()
        .zip(&actual)
        .map(|(&p, &q)| (p - q) * (p / q).ln())
        .sum()
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut values = values.to_vec();
    values.sort_by(f64::total_cmp);
    values
}

/// Linear-interpolation quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}

fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    if num == 1 {
        return vec![start];
    }
    let step = (stop - start) / (num - 1) as f64;
    let mut points: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
    points[num - 1] = stop;
    points
}

/// Count values per bin. Bins are `[e_i, e_i+1)` except the last, which also
/// includes its right edge. Values outside the edges are ignored.
fn histogram(values: &[f64], edges: &[f64]) -> Vec<usize> {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0usize; bins];
    if bins == 0 {
        return counts;
    }

    let first = edges[0];
    let last = edges[bins];
    for &v in values {
        if v < first || v > last {
            continue;
        }
        let bin = if v == last {
            bins - 1
        } else {
            edges.partition_point(|e| *e <= v) - 1
        };
        counts[bin] += 1;
    }
    counts
}

fn proportions(counts: &[usize]) -> Vec<f64> {
    let total = counts.iter().sum::<usize>().max(1) as f64;
    counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            if p == 0.0 {
                PSI_EPSILON
            } else {
                p
            }
        })
        .collect()
}
