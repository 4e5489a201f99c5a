//! Extended Wilkinson tick labelling, after Talbot, Lin and Hanrahan,
//! "An Extension of Wilkinson's Algorithm for Positioning Tick Labels on
//! Axes", InfoVis 2010.

// 2 × 2^-53, times 100
const EPS: f64 = 2.0 / (1u64 << 53) as f64 * 100.0;

/// Nice numbers, in order of preference
pub const DEFAULT_Q: [f64; 6] = [1.0, 5.0, 2.0, 2.5, 4.0, 3.0];

/// Restriction on the position of the labels relative to the data range
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Containment {
    /// Labels may lie anywhere
    #[default]
    Free,
    /// The labels enclose the data range
    ContainData,
    /// All labels lie within the data range
    WithinData,
}

/// Weights of the scoring terms
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    pub simplicity: f64,
    pub coverage: f64,
    pub density: f64,
    pub legibility: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            simplicity: 0.25,
            coverage: 0.2,
            density: 0.5,
            legibility: 0.05,
        }
    }
}

impl Weights {
    fn score(&self, s: f64, c: f64, d: f64, l: f64) -> f64 {
        self.simplicity * s + self.coverage * c + self.density * d + self.legibility * l
    }
}

/// Result of the labelling search
#[derive(Debug, Clone, PartialEq)]
pub struct Labelling {
    pub values: Vec<f64>,
    /// Label step divided by `10^magnitude`, `skip × q`
    pub step: f64,
    /// The chosen nice number, 0 when the search fell back to even spacing
    pub q: f64,
    pub magnitude: i32,
}

/// Search the best labelling of `[d_min, d_max]` with about `want` labels,
/// with the default nice numbers and weights.
pub fn talbot_lin_hanrahan(d_min: f64, d_max: f64, want: usize, containment: Containment) -> Labelling {
    talbot_lin_hanrahan_with(d_min, d_max, want, containment, &DEFAULT_Q, &Weights::default())
}

pub fn talbot_lin_hanrahan_with(
    d_min: f64,
    d_max: f64,
    want: usize,
    containment: Containment,
    qs: &[f64],
    w: &Weights,
) -> Labelling {
    let want = want.max(2);
    if d_max - d_min < EPS {
        return even_spacing(d_min, d_max, want);
    }

    struct Selection {
        n: usize,
        l_min: f64,
        l_step: f64,
        lq: f64,
        score: f64,
        magnitude: i32,
    }
    let mut best: Option<Selection> = None;
    let best_score = |b: &Option<Selection>| b.as_ref().map_or(-2.0, |b| b.score);

    'outer: for skip in 1usize.. {
        for (qi, &q) in qs.iter().enumerate() {
            let sm = max_simplicity(qi, qs.len(), skip);
            if w.score(sm, 1.0, 1.0, 1.0) < best_score(&best) {
                break 'outer;
            }

            for have in 2usize.. {
                let dm = max_density(have, want);
                if w.score(sm, 1.0, dm, 1.0) < best_score(&best) {
                    break;
                }

                let delta = (d_max - d_min) / (have + 1) as f64 / skip as f64 / q;

                const MAX_EXP: i32 = 309;
                let mut mag = delta.log10().ceil() as i32;
                while mag < MAX_EXP {
                    let step = skip as f64 * q * 10f64.powi(mag);

                    let cm = max_coverage(d_min, d_max, step * (have - 1) as f64);
                    if w.score(sm, cm, dm, 1.0) < best_score(&best) {
                        break;
                    }

                    let frac_step = step / skip as f64;
                    let k_step = step * (have - 1) as f64;

                    let min_start = ((d_max / step).floor() - (have - 1) as f64) * skip as f64;
                    let max_start = (d_max / step).ceil() * skip as f64;
                    let mut start = min_start;
                    while start <= max_start && start != start - 1.0 {
                        let l_min = start * frac_step;
                        let l_max = l_min + k_step;
                        start += 1.0;

                        let contained = match containment {
                            Containment::Free => true,
                            Containment::ContainData => l_min <= d_min && d_max <= l_max,
                            Containment::WithinData => d_min <= l_min && l_max <= d_max,
                        };
                        if !contained {
                            continue;
                        }

                        let score = w.score(
                            simplicity(qi, qs.len(), skip, l_min, l_max, step),
                            coverage(d_min, d_max, l_min, l_max),
                            density(have, want, d_min, d_max, l_min, l_max),
                            1.0,
                        );
                        if score > best_score(&best) {
                            best = Some(Selection {
                                n: have,
                                l_min,
                                l_step: skip as f64 * q,
                                lq: q,
                                score,
                                magnitude: mag,
                            });
                        }
                    }
                    mag += 1;
                }
            }
        }
    }

    match best {
        None => even_spacing(d_min, d_max, want),
        Some(best) => {
            let step = best.l_step * 10f64.powi(best.magnitude);
            Labelling {
                values: (0..best.n).map(|i| best.l_min + i as f64 * step).collect(),
                step: best.l_step,
                q: best.lq,
                magnitude: best.magnitude,
            }
        }
    }
}

fn even_spacing(d_min: f64, d_max: f64, want: usize) -> Labelling {
    let step = (d_max - d_min) / (want - 1) as f64;
    Labelling {
        values: (0..want).map(|i| d_min + i as f64 * step).collect(),
        step,
        q: 0.0,
        magnitude: min_abs_mag(d_min, d_max),
    }
}

fn min_abs_mag(a: f64, b: f64) -> i32 {
    let ma = a.abs().log10().floor();
    let mb = b.abs().log10().floor();
    let m = ma.min(mb);
    if m.is_finite() { m as i32 } else { 0 }
}

fn simplicity(qi: usize, nq: usize, skip: usize, l_min: f64, l_max: f64, l_step: f64) -> f64 {
    // Go-style remainder, keeping the sign of the dividend
    let m = l_min % l_step;
    let v = if (m < EPS || l_step - m < EPS) && l_min <= 0.0 && 0.0 <= l_max {
        1.0
    } else {
        0.0
    };
    1.0 - qi as f64 / (nq as f64 - 1.0) - skip as f64 + v
}

fn max_simplicity(qi: usize, nq: usize, skip: usize) -> f64 {
    1.0 - qi as f64 / (nq as f64 - 1.0) - skip as f64 + 1.0
}

fn coverage(d_min: f64, d_max: f64, l_min: f64, l_max: f64) -> f64 {
    let r = 0.1 * (d_max - d_min);
    let max = d_max - l_max;
    let min = d_min - l_min;
    1.0 - 0.5 * (max * max + min * min) / (r * r)
}

fn max_coverage(d_min: f64, d_max: f64, span: f64) -> f64 {
    let r = d_max - d_min;
    if span <= r {
        return 1.0;
    }
    let h = 0.5 * (span - r);
    let r = 0.1 * r;
    1.0 - (h * h) / (r * r)
}

fn density(have: usize, want: usize, d_min: f64, d_max: f64, l_min: f64, l_max: f64) -> f64 {
    let rho = (have - 1) as f64 / (l_max - l_min);
    let rhot = (want - 1) as f64 / (l_max.max(d_max) - d_min.min(l_min));
    let d = rho / rhot;
    if d >= 1.0 { 2.0 - d } else { 2.0 - rhot / rho }
}

fn max_density(have: usize, want: usize) -> f64 {
    if have < want {
        1.0
    } else {
        2.0 - (have - 1) as f64 / (want - 1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{Near, assert_near};

    #[test]
    fn free_labels() {
        let l = talbot_lin_hanrahan(-1.98465, 0.43710, 3, Containment::Free);
        assert_eq!(l.values.len(), 3);
        for (v, e) in l.values.iter().zip([-2.0, -1.0, 0.0]) {
            assert_near!(abs, *v, e, 1e-12);
        }
        assert_eq!(l.step, 1.0);
        assert_eq!(l.magnitude, 0);
    }

    #[test]
    fn labels_contain_data() {
        let l = talbot_lin_hanrahan(555.6545, 21800.9875, 3, Containment::ContainData);
        assert_eq!(l.values.len(), 3);
        for (v, e) in l.values.iter().zip([0.0, 12000.0, 24000.0]) {
            assert_near!(abs, *v, e, 1e-9);
        }
        assert_eq!(l.step, 12.0);
        assert_eq!(l.magnitude, 3);
    }

    #[test]
    fn labels_within_data() {
        let (lo, hi) = (-1.98465, 0.43710);
        let l = talbot_lin_hanrahan(lo, hi, 3, Containment::WithinData);
        assert!(l.values.len() >= 2);
        for v in &l.values {
            assert!(*v >= lo && *v <= hi);
        }
    }

    #[test]
    fn degenerate_range() {
        let l = talbot_lin_hanrahan(1.0, 1.0, 3, Containment::Free);
        assert_eq!(l.values, vec![1.0, 1.0, 1.0]);
        assert_eq!(l.q, 0.0);
    }
}
