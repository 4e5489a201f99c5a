use std::fmt;
use std::sync::Arc;

use super::talbot::{self, Containment};
use crate::Error;
use crate::defaults;
use crate::time::DateTime;

/// A mark on an axis. Ticks without label are minor ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

impl Tick {
    pub fn major(value: f64, label: impl Into<String>) -> Self {
        Tick {
            value,
            label: label.into(),
        }
    }

    pub fn minor(value: f64) -> Self {
        Tick {
            value,
            label: String::new(),
        }
    }

    pub fn is_minor(&self) -> bool {
        self.label.is_empty()
    }
}

/// Generator of the ticks of an axis range
pub trait Ticker: fmt::Debug + Send + Sync {
    /// Ticks of `[min, max]`, sorted by value
    fn ticks(&self, min: f64, max: f64) -> Result<Vec<Tick>, Error>;
}

fn sort_ticks(ticks: &mut [Tick]) {
    ticks.sort_by(|a, b| a.value.total_cmp(&b.value));
}

/// Strategy of [`DefaultTicks`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum TickStrategy {
    /// Powers of ten divided into multiples of the suggested count
    #[default]
    Legacy,
    /// Talbot, Lin and Hanrahan's optimization
    Talbot(Containment),
}

/// Ticks of linear axes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultTicks {
    pub strategy: TickStrategy,
    /// Number of labelled ticks to aim for
    pub count: usize,
}

impl Default for DefaultTicks {
    fn default() -> Self {
        DefaultTicks {
            strategy: TickStrategy::Legacy,
            count: defaults::SUGGESTED_TICKS,
        }
    }
}

impl DefaultTicks {
    pub fn talbot() -> Self {
        DefaultTicks {
            strategy: TickStrategy::Talbot(Containment::WithinData),
            ..Default::default()
        }
    }

    pub fn with_strategy(self, strategy: TickStrategy) -> Self {
        DefaultTicks { strategy, ..self }
    }

    pub fn with_count(self, count: usize) -> Self {
        DefaultTicks {
            count: count.max(2),
            ..self
        }
    }
}

impl Ticker for DefaultTicks {
    fn ticks(&self, min: f64, max: f64) -> Result<Vec<Tick>, Error> {
        if !(max > min) {
            return Err(Error::InputRange { min, max });
        }
        let mut ticks = match self.strategy {
            TickStrategy::Legacy => legacy_ticks(min, max, self.count),
            TickStrategy::Talbot(containment) => talbot_ticks(min, max, self.count, containment),
        };
        sort_ticks(&mut ticks);
        Ok(ticks)
    }
}

/// Rounding precision of the legacy labels: at least 4 decimals, more for
/// values close to zero
fn precision_of(x: f64) -> i32 {
    let p = (-x.abs().log10()).ceil();
    if p.is_finite() { (p as i32).max(4) } else { 4 }
}

fn round_to(x: f64, prec: i32) -> f64 {
    let p = 10f64.powi(prec);
    let r = (x * p).round() / p;
    if r == 0.0 { 0.0 } else { r }
}

/// Shortest decimal representation of `v`, in exponent form (`1.5e-07`,
/// `1e+20`) when the decimal exponent is below -4 or at least 6
pub(crate) fn shortest_label(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if !v.is_finite() {
        return format!("{}", v);
    }
    let sci = format!("{:e}", v);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if exp < -4 || exp >= 6 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    } else {
        format!("{}", v)
    }
}

fn legacy_ticks(min: f64, max: f64, count: usize) -> Vec<Tick> {
    let suggested = count as f64;
    let mut tens = 10f64.powi((max - min).log10().floor() as i32);
    let mut n = (max - min) / tens;
    while n < suggested {
        tens /= 10.0;
        n = (max - min) / tens;
    }

    let major_mult = match (n / suggested) as i64 {
        7 => 6,
        9 => 8,
        m => m,
    };
    let major_delta = major_mult as f64 * tens;

    let prec = precision_of(min).max(precision_of(max));
    let mut ticks = Vec::new();
    let mut val = (min / major_delta).floor() * major_delta;
    while val <= max {
        if val >= min {
            ticks.push(Tick::major(val, shortest_label(round_to(val, prec))));
        }
        val += major_delta;
    }

    let minor_delta = match major_mult {
        3 | 6 => major_delta / 3.0,
        5 => major_delta / 5.0,
        _ => major_delta / 2.0,
    };
    let tol = minor_delta * 1e-6;
    let n_major = ticks.len();
    let mut val = (min / minor_delta).floor() * minor_delta;
    while val <= max {
        let coincides = ticks[..n_major]
            .iter()
            .any(|t| (t.value - val).abs() < tol);
        if val >= min && !coincides {
            ticks.push(Tick::minor(val));
        }
        val += minor_delta;
    }
    ticks
}

fn talbot_ticks(min: f64, max: f64, count: usize, containment: Containment) -> Vec<Tick> {
    let l = talbot::talbot_lin_hanrahan(min, max, count, containment);
    let major_delta = if l.q == 0.0 {
        l.step
    } else {
        l.step * 10f64.powi(l.magnitude)
    };

    let mut off = 0;
    let sci = l.magnitude < -1 || 6 < l.magnitude;
    if sci {
        off = 1;
    }
    if l.q.trunc() != l.q {
        off += 2;
    }
    let prec = off.max(-l.magnitude).clamp(0, 6) as usize;
    let mut ticks: Vec<Tick> = l
        .values
        .iter()
        .map(|&v| {
            let label = if sci {
                format!("{:.*e}", prec, v)
            } else {
                format!("{:.*}", prec, v)
            };
            Tick::major(v, label)
        })
        .collect();

    let minor_delta = if l.step == 1.0 || l.step == 2.5 {
        major_delta / 5.0
    } else if [2.0, 3.0, 4.0, 5.0].contains(&l.step) {
        major_delta / l.step
    } else {
        if major_delta / 2.0 < f64::EPSILON {
            return ticks;
        }
        major_delta / 2.0
    };

    let Some(&first) = l.values.first() else {
        return ticks;
    };
    let mut i = 0.0;
    while first + (i - 1.0) * minor_delta > min {
        i -= 1.0;
    }
    let n_major = ticks.len();
    loop {
        let val = first + i * minor_delta;
        if val > max {
            break;
        }
        let found = ticks[..n_major]
            .iter()
            .any(|t| (t.value - val).abs() < minor_delta / 2.0);
        if !found && val >= min {
            ticks.push(Tick::minor(val));
        }
        i += 1.0;
    }
    ticks
}

/// Ticks of logarithmic axes: labelled powers of ten and unlabelled
/// multiples in between
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LogTicks {
    /// Number of decimals of the labels, shortest representation when `None`
    pub prec: Option<usize>,
}

impl Ticker for LogTicks {
    fn ticks(&self, min: f64, max: f64) -> Result<Vec<Tick>, Error> {
        if min <= 0.0 || max <= 0.0 {
            return Err(Error::Domain(format!(
                "log ticks of the range [{}, {}]",
                min, max
            )));
        }
        if !(max > min) {
            return Err(Error::InputRange { min, max });
        }
        let label = |v: f64| match self.prec {
            Some(p) => format!("{:.*}", p, v),
            None => shortest_label(v),
        };
        let mut val = 10f64.powi(min.log10().trunc() as i32);
        let end = 10f64.powi(max.log10().ceil() as i32);
        let mut ticks = Vec::new();
        while val < end {
            ticks.push(Tick::major(val, label(val)));
            for k in 2..10 {
                ticks.push(Tick::minor(val * k as f64));
            }
            val *= 10.0;
        }
        ticks.push(Tick::major(val, label(val)));
        sort_ticks(&mut ticks);
        Ok(ticks)
    }
}

/// A fixed set of ticks
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantTicks(pub Vec<Tick>);

impl Ticker for ConstantTicks {
    fn ticks(&self, _min: f64, _max: f64) -> Result<Vec<Tick>, Error> {
        let mut ticks = self.0.clone();
        sort_ticks(&mut ticks);
        Ok(ticks)
    }
}

/// Converts an axis value to a point in time
pub type TimeFn = fn(f64) -> DateTime;

/// Axis values counted in seconds since the Unix epoch
pub fn unix_time(v: f64) -> DateTime {
    DateTime::from_timestamp(v).unwrap_or(DateTime::unix_epoch())
}

/// Ticks of a time axis.
///
/// Positions come from the inner ticker; labels are formatted from the
/// point in time of each labelled tick.
#[derive(Debug, Clone)]
pub struct TimeTicks {
    pub ticker: Arc<dyn Ticker>,
    /// See [`DateTime::format`]
    pub format: String,
    pub time: TimeFn,
}

impl Default for TimeTicks {
    fn default() -> Self {
        TimeTicks {
            ticker: Arc::new(DefaultTicks::default()),
            format: "%Y-%m-%dT%H:%M:%SZ".to_string(),
            time: unix_time,
        }
    }
}

impl TimeTicks {
    pub fn with_format(self, format: impl Into<String>) -> Self {
        TimeTicks {
            format: format.into(),
            ..self
        }
    }

    pub fn with_ticker(self, ticker: Arc<dyn Ticker>) -> Self {
        TimeTicks { ticker, ..self }
    }

    pub fn with_time(self, time: TimeFn) -> Self {
        TimeTicks { time, ..self }
    }
}

impl Ticker for TimeTicks {
    fn ticks(&self, min: f64, max: f64) -> Result<Vec<Tick>, Error> {
        let mut ticks = self.ticker.ticks(min, max)?;
        for t in ticks.iter_mut().filter(|t| !t.is_minor()) {
            t.label = (self.time)(t.value).format(&self.format);
        }
        Ok(ticks)
    }
}

/// The tick generators an axis can use
#[derive(Debug, Clone)]
pub enum TickMarker {
    Default(DefaultTicks),
    Log(LogTicks),
    Constant(ConstantTicks),
    Time(TimeTicks),
    Custom(Arc<dyn Ticker>),
}

impl Default for TickMarker {
    fn default() -> Self {
        TickMarker::Default(DefaultTicks::default())
    }
}

impl Ticker for TickMarker {
    fn ticks(&self, min: f64, max: f64) -> Result<Vec<Tick>, Error> {
        match self {
            TickMarker::Default(t) => t.ticks(min, max),
            TickMarker::Log(t) => t.ticks(min, max),
            TickMarker::Constant(t) => t.ticks(min, max),
            TickMarker::Time(t) => t.ticks(min, max),
            TickMarker::Custom(t) => t.ticks(min, max),
        }
    }
}

impl From<DefaultTicks> for TickMarker {
    fn from(t: DefaultTicks) -> Self {
        TickMarker::Default(t)
    }
}

impl From<LogTicks> for TickMarker {
    fn from(t: LogTicks) -> Self {
        TickMarker::Log(t)
    }
}

impl From<ConstantTicks> for TickMarker {
    fn from(t: ConstantTicks) -> Self {
        TickMarker::Constant(t)
    }
}

impl From<TimeTicks> for TickMarker {
    fn from(t: TimeTicks) -> Self {
        TickMarker::Time(t)
    }
}
