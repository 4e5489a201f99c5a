//! Calendar time for the time axis.
//!
//! A [`DateTime`] is a count of seconds since the Unix epoch,
//! 1970-01-01 00:00:00 UTC. Time zones are not supported.

use std::fmt;

/// Seconds elapsed since 1970-01-01 00:00:00 UTC
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DateTime(f64);

/// Error returned when a date component is out of range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidFieldError {
    pub field: &'static str,
    pub value: i64,
}

impl fmt::Display for InvalidFieldError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.value)
    }
}

impl std::error::Error for InvalidFieldError {}

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

const fn month_days(year: i64, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

// days since the epoch of a proleptic Gregorian date
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let m = month as i64;
    let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe - 719468
}

fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719468;
    let era = z.div_euclid(146097);
    let doe = z - era * 146097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}

impl DateTime {
    /// `None` for NaN or infinite timestamps
    pub fn from_timestamp(secs: f64) -> Option<Self> {
        secs.is_finite().then_some(DateTime(secs))
    }

    pub const fn unix_epoch() -> Self {
        DateTime(0.0)
    }

    pub fn from_ymd(year: i64, month: u32, day: u32) -> Result<Self, InvalidFieldError> {
        DateTime::from_ymd_hms(year, month, day, 0, 0, 0.0)
    }

    pub fn from_ymd_hms(
        year: i64,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self, InvalidFieldError> {
        if !(1..=12).contains(&month) {
            return Err(InvalidFieldError {
                field: "month",
                value: month as i64,
            });
        }
        if day < 1 || day > month_days(year, month) {
            return Err(InvalidFieldError {
                field: "day",
                value: day as i64,
            });
        }
        if hour > 23 {
            return Err(InvalidFieldError {
                field: "hour",
                value: hour as i64,
            });
        }
        if minute > 59 {
            return Err(InvalidFieldError {
                field: "minute",
                value: minute as i64,
            });
        }
        if !(0.0..60.0).contains(&second) {
            return Err(InvalidFieldError {
                field: "second",
                value: second as i64,
            });
        }
        let days = days_from_civil(year, month, day);
        Ok(DateTime(
            days as f64 * 86400.0 + hour as f64 * 3600.0 + minute as f64 * 60.0 + second,
        ))
    }

    pub const fn timestamp(&self) -> f64 {
        self.0
    }

    pub fn to_comps(&self) -> DateTimeComps {
        let days = (self.0 / 86400.0).floor();
        let secs = self.0 - days * 86400.0;
        let (year, month, day) = civil_from_days(days as i64);
        let whole = secs.floor();
        let mut micro = ((secs - whole) * 1_000_000.0).round() as u32;
        let mut whole = whole as u32;
        if micro >= 1_000_000 {
            micro -= 1_000_000;
            whole += 1;
        }
        DateTimeComps {
            year,
            month,
            day,
            hour: whole / 3600,
            minute: (whole % 3600) / 60,
            second: whole % 60,
            micro,
        }
    }

    /// Format with a strftime-like format string.
    ///
    /// Supported specifiers:
    /// - `%Y` year on at least 4 digits, `%y` year on 2 digits
    /// - `%m` month (01 to 12), `%b` abbreviated month name
    /// - `%d` day of the month
    /// - `%H`, `%M` and `%S` hour, minute and second
    /// - `%.f` fraction of second without trailing zeros (may be empty),
    ///   `%.3f` milliseconds and `%.6f` microseconds
    /// - `%%` a literal `%`
    ///
    /// Unknown specifiers are written as is.
    pub fn format(&self, fmt: &str) -> String {
        let mut out = String::new();
        // writing to a String cannot fail
        let _ = self.to_comps().fmt_write(fmt, &mut out);
        out
    }
}

/// RFC 3339 representation, with fractional seconds when not zero
impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.to_comps().fmt_write("%Y-%m-%dT%H:%M:%S%.fZ", f)
    }
}

/// Broken-down representation of a [`DateTime`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTimeComps {
    pub year: i64,
    /// 1 to 12
    pub month: u32,
    /// 1 to 31
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// 0 to 999,999
    pub micro: u32,
}

impl DateTimeComps {
    pub fn fmt_write<W: fmt::Write>(&self, fmt: &str, out: &mut W) -> fmt::Result {
        let tokens = FmtTokens { remaining: fmt };
        for tok in tokens {
            match tok {
                FmtToken::Year => write!(out, "{:04}", self.year)?,
                FmtToken::ShortYear => write!(out, "{:02}", self.year.rem_euclid(100))?,
                FmtToken::Month => write!(out, "{:02}", self.month)?,
                FmtToken::MonthName => {
                    out.write_str(MONTH_NAMES[(self.month as usize + 11) % 12])?
                }
                FmtToken::Day => write!(out, "{:02}", self.day)?,
                FmtToken::Hour => write!(out, "{:02}", self.hour)?,
                FmtToken::Minute => write!(out, "{:02}", self.minute)?,
                FmtToken::Second => write!(out, "{:02}", self.second)?,
                FmtToken::Milli => write!(out, ".{:03}", self.micro / 1000)?,
                FmtToken::Micro => write!(out, ".{:06}", self.micro)?,
                FmtToken::Frac => write_frac(out, self.micro)?,
                FmtToken::Lit(s) => out.write_str(s)?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FmtToken<'a> {
    Year,
    ShortYear,
    Month,
    MonthName,
    Day,
    Hour,
    Minute,
    Second,
    Milli,
    Micro,
    Frac,
    Lit(&'a str),
}

#[derive(Debug, Clone)]
struct FmtTokens<'a> {
    remaining: &'a str,
}

impl<'a> Iterator for FmtTokens<'a> {
    type Item = FmtToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }
        const SPECS: [(&str, FmtToken<'static>); 13] = [
            ("%.3f", FmtToken::Milli),
            ("%.6f", FmtToken::Micro),
            ("%.f", FmtToken::Frac),
            ("%Y", FmtToken::Year),
            ("%y", FmtToken::ShortYear),
            ("%m", FmtToken::Month),
            ("%b", FmtToken::MonthName),
            ("%d", FmtToken::Day),
            ("%H", FmtToken::Hour),
            ("%M", FmtToken::Minute),
            ("%S", FmtToken::Second),
            ("%%", FmtToken::Lit("%")),
            ("%", FmtToken::Lit("%")),
        ];
        if self.remaining.starts_with('%') {
            for (spec, tok) in SPECS {
                if let Some(rest) = self.remaining.strip_prefix(spec) {
                    self.remaining = rest;
                    return Some(tok);
                }
            }
        }
        let first = self.remaining.chars().next()?.len_utf8();
        let end = self.remaining[first..]
            .find('%')
            .map(|i| i + first)
            .unwrap_or(self.remaining.len());
        let lit = &self.remaining[..end];
        self.remaining = &self.remaining[end..];
        Some(FmtToken::Lit(lit))
    }
}

fn write_frac<W: fmt::Write>(out: &mut W, micro: u32) -> fmt::Result {
    if micro == 0 {
        return Ok(());
    }
    let digits = format!("{:06}", micro);
    write!(out, ".{}", digits.trim_end_matches('0'))
}
