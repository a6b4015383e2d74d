//! Number formatting shared by summary text and rendered documents.

/// Rounds half away from zero and appends `%`.
pub fn percent(value: f64) -> String {
    format!("{}%", round(value))
}

/// Like [`percent`] but always carries a sign for non-zero values.
pub fn signed_percent(value: f64) -> String {
    let rounded = round(value);
    if rounded > 0 {
        format!("+{rounded}%")
    } else {
        format!("{rounded}%")
    }
}

/// en-US grouping: `1234567` becomes `1,234,567`.
pub fn count(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Rounds a fractional tally (averages, traffic estimates) before grouping.
pub fn rounded_count(value: f64) -> String {
    let rounded = round(value);
    let magnitude = count(rounded.unsigned_abs());
    if rounded < 0 {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

pub fn signed_count(value: i64) -> String {
    let magnitude = count(value.unsigned_abs());
    match value.signum() {
        1 => format!("+{magnitude}"),
        -1 => format!("-{magnitude}"),
        _ => magnitude,
    }
}

fn round(value: f64) -> i64 {
    if value.is_finite() {
        value.round() as i64
    } else {
        0
    }
}
