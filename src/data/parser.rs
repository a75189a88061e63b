//! Value Parser Module
//! Normalizes textual numeric encodings ("1.9%", "231K", "6.888M", "54.1") to floats.

use polars::prelude::*;

/// Parse one raw cell into a float, or `None` if it is missing or malformed.
///
/// Suffix handling is case-sensitive and exact: `%` divides by 100, `K`
/// multiplies by 1 000, `M` by 1 000 000. Anything else is parsed as a
/// plain float. Parse failures never escape as errors.
pub fn parse_value(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if let Some(prefix) = s.strip_suffix('%') {
        return prefix.trim().parse::<f64>().ok().map(|v| v / 100.0);
    }
    if let Some(prefix) = s.strip_suffix('K') {
        return prefix.trim().parse::<f64>().ok().map(|v| v * 1_000.0);
    }
    if let Some(prefix) = s.strip_suffix('M') {
        return prefix.trim().parse::<f64>().ok().map(|v| v * 1_000_000.0);
    }
    s.parse::<f64>().ok()
}

/// Apply [`parse_value`] over a whole column, producing a named `Float64`
/// column with nulls where the input is null or unparsable.
///
/// A column the CSV reader already inferred as numeric carries no suffixes,
/// so it is cast directly.
pub fn parse_value_column(column: &Column, name: &str) -> PolarsResult<Column> {
    if column.dtype() != &DataType::String {
        let mut cast = column.cast(&DataType::Float64)?;
        cast.rename(name.into());
        return Ok(cast);
    }

    let parsed: Float64Chunked = column
        .str()?
        .into_iter()
        .map(|cell| cell.and_then(parse_value))
        .collect();

    let mut series = parsed.into_series();
    series.rename(name.into());
    Ok(series.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_suffix_divides_by_hundred() {
        assert!((parse_value("1.9%").unwrap() - 0.019).abs() < 1e-12);
        assert!((parse_value("-0.3%").unwrap() + 0.003).abs() < 1e-12);
    }

    #[test]
    fn thousand_and_million_suffixes_scale() {
        assert_eq!(parse_value("231K"), Some(231_000.0));
        assert_eq!(parse_value("6.888M"), Some(6_888_000.0));
    }

    #[test]
    fn plain_float_passes_through() {
        assert_eq!(parse_value("54.1"), Some(54.1));
    }

    #[test]
    fn whitespace_is_trimmed_before_suffix_detection() {
        assert_eq!(parse_value(" 2.5% "), Some(0.025));
        assert_eq!(parse_value("  231K"), Some(231_000.0));
    }

    #[test]
    fn empty_and_malformed_are_missing() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("%"), None);
        assert_eq!(parse_value("1.2.3"), None);
    }

    #[test]
    fn lowercase_suffixes_are_not_recognized() {
        assert_eq!(parse_value("231k"), None);
        assert_eq!(parse_value("6.888m"), None);
    }

    #[test]
    fn unknown_suffixes_fall_through_to_direct_parse() {
        assert_eq!(parse_value("2B"), None);
    }

    #[test]
    fn string_column_parses_with_nulls_preserved() {
        let raw = Column::new(
            "actual".into(),
            vec![Some("1.9%"), Some("231K"), None, Some("n/a")],
        );
        let parsed = parse_value_column(&raw, "actual_val").unwrap();
        let values = parsed.f64().unwrap();

        assert_eq!(parsed.name().as_str(), "actual_val");
        assert!((values.get(0).unwrap() - 0.019).abs() < 1e-12);
        assert_eq!(values.get(1), Some(231_000.0));
        assert_eq!(values.get(2), None);
        assert_eq!(values.get(3), None);
    }

    #[test]
    fn numeric_column_is_cast_directly() {
        let raw = Column::new("forecast".into(), vec![Some(54.1f64), None]);
        let parsed = parse_value_column(&raw, "forecast_val").unwrap();
        let values = parsed.f64().unwrap();

        assert_eq!(values.get(0), Some(54.1));
        assert_eq!(values.get(1), None);
    }
}
