//! Day-list parsing.
//!
//! Departments store period days as comma-separated text ("11, 26").
//! Tokens that are empty or non-numeric are dropped silently; order is
//! preserved because list position carries meaning for the resolver.

/// Parses a comma-separated day list into an ordered sequence of integers.
///
/// Empty or missing input yields an empty sequence, not an error.
///
/// # Example
///
/// ```
/// use pay_period_engine::schedule::parse_day_list;
///
/// assert_eq!(parse_day_list(Some("11, 26")), vec![11, 26]);
/// assert_eq!(parse_day_list(Some("10,, x, 25")), vec![10, 25]);
/// assert_eq!(parse_day_list(None), Vec::<u32>::new());
/// ```
pub fn parse_day_list(input: Option<&str>) -> Vec<u32> {
    let Some(input) = input else {
        return Vec::new();
    };
    input
        .split(',')
        .filter_map(|token| token.trim().parse::<u32>().ok())
        .collect()
}
