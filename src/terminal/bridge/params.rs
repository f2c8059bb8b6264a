use crate::models::rates_request::RatesRequest;

/// Builds the query string for a `/rates_range` request.
///
/// The bridge takes the date bounds as Unix epoch seconds, mirroring the
/// terminal's own bulk-rates call.
pub fn construct_query(request: &RatesRequest) -> Vec<(String, String)> {
    vec![
        ("symbol".to_string(), request.symbol.clone()),
        (
            "timeframe".to_string(),
            request.timeframe.as_str().to_string(),
        ),
        ("from".to_string(), request.start.timestamp().to_string()),
        ("to".to_string(), request.end.timestamp().to_string()),
    ]
}
