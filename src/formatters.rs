use crate::models::PrecipitationResult;

/// Formats a storm event into a human-readable report
pub fn format_storm_event(result: &PrecipitationResult) -> String {
    let query = &result.query;
    format!(
        "Geographic Coordinate: {}\n\
         Average Return Interval: {}\n\
         Precipitation Duration: {}\n\
         Precipitation Series: {}\n\
         Statistic: {}\n\
         Storm Event: {} {}\n",
        result.location,
        query.ari,
        query.duration,
        query.series,
        query.statistic,
        result.depth,
        query.units
    )
}

/// Formats a storm event as pretty-printed JSON
pub fn format_storm_event_json(result: &PrecipitationResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result).map(|mut json| {
        json.push('\n');
        json
    })
}
