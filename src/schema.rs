//! Column naming shared by the pipeline stages.

// Raw observation columns, in file order.
pub const COL_TIMESTAMP: &str = "timestamp";
pub const COL_SUMMARY: &str = "summary";
pub const COL_PRECIP_TYPE: &str = "precip_type";
pub const COL_TEMPERATURE: &str = "temperature_c";
pub const COL_APPARENT_TEMPERATURE: &str = "apparent_temperature_c";
pub const COL_HUMIDITY: &str = "humidity";
pub const COL_WIND_SPEED: &str = "wind_speed_kmh";
pub const COL_WIND_BEARING: &str = "wind_bearing_deg";
pub const COL_VISIBILITY: &str = "visibility_km";
pub const COL_CLOUD_COVER: &str = "cloud_cover";
pub const COL_PRESSURE: &str = "pressure_mb";
pub const COL_DAILY_SUMMARY: &str = "daily_summary";

// Aggregate columns.
pub const COL_DATE: &str = "date";
pub const COL_MONTH: &str = "month";
pub const COL_AVG_TEMPERATURE: &str = "avg_temperature_c";
pub const COL_AVG_HUMIDITY: &str = "avg_humidity";
pub const COL_AVG_WIND_SPEED: &str = "avg_wind_speed_kmh";
pub const COL_AVG_VISIBILITY: &str = "avg_visibility_km";
pub const COL_AVG_PRESSURE: &str = "avg_pressure_mb";
pub const COL_WIND_STRENGTH: &str = "wind_strength";
pub const COL_MODE_PRECIP_TYPE: &str = "mode_precip_type";

/// Timestamp layout used by the raw dataset, e.g. `2006-04-01 00:00:00.000 +0200`.
pub const RAW_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f %z";

/// Column names assigned positionally to the raw CSV.
///
/// The file ships with free-form headers ("Formatted Date", "Loud Cover", ...);
/// they are replaced wholesale so the rest of the pipeline can rely on a fixed
/// snake_case schema. The raw file must have exactly this many columns.
pub fn raw_schema_column_names() -> Vec<&'static str> {
    vec![
        COL_TIMESTAMP,
        COL_SUMMARY,
        COL_PRECIP_TYPE,
        COL_TEMPERATURE,
        COL_APPARENT_TEMPERATURE,
        COL_HUMIDITY,
        COL_WIND_SPEED,
        COL_WIND_BEARING,
        COL_VISIBILITY,
        COL_CLOUD_COVER,
        COL_PRESSURE,
        COL_DAILY_SUMMARY,
    ]
}

/// The numeric fields that get averaged, paired with their aggregate names.
pub fn numeric_aggregates() -> Vec<(&'static str, &'static str)> {
    vec![
        (COL_TEMPERATURE, COL_AVG_TEMPERATURE),
        (COL_HUMIDITY, COL_AVG_HUMIDITY),
        (COL_WIND_SPEED, COL_AVG_WIND_SPEED),
        (COL_VISIBILITY, COL_AVG_VISIBILITY),
        (COL_PRESSURE, COL_AVG_PRESSURE),
    ]
}
