// Compass point to degrees conversion

/// The sixteen compass points, clockwise from north, 22.5° apart.
const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

const STEP_DEGREES: f64 = 22.5;

/// Convert a compass abbreviation ("N", "SSW", ...) to degrees in `[0, 360)`.
/// Unknown or empty input yields 0.
pub fn compass_to_degrees(direction: &str) -> f64 {
    let direction = direction.trim();
    COMPASS_POINTS
        .iter()
        .position(|p| *p == direction)
        .map(|idx| idx as f64 * STEP_DEGREES)
        .unwrap_or(0.0)
}
