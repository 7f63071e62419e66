use crate::Position;

/// Number of fractional digits shown for each component.
pub const DECIMAL_DIGITS: usize = 6;

/// Coordinate of the last clicked spot, as shown in the coordinates panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedCoordinate {
    pub latitude: String,
    pub longitude: String,
}

impl DisplayedCoordinate {
    pub fn from_position(position: Position) -> Self {
        Self {
            latitude: format_degrees(position.y()),
            longitude: format_degrees(position.x()),
        }
    }
}

/// Format with [`DECIMAL_DIGITS`] digits. Negative zero is shown without a sign, while tiny
/// negative values which only round to zero keep it.
fn format_degrees(value: f64) -> String {
    let value = if value == 0. { 0. } else { value };
    format!("{value:.DECIMAL_DIGITS$}")
}
