//! Distance unit conversion for kill reports.

/// Feet per engine distance unit.
pub const FEET_PER_UNIT: f64 = 0.0375;

/// Meters per foot, as used by the display.
pub const METERS_PER_FOOT: f64 = 0.3408;

/// How a player wants kill distances displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceType {
    Meters = 0,
    Feet = 1,
    Both = 2,
}

impl DistanceType {
    pub const ALL: [DistanceType; 3] = [DistanceType::Meters, DistanceType::Feet, DistanceType::Both];

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(DistanceType::Meters),
            1 => Some(DistanceType::Feet),
            2 => Some(DistanceType::Both),
            _ => None,
        }
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    /// Translation key describing this option.
    pub fn option_key(self) -> &'static str {
        match self {
            DistanceType::Meters => "default_distance_type:0",
            DistanceType::Feet => "default_distance_type:1",
            DistanceType::Both => "default_distance_type:2",
        }
    }

    pub fn format(self, units: f64) -> String {
        let feet = units_to_feet(units);
        match self {
            DistanceType::Feet => format!("{feet:.2}ft"),
            DistanceType::Meters => format!("{:.2}m", feet_to_meters(feet)),
            DistanceType::Both => format!("{:.2}m ({feet:.2}ft)", feet_to_meters(feet)),
        }
    }
}

pub fn units_to_feet(units: f64) -> f64 {
    units * FEET_PER_UNIT
}

pub fn feet_to_meters(feet: f64) -> f64 {
    feet * METERS_PER_FOOT
}

/// Straight-line distance between two origins.
pub fn between(a: [f32; 3], b: [f32; 3]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (f64::from(*x) - f64::from(*y)).powi(2))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_units_convert_consistently() {
        assert!((units_to_feet(100.0) - 3.75).abs() < 1e-9);
        assert!((feet_to_meters(3.75) - 1.278).abs() < 1e-9);

        assert_eq!(DistanceType::Feet.format(100.0), "3.75ft");
        assert_eq!(DistanceType::Meters.format(100.0), "1.28m");
        assert_eq!(DistanceType::Both.format(100.0), "1.28m (3.75ft)");
    }

    #[test]
    fn zero_distance_formats() {
        assert_eq!(DistanceType::Both.format(0.0), "0.00m (0.00ft)");
    }

    #[test]
    fn values_round_trip_through_settings() {
        for kind in DistanceType::ALL {
            assert_eq!(DistanceType::from_value(kind.value()), Some(kind));
        }
        assert_eq!(DistanceType::from_value(3), None);
    }

    #[test]
    fn between_origins() {
        let d = between([0.0, 0.0, 0.0], [3.0, 4.0, 0.0]);
        assert!((d - 5.0).abs() < 1e-9);
    }
}
