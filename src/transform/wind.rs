//! Wind-strength bucketing of daily mean wind speeds.

/// Beaufort-style ladder: inclusive upper bound in km/h, paired label.
/// Anything above the last bound is "Violent Storm".
const WIND_LADDER: [(f64, &str); 11] = [
    (1.5, "Calm"),
    (3.3, "Light Air"),
    (5.4, "Light Breeze"),
    (7.9, "Gentle Breeze"),
    (10.7, "Moderate Breeze"),
    (13.8, "Fresh Breeze"),
    (17.1, "Strong Breeze"),
    (20.7, "Near Gale"),
    (24.4, "Gale"),
    (28.4, "Strong Gale"),
    (32.6, "Storm"),
];

/// Maps a wind speed in km/h to one of twelve ordered labels.
///
/// Total over all of f64: every input, including boundary values, maps to
/// exactly one label, with each threshold inclusive of its upper bound.
pub fn wind_strength(speed_kmh: f64) -> &'static str {
    for (bound, label) in WIND_LADDER {
        if speed_kmh <= bound {
            return label;
        }
    }
    "Violent Storm"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values_map_to_the_lower_bucket() {
        assert_eq!(wind_strength(1.5), "Calm");
        assert_eq!(wind_strength(3.3), "Light Air");
        assert_eq!(wind_strength(5.4), "Light Breeze");
        assert_eq!(wind_strength(32.6), "Storm");
    }

    #[test]
    fn values_above_a_boundary_move_up_one_bucket() {
        assert_eq!(wind_strength(1.6), "Light Air");
        assert_eq!(wind_strength(20.8), "Gale");
        assert_eq!(wind_strength(32.7), "Violent Storm");
        assert_eq!(wind_strength(120.0), "Violent Storm");
    }

    #[test]
    fn covers_all_twelve_labels() {
        let samples = [
            0.0, 2.0, 4.0, 6.0, 9.0, 12.0, 15.0, 19.0, 22.0, 26.0, 30.0, 40.0,
        ];
        let labels: Vec<&str> = samples.iter().map(|s| wind_strength(*s)).collect();
        assert_eq!(
            labels,
            [
                "Calm",
                "Light Air",
                "Light Breeze",
                "Gentle Breeze",
                "Moderate Breeze",
                "Fresh Breeze",
                "Strong Breeze",
                "Near Gale",
                "Gale",
                "Strong Gale",
                "Storm",
                "Violent Storm",
            ]
        );
    }

    #[test]
    fn assignment_is_monotonic_in_speed() {
        let rank = |label: &str| {
            [
                "Calm",
                "Light Air",
                "Light Breeze",
                "Gentle Breeze",
                "Moderate Breeze",
                "Fresh Breeze",
                "Strong Breeze",
                "Near Gale",
                "Gale",
                "Strong Gale",
                "Storm",
                "Violent Storm",
            ]
            .iter()
            .position(|l| *l == label)
            .unwrap()
        };

        let mut previous = 0;
        for tenth in 0..400 {
            let current = rank(wind_strength(tenth as f64 / 10.0));
            assert!(current >= previous, "rank regressed at {}", tenth);
            previous = current;
        }
    }
}
