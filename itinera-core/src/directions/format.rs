//! Labels for distances, durations and maneuvers.

use crate::TravelCost;

use super::route::{Maneuver, RouteStep};

const METRES_PER_KM: f64 = 1_000.0;
const SECONDS_PER_MINUTE: f64 = 60.0;
const MINUTES_PER_HOUR: u64 = 60;

/// Render a distance, switching to metres below one kilometre.
///
/// # Examples
/// ```
/// use itinera_core::format_distance;
///
/// assert_eq!(format_distance(5_420.0), "5.42 km");
/// assert_eq!(format_distance(850.0), "850 m");
/// assert_eq!(format_distance(0.0), "0 km");
/// ```
#[must_use]
pub fn format_distance(metres: f64) -> String {
    if metres == 0.0 || metres.is_nan() {
        return "0 km".to_owned();
    }
    let kilometres = metres / METRES_PER_KM;
    if kilometres < 1.0 {
        return format!("{} m", metres.round());
    }
    format!("{kilometres:.2} km")
}

/// Render a distance in kilometres with two decimals, whatever its size.
///
/// # Examples
/// ```
/// use itinera_core::format_distance_km;
///
/// assert_eq!(format_distance_km(850.0), "0.85 km");
/// ```
#[must_use]
pub fn format_distance_km(metres: f64) -> String {
    format!("{:.2} km", metres / METRES_PER_KM)
}

/// Render a duration as minutes, whole hours, or hours and minutes.
///
/// # Examples
/// ```
/// use itinera_core::format_duration;
///
/// assert_eq!(format_duration(1_500.0), "25 min");
/// assert_eq!(format_duration(3_600.0), "1h");
/// assert_eq!(format_duration(5_400.0), "1h 30min");
/// ```
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    if seconds <= 0.0 || seconds.is_nan() {
        return "0 min".to_owned();
    }
    let total_minutes = whole_minutes(seconds);
    if total_minutes < MINUTES_PER_HOUR {
        return format!("{total_minutes} min");
    }
    let hours = total_minutes / MINUTES_PER_HOUR;
    let minutes = total_minutes % MINUTES_PER_HOUR;
    if minutes == 0 {
        format!("{hours}h")
    } else {
        format!("{hours}h {minutes}min")
    }
}

// Callers guarantee `seconds > 0`; `as` saturates on overflow.
fn whole_minutes(seconds: f64) -> u64 {
    (seconds / SECONDS_PER_MINUTE).round() as u64
}

/// Render one step as `"<instruction> (<km> km)"`.
///
/// # Examples
/// ```
/// use itinera_core::{Maneuver, RouteStep, format_step_instruction};
///
/// let step = RouteStep {
///     maneuver: Maneuver {
///         kind: "turn".into(),
///         modifier: Some("left".into()),
///         instruction: "Turn left onto Main Street".into(),
///     },
///     distance: 2_500.0,
///     ..RouteStep::default()
/// };
/// assert_eq!(format_step_instruction(&step), "Turn left onto Main Street (2.50 km)");
/// ```
#[must_use]
pub fn format_step_instruction(step: &RouteStep) -> String {
    format!(
        "{} ({})",
        step.maneuver.instruction,
        format_distance_km(step.distance)
    )
}

/// Sum the distances and durations of every step.
///
/// An empty slice yields zero for both.
#[must_use]
pub fn total_route_info(steps: &[RouteStep]) -> TravelCost {
    steps.iter().fold(TravelCost::new(0.0, 0.0), |total, step| {
        TravelCost::new(total.distance + step.distance, total.duration + step.duration)
    })
}

/// Icon shown beside an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManeuverIcon {
    /// Any left turn.
    TurnLeft,
    /// Any right turn.
    TurnRight,
    /// Keep going; also the fallback for unrecognised maneuvers.
    Straight,
    /// Start of the route.
    Depart,
    /// End of the route.
    Arrive,
    /// Merge onto a road.
    Merge,
    /// Roundabout or rotary.
    Roundabout,
}

impl ManeuverIcon {
    /// Pick the icon for a maneuver.
    ///
    /// # Examples
    /// ```
    /// use itinera_core::{Maneuver, ManeuverIcon};
    ///
    /// let maneuver = Maneuver {
    ///     kind: "turn".into(),
    ///     modifier: Some("sharp right".into()),
    ///     instruction: String::new(),
    /// };
    /// assert_eq!(ManeuverIcon::from_maneuver(&maneuver), ManeuverIcon::TurnRight);
    /// ```
    #[must_use]
    pub fn from_maneuver(maneuver: &Maneuver) -> Self {
        match (maneuver.kind.as_str(), maneuver.modifier.as_deref()) {
            ("turn", Some("left" | "slight left" | "sharp left")) => Self::TurnLeft,
            ("turn", Some("right" | "slight right" | "sharp right")) => Self::TurnRight,
            ("depart", _) => Self::Depart,
            ("arrive", _) => Self::Arrive,
            ("merge", _) => Self::Merge,
            ("roundabout" | "rotary", _) => Self::Roundabout,
            _ => Self::Straight,
        }
    }

    /// Icon name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TurnLeft => "turn-left",
            Self::TurnRight => "turn-right",
            Self::Straight => "straight",
            Self::Depart => "depart",
            Self::Arrive => "arrive",
            Self::Merge => "merge",
            Self::Roundabout => "roundabout",
        }
    }

    /// Single-character glyph for terminal output.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::TurnLeft => '←',
            Self::TurnRight | Self::Merge => '→',
            Self::Straight => '↑',
            Self::Depart => '●',
            Self::Arrive => '◎',
            Self::Roundabout => '↻',
        }
    }
}

impl std::fmt::Display for ManeuverIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
