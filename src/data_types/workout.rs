use chrono::{DateTime, Datelike, Utc};
use geo_types::Coord;
use serde_derive::{Deserialize, Serialize};

use crate::data_types::common::{Error, Identifiable, Result, WorkoutId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindTag {
    Run,
    Ride,
}

impl KindTag {
    pub fn gerund(&self) -> &'static str {
        match self {
            KindTag::Run => "Running",
            KindTag::Ride => "Riding",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            KindTag::Run => "🏃‍♂️",
            KindTag::Ride => "🚴‍♀️",
        }
    }

    pub fn style_class(&self) -> &'static str {
        match self {
            KindTag::Run => "run-popup",
            KindTag::Ride => "ride-popup",
        }
    }
}

/// Kind-specific metrics of a workout.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutKind {
    Run { cadence: f64 },
    Ride { elevation_gain: f64 },
}

impl WorkoutKind {
    pub fn tag(&self) -> KindTag {
        match self {
            WorkoutKind::Run { .. } => KindTag::Run,
            WorkoutKind::Ride { .. } => KindTag::Ride,
        }
    }
}

pub fn format_label(tag: KindTag, created_at: &DateTime<Utc>) -> String {
    format!(
        "{} on {} {}",
        tag.gerund(),
        created_at.format("%B"),
        created_at.day()
    )
}

/// One logged activity. Identity and metrics are fixed at construction; an
/// edit rebuilds the whole record.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coords: Coord<f64>,
    distance: f64,
    duration: f64,
    kind: WorkoutKind,
    label: String,
    interactions: u32,
}

fn ensure_positive(value: f64, what: &str) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::Validation(format!(
            "{} must be a positive number",
            what
        )));
    }

    Ok(())
}

fn validate_kind(kind: &WorkoutKind) -> Result<()> {
    match kind {
        WorkoutKind::Run { cadence } => ensure_positive(*cadence, "cadence"),
        WorkoutKind::Ride { elevation_gain } => ensure_positive(*elevation_gain, "elevation gain"),
    }
}

// Ids are the last ten digits of the creation timestamp in microseconds.
fn id_for(created_at: &DateTime<Utc>) -> WorkoutId {
    created_at.timestamp_micros().rem_euclid(10_000_000_000)
}

impl Workout {
    pub fn run(coords: Coord<f64>, distance: f64, duration: f64, cadence: f64) -> Result<Self> {
        Self::run_at(Utc::now(), coords, distance, duration, cadence)
    }

    pub fn run_at(
        created_at: DateTime<Utc>,
        coords: Coord<f64>,
        distance: f64,
        duration: f64,
        cadence: f64,
    ) -> Result<Self> {
        Self::build(
            created_at,
            coords,
            distance,
            duration,
            WorkoutKind::Run { cadence },
        )
    }

    pub fn ride(
        coords: Coord<f64>,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Result<Self> {
        Self::ride_at(Utc::now(), coords, distance, duration, elevation_gain)
    }

    pub fn ride_at(
        created_at: DateTime<Utc>,
        coords: Coord<f64>,
        distance: f64,
        duration: f64,
        elevation_gain: f64,
    ) -> Result<Self> {
        Self::build(
            created_at,
            coords,
            distance,
            duration,
            WorkoutKind::Ride { elevation_gain },
        )
    }

    fn build(
        created_at: DateTime<Utc>,
        coords: Coord<f64>,
        distance: f64,
        duration: f64,
        kind: WorkoutKind,
    ) -> Result<Self> {
        ensure_positive(distance, "distance")?;
        ensure_positive(duration, "duration")?;
        validate_kind(&kind)?;

        let label = format_label(kind.tag(), &created_at);

        Ok(Self {
            id: id_for(&created_at),
            created_at,
            coords,
            distance,
            duration,
            kind,
            label,
            interactions: 0,
        })
    }

    // Rebuild from persisted parts. Identity fields come back verbatim; the
    // numeric invariants are still enforced.
    pub(crate) fn restore(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coords: Coord<f64>,
        distance: f64,
        duration: f64,
        kind: WorkoutKind,
        label: String,
    ) -> Result<Self> {
        ensure_positive(distance, "distance")?;
        ensure_positive(duration, "duration")?;
        validate_kind(&kind)?;

        Ok(Self {
            id,
            created_at,
            coords,
            distance,
            duration,
            kind,
            label,
            interactions: 0,
        })
    }

    pub fn id(&self) -> WorkoutId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn coords(&self) -> Coord<f64> {
        self.coords
    }

    pub fn lat(&self) -> f64 {
        self.coords.y
    }

    pub fn lng(&self) -> f64 {
        self.coords.x
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn kind(&self) -> &WorkoutKind {
        &self.kind
    }

    pub fn tag(&self) -> KindTag {
        self.kind.tag()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Minutes per kilometer; runs only.
    pub fn pace(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Run { .. } => Some(self.duration / self.distance),
            WorkoutKind::Ride { .. } => None,
        }
    }

    /// Kilometers per hour; rides only.
    pub fn speed(&self) -> Option<f64> {
        match self.kind {
            WorkoutKind::Run { .. } => None,
            WorkoutKind::Ride { .. } => Some(self.distance / self.duration),
        }
    }

    pub fn popup_text(&self) -> String {
        format!("{} {}", self.tag().emoji(), self.label)
    }

    pub fn interactions(&self) -> u32 {
        self.interactions
    }

    pub fn register_interaction(&mut self) {
        self.interactions += 1;
    }
}

impl Identifiable for Workout {
    fn as_id(&self) -> WorkoutId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::data_types::common::map_point;

    fn april_14() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 4, 14, 9, 30, 0).unwrap()
    }

    #[test]
    fn run_pace_is_duration_over_distance() {
        let run = Workout::run_at(april_14(), map_point(32.0, -32.0), 5.2, 24.0, 178.0).unwrap();

        assert_eq!(run.pace(), Some(24.0 / 5.2));
        assert!((run.pace().unwrap() - 4.615).abs() < 1e-3);
        assert_eq!(run.speed(), None);
    }

    #[test]
    fn ride_speed_is_distance_over_duration() {
        let ride = Workout::ride_at(april_14(), map_point(32.0, -32.0), 27.0, 95.0, 523.0).unwrap();

        assert_eq!(ride.speed(), Some(27.0 / 95.0));
        assert_eq!(ride.pace(), None);
    }

    #[test]
    fn label_is_gerund_month_and_day() {
        let run = Workout::run_at(april_14(), map_point(32.0, -32.0), 5.2, 24.0, 178.0).unwrap();
        let ride = Workout::ride_at(april_14(), map_point(32.0, -32.0), 27.0, 95.0, 523.0).unwrap();

        assert_eq!(run.label(), "Running on April 14");
        assert_eq!(ride.label(), "Riding on April 14");
    }

    #[test]
    fn popup_text_carries_kind_emoji() {
        let run = Workout::run_at(april_14(), map_point(32.0, -32.0), 5.2, 24.0, 178.0).unwrap();

        assert_eq!(run.popup_text(), "🏃‍♂️ Running on April 14");
        assert_eq!(run.tag().style_class(), "run-popup");
    }

    #[test]
    fn non_positive_metrics_are_rejected() {
        let at = april_14();
        let p = map_point(32.0, -32.0);

        assert!(matches!(
            Workout::run_at(at, p, 0.0, 24.0, 178.0),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            Workout::run_at(at, p, 5.2, -1.0, 178.0),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            Workout::run_at(at, p, 5.2, 24.0, 0.0),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            Workout::ride_at(at, p, 27.0, 95.0, -3.0),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn non_finite_metrics_are_rejected() {
        let at = april_14();
        let p = map_point(32.0, -32.0);

        assert!(matches!(
            Workout::run_at(at, p, f64::NAN, 24.0, 178.0),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            Workout::run_at(at, p, 5.2, f64::INFINITY, 178.0),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn id_is_last_ten_digits_of_creation_timestamp() {
        let at = april_14();
        let run = Workout::run_at(at, map_point(32.0, -32.0), 5.2, 24.0, 178.0).unwrap();

        assert_eq!(run.id(), at.timestamp_micros() % 10_000_000_000);
        assert_eq!(run.as_id(), run.id());
    }

    #[test]
    fn interactions_start_at_zero_and_count_up() {
        let mut run = Workout::run_at(april_14(), map_point(32.0, -32.0), 5.2, 24.0, 178.0).unwrap();

        assert_eq!(run.interactions(), 0);
        run.register_interaction();
        run.register_interaction();
        assert_eq!(run.interactions(), 2);
    }

    #[test]
    fn restore_keeps_identity_but_checks_invariants() {
        let restored = Workout::restore(
            42,
            april_14(),
            map_point(32.0, -32.0),
            5.2,
            24.0,
            WorkoutKind::Run { cadence: 178.0 },
            "Running on April 14".to_string(),
        )
        .unwrap();

        assert_eq!(restored.id(), 42);
        assert_eq!(restored.label(), "Running on April 14");
        assert_eq!(restored.interactions(), 0);

        assert!(matches!(
            Workout::restore(
                42,
                april_14(),
                map_point(32.0, -32.0),
                -5.2,
                24.0,
                WorkoutKind::Run { cadence: 178.0 },
                "Running on April 14".to_string(),
            ),
            Err(Error::Validation(_))
        ));
    }
}
