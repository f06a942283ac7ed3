use geo_types::Coord;

use crate::data_types::common::{Error, Result, WorkoutId};
use crate::data_types::workout::{KindTag, Workout};

/// Where a background click landed, as reported by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Form,
    WorkoutEntry,
    Elsewhere,
}

/// Typed values read out of the input form.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutFields {
    pub kind: KindTag,
    pub distance: f64,
    pub duration: f64,
    pub cadence: Option<f64>,
    pub elevation_gain: Option<f64>,
}

impl WorkoutFields {
    /// Every required input must be finite and strictly positive; which extra
    /// field is required follows the selected kind.
    pub fn validate(&self) -> Result<()> {
        let mut required = vec![("distance", Some(self.distance)), ("duration", Some(self.duration))];

        match self.kind {
            KindTag::Run => required.push(("cadence", self.cadence)),
            KindTag::Ride => required.push(("elevation gain", self.elevation_gain)),
        }

        for (what, value) in required {
            match value {
                Some(value) if value.is_finite() && value > 0.0 => {}
                Some(_) => {
                    return Err(Error::Validation(format!(
                        "{} must be a positive number",
                        what
                    )))
                }
                None => return Err(Error::Validation(format!("{} is required", what))),
            }
        }

        Ok(())
    }

    pub fn build_workout(&self, coords: Coord<f64>) -> Result<Workout> {
        self.validate()?;

        match self.kind {
            KindTag::Run => {
                let cadence = self
                    .cadence
                    .ok_or_else(|| Error::Validation("cadence is required".to_string()))?;
                Workout::run(coords, self.distance, self.duration, cadence)
            }
            KindTag::Ride => {
                let elevation_gain = self
                    .elevation_gain
                    .ok_or_else(|| Error::Validation("elevation gain is required".to_string()))?;
                Workout::ride(coords, self.distance, self.duration, elevation_gain)
            }
        }
    }
}

/// The record an open form is bound to when editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditTarget {
    pub index: usize,
    pub original: WorkoutId,
}

/// Mutually-exclusive editing state: at most one form in flight.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EditSession {
    #[default]
    Idle,
    Composing {
        coords: Coord<f64>,
        target: Option<EditTarget>,
    },
}

impl EditSession {
    pub fn is_composing(&self) -> bool {
        matches!(self, EditSession::Composing { .. })
    }

    /// True only for an edit of an existing record.
    pub fn is_editing(&self) -> bool {
        matches!(
            self,
            EditSession::Composing {
                target: Some(_),
                ..
            }
        )
    }
}
