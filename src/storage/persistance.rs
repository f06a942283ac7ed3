use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

use super::ByteStore;
use crate::data_types::common::{map_point, Error, Result, WorkoutId};
use crate::data_types::workout::{KindTag, Workout, WorkoutKind};
use crate::logvbln;

/// Serialized shape of one record: camelCase names, coords as a [lat, lng]
/// pair, no derived metrics, no interaction counter.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredWorkout {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coords: [f64; 2],
    distance: f64,
    duration: f64,
    kind: KindTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    elevation_gain: Option<f64>,
    label: String,
}

impl StoredWorkout {
    fn from_workout(workout: &Workout) -> Self {
        let (cadence, elevation_gain) = match workout.kind() {
            WorkoutKind::Run { cadence } => (Some(*cadence), None),
            WorkoutKind::Ride { elevation_gain } => (None, Some(*elevation_gain)),
        };

        Self {
            id: workout.id(),
            created_at: workout.created_at(),
            coords: [workout.lat(), workout.lng()],
            distance: workout.distance(),
            duration: workout.duration(),
            kind: workout.tag(),
            cadence,
            elevation_gain,
            label: workout.label().to_string(),
        }
    }

    fn into_workout(self) -> Result<Workout> {
        let kind = match self.kind {
            KindTag::Run => WorkoutKind::Run {
                cadence: self
                    .cadence
                    .ok_or_else(|| Error::CorruptData("run record without cadence".to_string()))?,
            },
            KindTag::Ride => WorkoutKind::Ride {
                elevation_gain: self.elevation_gain.ok_or_else(|| {
                    Error::CorruptData("ride record without elevation gain".to_string())
                })?,
            },
        };

        Workout::restore(
            self.id,
            self.created_at,
            map_point(self.coords[0], self.coords[1]),
            self.distance,
            self.duration,
            kind,
            self.label,
        )
        .map_err(|e| Error::CorruptData(e.to_string()))
    }
}

/// Round-trips the full record sequence through the external byte store
/// under a single fixed key.
pub struct Persistance {
    key: String,
    store: Box<dyn ByteStore>,
}

impl Persistance {
    const CC: &'static str = "Persistance";

    pub fn new(key: &str, store: Box<dyn ByteStore>) -> Self {
        Self {
            key: key.to_string(),
            store,
        }
    }

    pub fn save(&mut self, workouts: &[Workout]) -> Result<()> {
        let stored: Vec<StoredWorkout> = workouts.iter().map(StoredWorkout::from_workout).collect();

        let bytes =
            serde_json::to_vec(&stored).map_err(|e| Error::Persistence(e.to_string()))?;
        self.store.set(&self.key, &bytes)?;

        logvbln!("saved {} workouts", stored.len());

        Ok(())
    }

    pub fn load(&self) -> Result<Option<Vec<Workout>>> {
        let bytes = match self.store.get(&self.key) {
            Some(bytes) => bytes,
            None => return Ok(None),
        };

        let stored: Vec<StoredWorkout> =
            serde_json::from_slice(&bytes).map_err(|e| Error::CorruptData(e.to_string()))?;

        let mut workouts = Vec::with_capacity(stored.len());
        for record in stored {
            workouts.push(record.into_workout()?);
        }

        logvbln!("loaded {} workouts", workouts.len());

        Ok(Some(workouts))
    }

    pub fn wipe(&mut self) {
        self.store.remove(&self.key);
    }
}
