use geo_types::Coord;
use thiserror::Error;

pub type WorkoutId = i64;

pub trait Identifiable {
    fn as_id(&self) -> WorkoutId;
}

// geo convention: x is longitude, y is latitude.
pub fn map_point(lat: f64, lng: f64) -> Coord<f64> {
    Coord { x: lng, y: lat }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("workout id already present: {0}")]
    DuplicateId(WorkoutId),

    #[error("no workout at index {0}")]
    IndexOutOfRange(usize),

    #[error("no workout with id {0}")]
    NotFound(WorkoutId),

    #[error("storage rejected the write: {0}")]
    Persistence(String),

    #[error("stored workouts are unreadable: {0}")]
    CorruptData(String),

    #[error("bad configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
