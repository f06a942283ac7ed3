use crate::data_types::common::{Error, Identifiable, Result, WorkoutId};
use crate::data_types::workout::Workout;

/// Change notification recorded by every mutation, drained by the
/// reconciliation step.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Appended(WorkoutId),
    Replaced { old: WorkoutId, new: WorkoutId },
    Removed(WorkoutId),
    Cleared,
}

/// The authoritative ordered collection of workout records.
#[derive(Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
    pending: Vec<StoreEvent>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Load path: restored records enter silently, there is nothing to
    // reconcile against yet.
    pub fn from_records(workouts: Vec<Workout>) -> Self {
        Self {
            workouts,
            pending: Vec::new(),
        }
    }

    pub fn append(&mut self, workout: Workout) -> Result<()> {
        let id = workout.as_id();

        if self.find_by_id(id).is_some() {
            return Err(Error::DuplicateId(id));
        }

        self.workouts.push(workout);
        self.pending.push(StoreEvent::Appended(id));

        Ok(())
    }

    pub fn replace_at(&mut self, index: usize, workout: Workout) -> Result<()> {
        if index >= self.workouts.len() {
            return Err(Error::IndexOutOfRange(index));
        }

        let old = self.workouts[index].as_id();
        let new = workout.as_id();

        if new != old && self.find_by_id(new).is_some() {
            return Err(Error::DuplicateId(new));
        }

        // Remove-then-append: the replacement lands at the end of the order.
        self.workouts.remove(index);
        self.workouts.push(workout);
        self.pending.push(StoreEvent::Replaced { old, new });

        Ok(())
    }

    pub fn remove_by_id(&mut self, id: WorkoutId) -> Result<Workout> {
        let index = self.index_of(id).ok_or(Error::NotFound(id))?;

        let removed = self.workouts.remove(index);
        self.pending.push(StoreEvent::Removed(id));

        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.workouts.clear();
        self.pending.push(StoreEvent::Cleared);
    }

    pub fn find_by_id(&self, id: WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.as_id() == id)
    }

    pub fn index_of(&self, id: WorkoutId) -> Option<usize> {
        self.workouts.iter().position(|w| w.as_id() == id)
    }

    pub fn at(&self, index: usize) -> Option<&Workout> {
        self.workouts.get(index)
    }

    pub fn all(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter()
    }

    pub fn records(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::data_types::common::map_point;

    fn run(day: u32) -> Workout {
        let at = Utc.with_ymd_and_hms(2023, 4, day, 9, 30, 0).unwrap();
        Workout::run_at(at, map_point(32.0, -32.0), 5.2, 24.0, 178.0).unwrap()
    }

    fn ride(day: u32) -> Workout {
        let at = Utc.with_ymd_and_hms(2023, 4, day, 17, 0, 0).unwrap();
        Workout::ride_at(at, map_point(32.0, -32.0), 27.0, 95.0, 523.0).unwrap()
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut store = WorkoutStore::new();
        let (a, b) = (run(14), ride(15));
        let (id_a, id_b) = (a.as_id(), b.as_id());

        store.append(a).unwrap();
        store.append(b).unwrap();

        let ids: Vec<WorkoutId> = store.all().map(|w| w.as_id()).collect();
        assert_eq!(ids, vec![id_a, id_b]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.index_of(id_b), Some(1));
    }

    #[test]
    fn append_rejects_duplicate_ids() {
        let mut store = WorkoutStore::new();
        let a = run(14);
        let id = a.as_id();

        store.append(a.clone()).unwrap();
        assert_eq!(store.append(a), Err(Error::DuplicateId(id)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn replace_at_moves_the_record_to_the_end() {
        let mut store = WorkoutStore::new();
        let (a, b, c) = (run(14), ride(15), run(16));
        let id_b = b.as_id();

        store.append(a).unwrap();
        store.append(b).unwrap();
        store.append(c).unwrap();
        store.take_events();

        let replacement = ride(17);
        let id_new = replacement.as_id();
        store.replace_at(1, replacement).unwrap();

        // The edited slot is gone and the replacement is last.
        assert_eq!(store.len(), 3);
        assert_eq!(store.find_by_id(id_b), None);
        assert_eq!(store.records().last().map(|w| w.as_id()), Some(id_new));
        assert_eq!(
            store.take_events(),
            vec![StoreEvent::Replaced {
                old: id_b,
                new: id_new
            }]
        );
    }

    #[test]
    fn replace_at_rejects_bad_index() {
        let mut store = WorkoutStore::new();
        store.append(run(14)).unwrap();

        assert_eq!(
            store.replace_at(3, ride(15)),
            Err(Error::IndexOutOfRange(3))
        );
    }

    #[test]
    fn remove_by_id_removes_exactly_one() {
        let mut store = WorkoutStore::new();
        let (a, b) = (run(14), ride(15));
        let id_a = a.as_id();

        store.append(a).unwrap();
        store.append(b).unwrap();

        let removed = store.remove_by_id(id_a).unwrap();
        assert_eq!(removed.as_id(), id_a);
        assert_eq!(store.len(), 1);
        assert_eq!(store.remove_by_id(id_a), Err(Error::NotFound(id_a)));
    }

    #[test]
    fn clear_empties_the_store() {
        let mut store = WorkoutStore::new();
        store.append(run(14)).unwrap();
        store.append(ride(15)).unwrap();

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.all().count(), 0);
    }

    #[test]
    fn all_is_restartable() {
        let mut store = WorkoutStore::new();
        store.append(run(14)).unwrap();
        store.append(ride(15)).unwrap();

        assert_eq!(store.all().count(), 2);
        assert_eq!(store.all().count(), 2);
    }

    #[test]
    fn mutations_queue_events_until_drained() {
        let mut store = WorkoutStore::new();
        let a = run(14);
        let id_a = a.as_id();

        store.append(a).unwrap();
        store.clear();

        assert_eq!(
            store.take_events(),
            vec![StoreEvent::Appended(id_a), StoreEvent::Cleared]
        );
        assert_eq!(store.take_events(), vec![]);
    }

    #[test]
    fn loaded_records_emit_no_events() {
        let store = WorkoutStore::from_records(vec![run(14), ride(15)]);
        assert_eq!(store.len(), 2);

        let mut store = store;
        assert_eq!(store.take_events(), vec![]);
    }
}
