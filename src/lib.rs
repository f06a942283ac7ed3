use std::collections::HashMap;
use std::time::Duration;

use geo_types::Coord;

use capabilities::map::{AnimateOptions, MapCapability, MarkerHandle};
use capabilities::presentation::Presentation;
use capabilities::scheduler::{DeferredHandle, Scheduler};
use data_types::common::{Identifiable, WorkoutId};
use data_types::workout::KindTag;
use session::{ClickTarget, EditSession, EditTarget, WorkoutFields};
use storage::persistance::Persistance;
use storage::workout_store::{StoreEvent, WorkoutStore};
use util::config::AppConfig;
use util::facilities::{Facilities, Required};

pub mod capabilities;
pub mod data_types;
pub mod session;
pub mod storage;
pub mod util;

/// The coordinator: owns the record collection, the persistence adapter, the
/// external capabilities and the marker registry, and runs the create/edit
/// workflow. The host wires its event sources to the `on_*` entry points.
pub struct App {
    config: AppConfig,
    workouts: WorkoutStore,
    persistance: Persistance,
    map: Box<dyn MapCapability>,
    presentation: Box<dyn Presentation>,
    scheduler: Box<dyn Scheduler>,
    markers: HashMap<WorkoutId, MarkerHandle>,
    session: EditSession,
    pending_reshow: Option<DeferredHandle>,
}

impl App {
    const CC: &'static str = "App";

    pub fn new(config: AppConfig, mut facilities: Facilities) -> Self {
        facilities.check(&[
            Required::Map,
            Required::Presentation,
            Required::Scheduler,
            Required::ByteStore,
        ]);

        let persistance = Persistance::new(&config.storage_key, facilities.take_byte_store());

        let workouts = match persistance.load() {
            Ok(Some(records)) => WorkoutStore::from_records(records),
            Ok(None) => WorkoutStore::new(),
            Err(err) => {
                // Unreadable state is dropped rather than crashing startup.
                logln!("discarding persisted workouts: {}", err);
                WorkoutStore::new()
            }
        };

        Self {
            config,
            workouts,
            persistance,
            map: facilities.take_map(),
            presentation: facilities.take_presentation(),
            scheduler: facilities.take_scheduler(),
            markers: HashMap::new(),
            session: EditSession::Idle,
            pending_reshow: None,
        }
    }

    /// Bring the restored log onto the screen: one marker per record plus the
    /// full list.
    pub fn start(&mut self) {
        for workout in self.workouts.all() {
            let handle = self.map.place_marker(
                workout.coords(),
                &workout.popup_text(),
                workout.tag().style_class(),
            );
            self.markers.insert(workout.as_id(), handle);
        }

        self.presentation.render_list(self.workouts.records());
    }

    pub fn workouts(&self) -> &WorkoutStore {
        &self.workouts
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn on_map_click(&mut self, coords: Coord<f64>) {
        if self.session.is_editing() {
            // One edit in flight; a stray map click must not rebind the form.
            return;
        }

        self.cancel_pending_reshow();
        self.session = EditSession::Composing {
            coords,
            target: None,
        };
        self.presentation.show_form();
    }

    pub fn on_select_workout(&mut self, id: WorkoutId) {
        let index = match self.workouts.index_of(id) {
            Some(index) => index,
            None => {
                logln!("selected workout {} is gone", id);
                return;
            }
        };

        if let Some(workout) = self.workouts.at(index) {
            self.map.center_on(
                workout.coords(),
                self.config.map_zoom,
                AnimateOptions {
                    animate: true,
                    pan_duration_secs: self.config.pan_duration_secs,
                },
            );
        }

        // Centering always happens; opening a second edit does not.
        if self.session.is_editing() {
            return;
        }

        self.cancel_pending_reshow();

        if let Some(workout) = self.workouts.at(index) {
            self.session = EditSession::Composing {
                coords: workout.coords(),
                target: Some(EditTarget {
                    index,
                    original: id,
                }),
            };
            self.presentation.fill_form(workout);
        }

        self.presentation.show_form();
    }

    pub fn on_kind_changed(&mut self, tag: KindTag) {
        self.presentation.toggle_field_for(tag);
    }

    pub fn on_submit(&mut self, fields: WorkoutFields) {
        let (coords, target) = match self.session {
            EditSession::Composing { coords, target } => (coords, target),
            EditSession::Idle => {
                logln!("submit without an open form");
                return;
            }
        };

        let workout = match fields.build_workout(coords) {
            Ok(workout) => workout,
            Err(err) => {
                // Bad input keeps the form open.
                self.presentation.notify(&err.to_string());
                return;
            }
        };

        let committed = match target {
            Some(EditTarget { index, .. }) => self.workouts.replace_at(index, workout),
            None => self.workouts.append(workout),
        };

        self.session = EditSession::Idle;
        self.hide_form();

        if let Err(err) = committed {
            // Defensive: a referential slip is logged and dropped, never fatal.
            logln!("commit failed: {}", err);
            return;
        }

        self.reconcile();
    }

    pub fn on_background_click(&mut self, target: ClickTarget) {
        if !self.session.is_editing() || target != ClickTarget::Elsewhere {
            return;
        }

        self.session = EditSession::Idle;
        self.hide_form();
        self.reconcile();
    }

    pub fn on_delete_one(&mut self, id: WorkoutId) {
        match self.workouts.remove_by_id(id) {
            Ok(_) => self.reconcile(),
            Err(err) => {
                logln!("delete failed: {}", err);
            }
        }
    }

    pub fn on_delete_all(&mut self) {
        self.workouts.clear();
        self.reconcile();
    }

    pub fn on_deferred(&mut self, handle: DeferredHandle) {
        if self.pending_reshow == Some(handle) {
            self.pending_reshow = None;
            self.presentation.restore_form_visibility();
        }
    }

    // Consume the store's change notifications to keep the marker registry
    // symmetric, then rebuild the list and persist. A failed write is only
    // reported; the in-memory log stays authoritative.
    fn reconcile(&mut self) {
        for event in self.workouts.take_events() {
            match event {
                StoreEvent::Appended(id) => self.place_marker(id),
                StoreEvent::Replaced { old, new } => {
                    self.remove_marker(old);
                    self.place_marker(new);
                }
                StoreEvent::Removed(id) => self.remove_marker(id),
                StoreEvent::Cleared => {
                    for (_, handle) in self.markers.drain() {
                        self.map.remove_marker(handle);
                    }
                }
            }
        }

        self.presentation.render_list(self.workouts.records());

        if let Err(err) = self.persistance.save(self.workouts.records()) {
            logln!("{}", err);
            self.presentation.notify(&err.to_string());
        }
    }

    fn place_marker(&mut self, id: WorkoutId) {
        let workout = match self.workouts.find_by_id(id) {
            Some(workout) => workout,
            None => return,
        };

        let handle = self.map.place_marker(
            workout.coords(),
            &workout.popup_text(),
            workout.tag().style_class(),
        );
        self.markers.insert(id, handle);
    }

    fn remove_marker(&mut self, id: WorkoutId) {
        if let Some(handle) = self.markers.remove(&id) {
            self.map.remove_marker(handle);
        }
    }

    fn hide_form(&mut self) {
        self.presentation.hide_form();
        self.cancel_pending_reshow();
        self.pending_reshow = Some(
            self.scheduler
                .schedule(Duration::from_millis(self.config.form_reshow_delay_ms)),
        );
    }

    fn cancel_pending_reshow(&mut self) {
        if let Some(handle) = self.pending_reshow.take() {
            self.scheduler.cancel(handle);
        }
    }
}
