use std::path::{Path, PathBuf};
use std::time::Duration;

use dirs_next as dirs;
use geo_types::Coord;

use trail_log::capabilities::map::{AnimateOptions, MapCapability, MarkerHandle};
use trail_log::capabilities::presentation::Presentation;
use trail_log::capabilities::scheduler::{DeferredHandle, Scheduler};
use trail_log::data_types::common::map_point;
use trail_log::data_types::workout::{KindTag, Workout};
use trail_log::session::WorkoutFields;
use trail_log::storage::FileStore;
use trail_log::util::config::AppConfig;
use trail_log::util::facilities::DependenciesBuilder;
use trail_log::util::logging;
use trail_log::App;

// Console stand-ins for the real widgets, enough to watch the core work.
struct ConsoleMap {
    next: u64,
}

impl MapCapability for ConsoleMap {
    fn place_marker(
        &mut self,
        coords: Coord<f64>,
        popup_text: &str,
        style_class: &str,
    ) -> MarkerHandle {
        self.next += 1;
        println!(
            "[map] marker {} at ({:.4}, {:.4}) [{}]: {}",
            self.next, coords.y, coords.x, style_class, popup_text
        );
        MarkerHandle(self.next)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        println!("[map] marker {} removed", handle.0);
    }

    fn center_on(&mut self, coords: Coord<f64>, zoom: u32, _options: AnimateOptions) {
        println!("[map] centered on ({:.4}, {:.4}) @ z{}", coords.y, coords.x, zoom);
    }
}

struct ConsoleUi;

impl Presentation for ConsoleUi {
    fn show_form(&mut self) {}

    fn hide_form(&mut self) {}

    fn restore_form_visibility(&mut self) {}

    fn fill_form(&mut self, _workout: &Workout) {}

    fn toggle_field_for(&mut self, _tag: KindTag) {}

    fn render_list(&mut self, workouts: &[Workout]) {
        for workout in workouts {
            let metric = match (workout.pace(), workout.speed()) {
                (Some(pace), _) => format!("{:.1} min/km", pace),
                (_, Some(speed)) => format!("{:.1} km/h", speed),
                _ => String::new(),
            };
            println!(
                "[list] {} | {} km, {} min, {}",
                workout.label(),
                workout.distance(),
                workout.duration(),
                metric
            );
        }
    }

    fn notify(&mut self, message: &str) {
        println!("[ui] {}", message);
    }
}

struct InertScheduler {
    next: u64,
}

impl Scheduler for InertScheduler {
    fn schedule(&mut self, _delay: Duration) -> DeferredHandle {
        self.next += 1;
        DeferredHandle(self.next)
    }

    fn cancel(&mut self, _handle: DeferredHandle) {}
}

fn storage_base() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trail-log")
}

fn main() {
    logging::set_global_level(logging::LogLevel::VERBOSE);

    let config = AppConfig::from_file(Path::new("trail-log.toml")).unwrap_or_default();

    let store = match FileStore::new(storage_base()) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("cannot open storage: {}", err);
            return;
        }
    };

    let mut app = App::new(
        config,
        DependenciesBuilder::new()
            .with_map(Box::new(ConsoleMap { next: 0 }))
            .with_presentation(Box::new(ConsoleUi))
            .with_scheduler(Box::new(InertScheduler { next: 0 }))
            .with_byte_store(Box::new(store))
            .build(),
    );

    app.start();

    // First launch: log one run, as a click and a submit would.
    if app.workouts().is_empty() {
        app.on_map_click(map_point(46.7712, 23.6236));
        app.on_submit(WorkoutFields {
            kind: KindTag::Run,
            distance: 5.2,
            duration: 24.0,
            cadence: Some(178.0),
            elevation_gain: None,
        });
    }

    println!("{} workouts logged", app.workouts().len());
}
