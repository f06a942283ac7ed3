use crate::data_types::workout::{KindTag, Workout};

/// The form-and-list surface. Field values come back through `App::on_submit`
/// as typed primitives; selection, deletion and background clicks through the
/// other `App::on_*` entry points.
pub trait Presentation {
    fn show_form(&mut self);

    /// Hide the form and clear its inputs.
    fn hide_form(&mut self);

    /// Deferred counterpart of `hide_form`: make the form slot displayable
    /// again once the hide has settled.
    fn restore_form_visibility(&mut self);

    /// Prefill the form with an existing record's values before an edit.
    fn fill_form(&mut self, workout: &Workout);

    fn toggle_field_for(&mut self, tag: KindTag);

    /// Full teardown and rebuild of the visible list.
    fn render_list(&mut self, workouts: &[Workout]);

    /// User-facing warning (bad input, failed persistence).
    fn notify(&mut self, message: &str);
}
