use geo_types::Coord;

/// Opaque handle to a marker placed on the external map widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimateOptions {
    pub animate: bool,
    pub pan_duration_secs: f64,
}

/// The map widget, as far as the log core is concerned: it places and removes
/// markers and can fly to a point. Click coordinates come back through
/// `App::on_map_click`.
pub trait MapCapability {
    fn place_marker(
        &mut self,
        coords: Coord<f64>,
        popup_text: &str,
        style_class: &str,
    ) -> MarkerHandle;

    fn remove_marker(&mut self, handle: MarkerHandle);

    fn center_on(&mut self, coords: Coord<f64>, zoom: u32, options: AnimateOptions);
}
