use walkers::InvalidZoom;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// Initial zoom level of the view is not supported by the map engine.
    #[error(transparent)]
    InvalidZoom(#[from] InvalidZoom),

    /// Action needs a live map, but the component is not mounted.
    #[error("map is not mounted")]
    NotMounted,
}
