//! Bearing projection for a horizontal compass strip.
//!
//! Everything here is plain computation, recomputed once per frame by whoever
//! owns the [`Compass`](compass::Compass) resource.

pub mod angle;
pub mod compass;
pub mod distance;
pub mod error;
pub mod fade;
pub mod heading;
pub mod marker;
pub mod projector;
pub mod settings;
pub mod strip;

pub mod prelude {
    pub use crate::compass::Compass;
    pub use crate::error::CompassError;
    pub use crate::heading::HeadingSource;
    pub use crate::marker::{Marker, MarkerId, MarkerSet, MarkerSpec};
    pub use crate::projector::{CullPolicy, ProjectionConfig};
    pub use crate::settings::CompassSettings;
    pub use crate::strip::{LabelKind, Strip, TickSize};
}
