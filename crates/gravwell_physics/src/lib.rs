pub mod body;
pub mod domain;
pub mod drawable;
pub mod forces;
pub mod placement;

pub use body::{Body, BodyKind, BodyUpdate, Bounds};
pub use domain::Domain;
pub use drawable::{Drawable, DrawableDesc, DrawableStore, DrawableTable, Shape};
pub use forces::PointMass;
