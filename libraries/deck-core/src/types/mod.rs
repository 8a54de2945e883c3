mod ids;
mod slide;

pub use ids::SlideId;
pub use slide::{ManifestSlide, SlideDescriptor};
