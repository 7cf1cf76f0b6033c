//! Annotation data model.

mod annotation;
mod collection;

pub use annotation::{Annotation, AnnotationId, Edge, GrabMargin};
pub use collection::{AnnotationCollection, ExportedRange};
