//! Hooks for code outside the widget: decoration annotations drawn by the
//! `extra` hook and observers of widget lifecycle events.

pub mod annotations;
pub mod observers;

pub use annotations::{Annotation, AnnotationAnchor, Annotations};
pub use observers::{ComponentEvent, ComponentObserver};
