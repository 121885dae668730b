pub mod annotations;
mod config;
pub mod convert;
mod diagnostics;
mod error;
mod models;
mod services;

pub use annotations::{
    parse_subnet_ids, AnnotationValue, Annotations, ObservedAnnotations,
    ANNOTATION_COMPARTMENT_ID, ANNOTATION_SUBNET,
};
pub use config::{ConfigProvider, StaticConfig, COMPARTMENT_ID_KEY};
pub use diagnostics::{Diagnostics, RecordedDiagnostics, StderrDiagnostics};
pub use error::{AppError, Result};
pub use models::{App, AppDraft};
pub use services::{ApplicationService, NO_APPS_FOUND};
