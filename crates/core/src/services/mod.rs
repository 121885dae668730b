mod application;

pub use application::{ApplicationService, NO_APPS_FOUND};
