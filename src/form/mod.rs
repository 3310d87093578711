pub mod form_model;
pub mod serialize;
pub mod snapshot;
