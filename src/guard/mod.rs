pub mod form_guard;
pub mod gate;
pub mod unload;
