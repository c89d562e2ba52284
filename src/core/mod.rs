pub mod backup;
pub mod form;
pub mod id;
pub mod lifecycle;
pub mod log;
pub mod store;
