pub mod gesture;
pub mod sensor;
