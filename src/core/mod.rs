mod controller;

pub use controller::{Controller, ControllerOptions, Exit, dispatch};
