pub mod parking_spot_controller;

pub use parking_spot_controller::configure;
