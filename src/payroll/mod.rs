pub mod batch;
pub mod calculator;
pub mod month;
pub mod overrides;
pub mod projector;
pub mod screen;
