pub mod batch;
pub mod clock;
pub mod naming;
pub mod platform;
pub mod single;
pub mod sink;
