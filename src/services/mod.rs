pub mod backend;
pub mod controller;
pub mod scheduling;
pub mod session;
