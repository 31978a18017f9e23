//! Background jobs spawned at daemon startup.

pub mod reminder;
