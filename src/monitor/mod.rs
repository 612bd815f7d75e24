//! Core runtime logic.
//!
//! This module contains the pointer polling loop, the zone matching and
//! the keystroke injection that together make up a running hot corner
//! session.

pub mod dispatcher;
pub mod executor;
pub mod pointer_observer;

pub use dispatcher::*;
pub use executor::*;
pub use pointer_observer::*;
