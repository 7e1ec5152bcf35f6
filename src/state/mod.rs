//! Component state that does not touch the DOM.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page component keeps its logic here and its browser wiring in
//! `components`, so the logic can be tested natively against fakes.

pub mod carousel;
pub mod consent;
pub mod stat;
