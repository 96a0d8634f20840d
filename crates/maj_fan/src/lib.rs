//! Full-Adder Network (FAN): the intermediate representation shared by every
//! majority synthesis pass.
//!
//! A [`Fan`] is an ordered list of [`FullAdder`] operations wired together by
//! [`Signal`] names, plus the designated decision output and the named
//! constants it references. Passes consume a `Fan` and produce a new one.

#![warn(missing_docs)]

pub mod adder;
pub mod error;
pub mod eval;
pub mod fan;
pub mod names;
pub mod signal;

pub use adder::{full_add, AdderKind, FullAdder};
pub use error::FanError;
pub use eval::SignalValues;
pub use fan::{ConstDecl, Fan};
pub use names::NameGen;
pub use signal::Signal;
