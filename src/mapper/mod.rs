//! Value Mapper subsystem
//!
//! Walks a resolved Shape in both directions: mapping→object
//! ([`populate`], [`construct`], [`construct_all`], [`apply_from`]) and
//! object→mapping ([`to_mapping`], [`field_view`]).
//!
//! # Design Principles
//!
//! - Best-effort, never fails: missing keys leave fields untouched, null
//!   resets to the empty representation, uncoercible values are skipped
//! - Unknown keys in the source are ignored, never surfaced
//! - Sequence order is always preserved; partial sequence results are
//!   reported explicitly ([`ConstructedSeq`])
//! - Synchronous tree walk, recursion bounded by type nesting depth

mod coerce;
mod populate;
mod serialize;

use serde_json::{Map, Value};

/// An untyped key→value mapping, e.g. one decoded JSON object.
pub type Mapping = Map<String, Value>;

pub use populate::{apply_from, construct, construct_all, construct_from, populate, ConstructedSeq};
pub use serialize::{field_view, to_mapping};
