//! Source map resolution for a finished build.
//!
//! One upload pass runs these steps in order:
//! - Gate: refuse to run without credentials, skip failed builds
//! - Enumerate: pair each emitted script with its `.map` sibling
//! - Resolve: compute the URL each bundle is served from
//! - Dispatch: upload each pair, isolating failures per artifact

pub mod dispatch;
pub mod enumerate;
pub mod gate;
pub mod resolve;

pub use dispatch::{Dispatcher, OverwritePolicy};
pub use enumerate::{enumerate, MAP_SUFFIX, SCRIPT_EXTENSION};
pub use gate::{proceed, GateDecision, Pass, SkipReason};
pub use resolve::resolve_url;
