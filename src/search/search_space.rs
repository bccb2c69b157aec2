//! The maps a search leaves behind. Both are keyed by state and only ever
//! grow while the search that owns them is running.

use std::collections::HashMap;

/// Hop count from the nearest seed. A missing state has not been reached
/// (yet, or ever, depending on whether the search ran to completion).
pub type DistanceMap<S> = HashMap<S, u32>;

/// Predecessor of every reached state, `None` for seeds. Used only for path
/// reconstruction, never for distances.
pub type Traceback<S> = HashMap<S, Option<S>>;
