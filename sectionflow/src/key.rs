#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
use alloc::string::String;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Section id → value lookup.
#[cfg(feature = "std")]
pub(crate) type IdMap<V> = HashMap<String, V>;
#[cfg(not(feature = "std"))]
pub(crate) type IdMap<V> = BTreeMap<String, V>;
