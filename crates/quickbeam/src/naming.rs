//! Process-wide unique names for parameters declared without one

use std::sync::OnceLock;

use dashmap::DashMap;
use tracing::trace;

/// One counter per tag character.
fn counters() -> &'static DashMap<char, u64> {
    static COUNTERS: OnceLock<DashMap<char, u64>> = OnceLock::new();
    COUNTERS.get_or_init(DashMap::new)
}

/// Return `tag` followed by the next number in that tag's sequence
/// (`p0`, `p1`, ...).
///
/// Names never repeat within a process. Because they start with `tag`, they
/// can only collide with `__user_context` if `tag` is `_`, which is
/// rejected in debug builds.
pub fn unique_name(tag: char) -> String {
    debug_assert!(tag != '_', "unique names must not start with an underscore");
    let n = {
        let mut counter = counters().entry(tag).or_insert(0);
        let n = *counter;
        *counter += 1;
        n
    };
    format!("{}{}", tag, n)
}

/// Name an entity declared without an explicit name.
///
/// `prefix` is the human-readable category of the entity (for example
/// `"quickbeam::Param<?"`); it shows up in traces to tie the generated name
/// back to the declaration kind. The returned name is used verbatim.
pub fn make_entity_name(prefix: &str, tag: char) -> String {
    let name = unique_name(tag);
    trace!(%prefix, %name, "generated entity name");
    name
}
