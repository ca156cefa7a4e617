/// Filtering Module for cmdpal
///
/// Plain case-insensitive substring containment, no scoring and no ranking.
/// The output order is the lexicographic order of the original-case names,
/// which the registry's BTreeMap already provides, so filtering is a single
/// ordered pass.
use crate::registry::CommandRegistry;

/// Returns the command names whose lowercase form contains the lowercase
/// query as a contiguous substring, sorted ascending by original-case name.
///
/// An empty query matches every command. Pure function of its inputs:
/// identical query and registry always yield the identical ordered result.
pub fn filter_names(query: &str, registry: &CommandRegistry) -> Vec<String> {
    let needle = query.to_lowercase();
    registry
        .names()
        .filter(|name| name.to_lowercase().contains(&needle))
        .map(str::to_string)
        .collect()
}
