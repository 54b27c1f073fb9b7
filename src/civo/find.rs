//! Find-by-id-or-name over a listed collection
//!
//! Civo has no server-side lookup by name, so every `find_*` lists the
//! collection and matches locally. Only exact keys match: an id wins outright,
//! a name must be unique. A substring of a key never matches.

use super::error::ProviderError;

/// Pick the item matching `search` out of `items`.
///
/// `keys` yields the identifiers an item can be found by, id first.
pub fn find_match<T, F>(
    items: Vec<T>,
    search: &str,
    kind: &'static str,
    keys: F,
) -> Result<T, ProviderError>
where
    F: Fn(&T) -> Vec<&str>,
{
    let mut named = Vec::new();

    for item in items {
        let item_keys = keys(&item);
        match item_keys.split_first() {
            Some((id, _)) if *id == search => return Ok(item),
            Some((_, names)) if names.contains(&search) => named.push(item),
            _ => {},
        }
    }

    match named.len() {
        0 => Err(ProviderError::ZeroMatches {
            kind,
            search: search.to_string(),
        }),
        1 => Ok(named.remove(0)),
        _ => Err(ProviderError::MultipleMatches {
            kind,
            search: search.to_string(),
        }),
    }
}
