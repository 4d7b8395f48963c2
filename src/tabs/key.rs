//! Canonical tab keys.

use super::item::RouteParams;

/// Builds the tab key for a location.
///
/// Params and query entries are each sorted by name and rendered as `k=v`
/// pairs joined with `&`. Params come first, then query; the whole suffix
/// is attached with a single `?`. Two locations that differ only in entry
/// order share a key.
///
/// # Examples
/// ```
/// use rconsole::tabs::{generate_key, RouteParams};
///
/// let mut query = RouteParams::new();
/// query.insert("page".into(), "2".into());
/// query.insert("q".into(), "ada".into());
/// assert_eq!(generate_key("/users", &RouteParams::new(), &query), "/users?page=2&q=ada");
/// ```
pub fn generate_key(path: &str, params: &RouteParams, query: &RouteParams) -> String {
    let mut key = path.to_string();
    let mut separator = '?';
    for map in [params, query] {
        if map.is_empty() {
            continue;
        }
        key.push(separator);
        key.push_str(&join_pairs(map));
        separator = '&';
    }
    key
}

fn join_pairs(map: &RouteParams) -> String {
    // BTreeMap iterates in key order
    map.iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn params(pairs: &[(&str, &str)]) -> RouteParams {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[rstest]
    #[case(&[], &[], "/users")]
    #[case(&[("id", "7")], &[], "/users?id=7")]
    #[case(&[], &[("tab", "roles")], "/users?tab=roles")]
    #[case(&[("id", "7")], &[("tab", "roles")], "/users?id=7&tab=roles")]
    #[case(&[("b", "2"), ("a", "1")], &[("z", "0"), ("y", "9")], "/users?a=1&b=2&y=9&z=0")]
    fn test_key_shapes(#[case] p: &[(&str, &str)], #[case] q: &[(&str, &str)], #[case] expected: &str) {
        assert_eq!(generate_key("/users", &params(p), &params(q)), expected);
    }

    #[rstest]
    #[case(&[("a", "1"), ("b", "2"), ("c", "3")])]
    #[case(&[("c", "3"), ("a", "1"), ("b", "2")])]
    #[case(&[("b", "2"), ("c", "3"), ("a", "1")])]
    fn test_insertion_order_is_irrelevant(#[case] pairs: &[(&str, &str)]) {
        let key = generate_key("/x", &params(pairs), &params(pairs));
        assert_eq!(key, "/x?a=1&b=2&c=3&a=1&b=2&c=3");
    }
}
