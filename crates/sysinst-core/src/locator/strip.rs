//! Unwrapping of annotation protocols around a locator.

/// Protocols that only annotate the URL they wrap.
const WRAPPING_PROTOCOLS: &[&str] = &[
    "wrap:",
    "blueprint:",
    "spring:",
    "war:",
    "war-i:",
    "warref:",
    "webbundle:",
];

/// Strips wrapping protocols until the inner locator is exposed.
///
/// Handled protocols: `wrap:`, `blueprint:`, `spring:`, `war:`, `war-i:`,
/// `warref:` and `webbundle:`. Each one drops its `?` instructions with the
/// prefix; `wrap:` also drops everything after `$`. `jar:` is left alone, its
/// `!/entry` suffix addresses a file inside the archive.
///
/// - `wrap:mvn:org.foo/bar/1.0$Bundle-SymbolicName=bar` → `mvn:org.foo/bar/1.0`
/// - `war:mvn:org.foo/web/1.0/war?Web-ContextPath=web` → `mvn:org.foo/web/1.0/war`
pub fn strip_url(location: &str) -> &str {
    let mut current = location;
    while let Some((protocol, rest)) = WRAPPING_PROTOCOLS
        .iter()
        .find_map(|p| current.strip_prefix(p).map(|rest| (*p, rest)))
    {
        let inner = if protocol == "wrap:" {
            rest.split_once('$').map_or(rest, |(inner, _)| inner)
        } else {
            rest
        };
        current = inner.split_once('?').map_or(inner, |(inner, _)| inner);
    }
    current
}
