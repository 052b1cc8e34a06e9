//! OSGi-style versions and version ranges used by blacklist rules.
//!
//! Maven versions are cleaned into `major.minor.micro.qualifier` before they
//! are compared, so `1.0-SNAPSHOT` becomes `1.0.0.SNAPSHOT`.

use std::fmt;

/// `major.minor.micro.qualifier`. Ordering compares numbers first, then the
/// qualifier as a plain string.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub micro: u64,
    pub qualifier: String,
}

impl Version {
    pub fn new(major: u64, minor: u64, micro: u64) -> Self {
        Self {
            major,
            minor,
            micro,
            qualifier: String::new(),
        }
    }

    /// Strict OSGi parse: up to three numeric parts and an optional qualifier.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        let mut parts = s.splitn(4, '.');
        let mut numbers = [0u64; 3];
        for (idx, slot) in numbers.iter_mut().enumerate() {
            match parts.next() {
                Some(p) if !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit()) => {
                    *slot = p.parse().ok()?;
                }
                Some(_) => return None,
                None if idx > 0 => break,
                None => return None,
            }
        }
        let qualifier = parts.next().unwrap_or("");
        if !qualifier.bytes().all(is_qualifier_byte) {
            return None;
        }
        Some(Self {
            major: numbers[0],
            minor: numbers[1],
            micro: numbers[2],
            qualifier: qualifier.to_string(),
        })
    }

    /// Lenient conversion of a Maven version string.
    ///
    /// Leading dot-separated numbers fill major/minor/micro; whatever follows
    /// (minus one separator character) becomes the qualifier with invalid
    /// characters replaced by `_`. A version with no leading number becomes
    /// `0.0.0.<cleaned>`.
    pub fn from_maven(version: &str) -> Self {
        let mut numbers = [0u64; 3];
        let mut count = 0;
        let mut rest = version;

        while count < 3 {
            let len = rest.bytes().take_while(u8::is_ascii_digit).count();
            if len == 0 {
                break;
            }
            numbers[count] = rest[..len].parse().unwrap_or(u64::MAX);
            count += 1;
            rest = &rest[len..];
            let next_is_number = rest
                .strip_prefix('.')
                .and_then(|r| r.bytes().next())
                .is_some_and(|b| b.is_ascii_digit());
            if count < 3 && next_is_number {
                rest = &rest[1..];
            } else {
                break;
            }
        }

        let qualifier = if count == 0 {
            rest
        } else {
            match rest.chars().next() {
                Some(c) if !c.is_ascii_alphanumeric() => &rest[c.len_utf8()..],
                _ => rest,
            }
        };

        Self {
            major: numbers[0],
            minor: numbers[1],
            micro: numbers[2],
            qualifier: qualifier
                .chars()
                .map(|c| {
                    if c.is_ascii() && is_qualifier_byte(c as u8) {
                        c
                    } else {
                        '_'
                    }
                })
                .collect(),
        }
    }
}

fn is_qualifier_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if !self.qualifier.is_empty() {
            write!(f, ".{}", self.qualifier)?;
        }
        Ok(())
    }
}

/// An interval such as `[1.0,2.0)`, or a bare version meaning "at least".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    floor: Version,
    floor_inclusive: bool,
    ceiling: Option<(Version, bool)>,
}

impl VersionRange {
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let open = s.chars().next();
        if !matches!(open, Some('[') | Some('(')) {
            let floor = Version::parse(s).ok_or_else(|| format!("invalid version {s:?}"))?;
            return Ok(Self {
                floor,
                floor_inclusive: true,
                ceiling: None,
            });
        }

        let ceiling_inclusive = match s.chars().last() {
            Some(']') => true,
            Some(')') => false,
            _ => return Err(format!("unterminated range {s:?}")),
        };
        let inner = &s[1..s.len() - 1];
        let (low, high) = inner
            .split_once(',')
            .ok_or_else(|| format!("range {s:?} needs two bounds"))?;
        let floor = Version::parse(low).ok_or_else(|| format!("invalid bound {low:?}"))?;
        let ceiling = Version::parse(high).ok_or_else(|| format!("invalid bound {high:?}"))?;
        if ceiling < floor {
            return Err(format!("empty range {s:?}"));
        }
        Ok(Self {
            floor,
            floor_inclusive: open == Some('['),
            ceiling: Some((ceiling, ceiling_inclusive)),
        })
    }

    pub fn contains(&self, version: &Version) -> bool {
        let above_floor = if self.floor_inclusive {
            *version >= self.floor
        } else {
            *version > self.floor
        };
        let below_ceiling = match &self.ceiling {
            None => true,
            Some((ceiling, true)) => version <= ceiling,
            Some((ceiling, false)) => version < ceiling,
        };
        above_floor && below_ceiling
    }
}
