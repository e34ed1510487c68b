// Path expressions: `$["fruits"][0]["name"]`, `${["fruits"][0]["name"]}`, `$.fruits[0].name`.
// Parsing is lenient: fragments that match no token are skipped, never rejected.
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// One hop of a path: an object member or an array element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Seg {
    Key(String),
    Index(usize),
}

impl Seg {
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Seg::Key(k) => Some(k),
            Seg::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Seg::Key(_) => None,
            Seg::Index(i) => Some(*i),
        }
    }

    pub fn is_index(&self) -> bool {
        matches!(self, Seg::Index(_))
    }

    /// Member name used when this segment addresses an object.
    pub fn object_key(&self) -> String {
        match self {
            Seg::Key(k) => k.clone(),
            Seg::Index(i) => i.to_string(),
        }
    }

    /// Element position used when this segment addresses an array.
    ///
    /// Keys only qualify when they spell a canonical decimal index (`"0"`, `"17"`),
    /// so `["01"]` or `["name"]` never reach into an array.
    pub fn array_index(&self) -> Option<usize> {
        match self {
            Seg::Index(i) => Some(*i),
            Seg::Key(k) => {
                let canonical = !k.is_empty()
                    && k.bytes().all(|b| b.is_ascii_digit())
                    && (k == "0" || !k.starts_with('0'));
                if canonical { k.parse().ok() } else { None }
            }
        }
    }
}

impl fmt::Display for Seg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seg::Key(k) => write!(f, "[\"{}\"]", k),
            Seg::Index(i) => write!(f, "[{}]", i),
        }
    }
}

impl From<&str> for Seg {
    fn from(s: &str) -> Self {
        Seg::Key(s.to_string())
    }
}

impl From<String> for Seg {
    fn from(s: String) -> Self {
        Seg::Key(s)
    }
}

impl From<usize> for Seg {
    fn from(i: usize) -> Self {
        Seg::Index(i)
    }
}

/// Ordered address into a value tree. The empty path is the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<Seg>);

impl Path {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn from_segments(segments: Vec<Seg>) -> Self {
        Self(segments)
    }

    pub fn key(mut self, k: impl Into<String>) -> Self {
        self.0.push(Seg::Key(k.into()));
        self
    }

    pub fn index(mut self, i: usize) -> Self {
        self.0.push(Seg::Index(i));
        self
    }

    pub fn segments(&self) -> &[Seg] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Seg> {
        self.0.last()
    }

    /// Path of the enclosing container; `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        let (_, spine) = self.0.split_last()?;
        Some(Path(spine.to_vec()))
    }
}

// Canonical bracket form, `$` for the root.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for seg in &self.0 {
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(parse(s))
    }
}

impl From<Vec<Seg>> for Path {
    fn from(segments: Vec<Seg>) -> Self {
        Self(segments)
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Seg;
    type IntoIter = std::slice::Iter<'a, Seg>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parse a path expression into segments.
///
/// Never fails: anything that is not a `["key"]`, `[123]` or `.ident` token is
/// skipped, and an expression with no tokens at all yields the root path.
pub fn parse(expression: &str) -> Path {
    let mut s = expression.trim();
    if s.starts_with("${") && s.ends_with('}') && s.len() >= 3 {
        s = &s[2..s.len() - 1];
    }
    let s = s.strip_prefix('$').unwrap_or(s);

    let mut out = Vec::new();
    let mut rest = s;
    while !rest.is_empty() {
        match next_token(rest) {
            Some((seg, consumed)) => {
                if let Some(seg) = seg {
                    out.push(seg);
                }
                rest = &rest[consumed..];
            }
            None => {
                let skip = rest.chars().next().map(char::len_utf8).unwrap_or(1);
                rest = &rest[skip..];
            }
        }
    }
    Path(out)
}

// Match one token at the head of `s`. Returns the segment (None when the token
// matched but carries no usable value, e.g. an index overflowing usize) and the
// number of bytes consumed.
fn next_token(s: &str) -> Option<(Option<Seg>, usize)> {
    if let Some(tok) = quoted_key(s) {
        return Some(tok);
    }
    if let Some(tok) = bracket_index(s) {
        return Some(tok);
    }
    dotted_ident(s)
}

fn quoted_key(s: &str) -> Option<(Option<Seg>, usize)> {
    let body = s.strip_prefix("[\"")?;
    let end = body.find('"')?;
    if end == 0 || !body[end + 1..].starts_with(']') {
        return None;
    }
    let key = &body[..end];
    Some((Some(Seg::Key(key.to_string())), 2 + end + 2))
}

fn bracket_index(s: &str) -> Option<(Option<Seg>, usize)> {
    let body = s.strip_prefix('[')?;
    let digits = body.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || !body[digits..].starts_with(']') {
        return None;
    }
    let seg = body[..digits].parse::<usize>().ok().map(Seg::Index);
    Some((seg, 1 + digits + 1))
}

fn dotted_ident(s: &str) -> Option<(Option<Seg>, usize)> {
    let body = s.strip_prefix('.')?;
    let len = body
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b'$')
        .count();
    if len == 0 {
        return None;
    }
    Some((Some(Seg::Key(body[..len].to_string())), 1 + len))
}
