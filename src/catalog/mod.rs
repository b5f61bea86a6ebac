// Archive catalog: reconstruct logical archive groups from a flat listing
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;


/// One entry in an archive's suffix set: either a dated snapshot or the
/// bare marker for a name carrying no recognized date suffix.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Suffix {
    /// No recognized `_YYYY-MM-DD` or `_YYYY-MM-DD.N` suffix.
    Bare,
    /// `YYYY-MM-DD` or `YYYY-MM-DD.N`.
    Dated(String),
}

/// Base name to suffix set, sorted by name.
pub type Families = BTreeMap<String, BTreeSet<Suffix>>;

fn suffix_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(.+)_(\d{4}-\d{2}-\d{2}(?:\.\d+)?)$").unwrap())
}

/// Partition remote archive names into families keyed by base name.
///
/// Order-independent: the input may arrive in any order and the result is
/// always sorted. A family holds both the bare marker and dated suffixes
/// when an unsuffixed archive shares its name with a suffixed one; neither
/// is merged away.
pub fn group(names: impl IntoIterator<Item = String>) -> Families {
    let mut families = Families::new();
    for name in names {
        match suffix_pattern().captures(&name) {
            Some(caps) => {
                families
                    .entry(caps[1].to_string())
                    .or_default()
                    .insert(Suffix::Dated(caps[2].to_string()));
            }
            None => {
                families.entry(name).or_default().insert(Suffix::Bare);
            }
        }
    }
    families
}

/// Render grouped families for display.
///
/// A family whose only entry is the bare marker prints as a plain name.
/// Otherwise each suffix prints indented on its own line, the bare marker
/// shown as `(no suffix)` when dated suffixes are also present.
pub fn render(families: &Families) -> String {
    let mut out = String::new();
    for (family, suffixes) in families {
        if suffixes.len() == 1 && suffixes.contains(&Suffix::Bare) {
            out.push_str(family);
            out.push('\n');
            continue;
        }
        out.push_str(family);
        out.push_str(":\n");
        for suffix in suffixes {
            match suffix {
                Suffix::Bare => out.push_str("\t(no suffix)\n"),
                Suffix::Dated(date) => {
                    out.push('\t');
                    out.push_str(date);
                    out.push('\n');
                }
            }
        }
        out.push('\n');
    }
    out
}
