//! Recognizes slot tokens and decomposes them into key, value type and
//! operation against the configured marker table. Ordinary words — the vast
//! majority of tokens — come back as `None`.

use crate::config::{SlotDef, SlotOp, ValueType};

/// A recognized slot reference inside a template token.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// Base name with markers stripped, lowercased.
    pub key: String,
    /// The exact `%...%` core as written, for in-place substitution.
    pub raw: String,
    pub kind: ValueType,
    pub op: SlotOp,
    /// Signed element index carried by `index` markers, when present.
    pub index: Option<i64>,
}

/// Marker table flattened from the configured slot definitions. Markers are
/// tried longest first so `LISTINDEX` wins over `LIST` and the bare scalar
/// marker is the final fallback; ties keep definition order.
#[derive(Debug, Clone)]
pub struct SlotTable {
    markers: Vec<(String, ValueType, SlotOp)>,
    safe_punctuation: String,
}

impl SlotTable {
    pub fn new(defs: &[SlotDef], safe_punctuation: &str) -> Self {
        let mut markers: Vec<(String, ValueType, SlotOp)> = defs
            .iter()
            .flat_map(|def| {
                def.markers
                    .iter()
                    .map(move |(marker, op)| (marker.clone(), def.kind, *op))
            })
            .collect();
        markers.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        Self {
            markers,
            safe_punctuation: safe_punctuation.to_string(),
        }
    }

    /// Parse one whitespace-delimited token. Surrounding safe punctuation is
    /// ignored; the token qualifies only if what remains is `%`-delimited
    /// and its interior matches a configured marker.
    pub fn parse(&self, token: &str) -> Option<Placeholder> {
        let core = token.trim_matches(|c| self.safe_punctuation.contains(c));
        let chars: Vec<char> = core.chars().collect();
        if chars.len() < 2 || chars[0] != '%' || chars[chars.len() - 1] != '%' {
            return None;
        }
        let interior: String = chars[1..chars.len() - 1].iter().collect();
        if interior.is_empty() {
            return None;
        }

        for (marker, kind, op) in &self.markers {
            if marker.is_empty() {
                return Some(Placeholder {
                    key: interior.to_lowercase(),
                    raw: core.to_string(),
                    kind: *kind,
                    op: *op,
                    index: None,
                });
            }
            let Some(pos) = interior.find(marker.as_str()) else {
                continue;
            };
            let key = &interior[..pos];
            let rest = &interior[pos + marker.len()..];
            if key.is_empty() {
                continue;
            }
            let index = match op {
                SlotOp::Index if rest.is_empty() => None,
                SlotOp::Index => match rest.parse::<i64>() {
                    Ok(value) => Some(value),
                    Err(_) => continue,
                },
                _ if !rest.is_empty() => continue,
                _ => None,
            };
            return Some(Placeholder {
                key: key.to_lowercase(),
                raw: core.to_string(),
                kind: *kind,
                op: *op,
                index,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    fn table() -> SlotTable {
        let config = EngineConfig::default();
        SlotTable::new(&config.slots, &config.safe_punctuation)
    }

    #[test]
    fn ordinary_words_are_not_slots() {
        assert_eq!(table().parse("hello"), None);
        assert_eq!(table().parse("100%"), None);
        assert_eq!(table().parse("%"), None);
        assert_eq!(table().parse("%%"), None);
        assert_eq!(table().parse(""), None);
    }

    #[test]
    fn bare_token_is_scalar_set() {
        let ph = table().parse("%name%").unwrap();
        assert_eq!(ph.key, "name");
        assert_eq!(ph.kind, ValueType::String);
        assert_eq!(ph.op, SlotOp::Set);
        assert_eq!(ph.raw, "%name%");
    }

    #[test]
    fn get_marker_is_scalar_read() {
        let ph = table().parse("%nameGET%").unwrap();
        assert_eq!(ph.key, "name");
        assert_eq!(ph.op, SlotOp::Get);
    }

    #[test]
    fn list_markers_decompose() {
        let ph = table().parse("%colorLIST%").unwrap();
        assert_eq!((ph.key.as_str(), ph.kind, ph.op), ("color", ValueType::List, SlotOp::Get));

        let ph = table().parse("%colorLISTADD%").unwrap();
        assert_eq!(ph.op, SlotOp::Add);

        let ph = table().parse("%colorLISTREMOVE%").unwrap();
        assert_eq!(ph.op, SlotOp::Remove);

        let ph = table().parse("%colorLISTCLEAR%").unwrap();
        assert_eq!(ph.op, SlotOp::Clear);
    }

    #[test]
    fn longest_marker_wins() {
        let ph = table().parse("%colorLISTINDEX2%").unwrap();
        assert_eq!(ph.op, SlotOp::Index);
        assert_eq!(ph.index, Some(2));

        let ph = table().parse("%colorLISTINDEX-1%").unwrap();
        assert_eq!(ph.index, Some(-1));
    }

    #[test]
    fn index_marker_without_integer_has_no_index() {
        let ph = table().parse("%colorLISTINDEX%").unwrap();
        assert_eq!(ph.op, SlotOp::Index);
        assert_eq!(ph.index, None);
    }

    #[test]
    fn surrounding_punctuation_is_ignored_but_raw_is_kept() {
        let ph = table().parse("%name%,").unwrap();
        assert_eq!(ph.key, "name");
        assert_eq!(ph.raw, "%name%");
    }

    #[test]
    fn hyphen_and_underscore_survive_in_keys() {
        let ph = table().parse("%first-name%").unwrap();
        assert_eq!(ph.key, "first-name");
        let ph = table().parse("%last_name%").unwrap();
        assert_eq!(ph.key, "last_name");
    }
}
