use crate::data::model::{AppData, Bookmark};
use crate::search::chosung::matches_lead_consonants;

/// Label shown next to hits that come from the favorites row.
pub const FAVORITES_LABEL: &str = "Favorites";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Favorite,
    Site,
}

/// One matching item together with where it lives.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    pub kind: HitKind,
    pub item: &'a Bookmark,
    /// Owning folder id; `None` for favorites.
    pub container_id: Option<&'a str>,
    pub container_label: &'a str,
}

/// Find favorites and folder sites matching `query`, in display order.
///
/// Favorites come first, then each folder's sites in folder order. There is
/// no ranking and no de-duplication: the same URL saved twice shows twice.
pub fn search<'a>(data: &'a AppData, query: &str) -> Vec<SearchHit<'a>> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    let lowered = trimmed.to_lowercase();
    let lower = lowered.as_str();

    let favorites = data
        .favorites
        .iter()
        .filter(|item| item_matches(item, trimmed, lower))
        .map(|item| SearchHit {
            kind: HitKind::Favorite,
            item,
            container_id: None,
            container_label: FAVORITES_LABEL,
        });

    let sites = data.folders.iter().flat_map(move |folder| {
        folder
            .sites
            .iter()
            .filter(move |item| item_matches(item, trimmed, lower))
            .map(move |item| SearchHit {
                kind: HitKind::Site,
                item,
                container_id: Some(folder.id.as_str()),
                container_label: folder.name.as_str(),
            })
    });

    favorites.chain(sites).collect()
}

fn item_matches(item: &Bookmark, raw: &str, lower: &str) -> bool {
    contains_case_insensitive(&item.name, lower)
        || contains_case_insensitive(&item.url, lower)
        || contains_case_insensitive(&item.memo, lower)
        || matches_lead_consonants(&item.name, raw)
        || matches_lead_consonants(&item.memo, raw)
}

/// Case-insensitive contains check (optimized for ASCII, falls back to allocation for Unicode).
/// `needle` must already be lower-cased.
fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    // Fast path: if both strings are ASCII, use byte-level comparison without allocation
    if haystack.is_ascii() && needle.is_ascii() {
        let needle_bytes = needle.as_bytes();
        haystack
            .as_bytes()
            .windows(needle_bytes.len())
            .any(|window| {
                window
                    .iter()
                    .zip(needle_bytes)
                    .all(|(&b, &n)| b.to_ascii_lowercase() == n)
            })
    } else {
        haystack.to_lowercase().contains(needle)
    }
}

/// Byte ranges of the first case-insensitive occurrence of a query in a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight<'a> {
    pub before: &'a str,
    pub matched: &'a str,
    pub after: &'a str,
}

/// Split `text` around the first occurrence of `query`, ignoring case.
///
/// Comparison is char by char so the returned slices always sit on char
/// boundaries of `text`, even when lower-casing changes byte lengths.
pub fn highlight<'a>(text: &'a str, query: &str) -> Option<Highlight<'a>> {
    let query: Vec<char> = query.trim().chars().collect();
    if query.is_empty() {
        return None;
    }

    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < query.len() {
        return None;
    }

    let same = |a: char, b: char| a == b || a.to_lowercase().eq(b.to_lowercase());
    (0..=chars.len() - query.len())
        .find(|&start| {
            chars[start..start + query.len()]
                .iter()
                .zip(&query)
                .all(|(&a, &b)| same(a, b))
        })
        .map(|start| {
            let from = boundaries[start];
            let to = boundaries[start + query.len()];
            Highlight {
                before: &text[..from],
                matched: &text[from..to],
                after: &text[to..],
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Folder;

    fn data() -> AppData {
        AppData {
            favorites: vec![
                Bookmark::new("a", "Xylophone shop", "https://a.test"),
                Bookmark::new("b", "Bakery", "https://b.test"),
                Bookmark::new("c", "Coffee", "https://c.test").with_memo("Box of beans"),
            ],
            folders: vec![
                Folder::new("f1", "포털").with_sites(vec![
                    Bookmark::new("s1", "네이버", "https://naver.com"),
                    Bookmark::new("s2", "다음", "https://daum.net").with_memo("카카오 포털"),
                ]),
                Folder::new("f2", "Dev").with_sites(vec![Bookmark::new(
                    "s3",
                    "Docs",
                    "https://docs.rs",
                )]),
            ],
            ..AppData::default()
        }
    }

    fn hit_ids<'a>(hits: &[SearchHit<'a>]) -> Vec<&'a str> {
        hits.iter().map(|h| h.item.id.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let data = data();
        assert!(search(&data, "").is_empty());
        assert!(search(&data, "   ").is_empty());
    }

    #[test]
    fn test_encounter_order_is_kept() {
        let data = data();
        let hits = search(&data, "x");
        assert_eq!(hit_ids(&hits), ["a", "c"]);
    }

    #[test]
    fn test_matches_url_case_insensitively() {
        let data = data();
        let hits = search(&data, "  DOCS.RS ");
        assert_eq!(hit_ids(&hits), ["s3"]);
        assert_eq!(hits[0].kind, HitKind::Site);
        assert_eq!(hits[0].container_id, Some("f2"));
        assert_eq!(hits[0].container_label, "Dev");
    }

    #[test]
    fn test_chosung_matches_name_and_memo() {
        let data = data();
        assert_eq!(hit_ids(&search(&data, "ㄴㅇㅂ")), ["s1"]);
        assert_eq!(hit_ids(&search(&data, "ㅋㅋㅇ")), ["s2"]);
        assert!(search(&data, "ㅂㄴ").is_empty());
    }

    #[test]
    fn test_favorites_come_first_without_dedup() {
        let mut data = data();
        data.favorites.push(Bookmark::new("n", "네이버", "https://naver.com"));
        let hits = search(&data, "naver");
        assert_eq!(hit_ids(&hits), ["n", "s1"]);
        assert_eq!(hits[0].container_id, None);
        assert_eq!(hits[0].container_label, FAVORITES_LABEL);
    }

    #[test]
    fn test_contains_case_insensitive_paths() {
        assert!(contains_case_insensitive("Hello World", "world"));
        assert!(!contains_case_insensitive("Hi", "hello"));
        assert!(contains_case_insensitive("ÉCOLE", "école"));
    }

    #[test]
    fn test_highlight_splits_first_occurrence() {
        let h = highlight("Google Search", "SEARCH").unwrap();
        assert_eq!(h.before, "Google ");
        assert_eq!(h.matched, "Search");
        assert_eq!(h.after, "");

        let h = highlight("카카오 포털", "포털").unwrap();
        assert_eq!(h.before, "카카오 ");
        assert_eq!(h.matched, "포털");

        assert!(highlight("Google", "bing").is_none());
        assert!(highlight("Google", "").is_none());
        assert!(highlight("Go", "Google").is_none());
    }
}
