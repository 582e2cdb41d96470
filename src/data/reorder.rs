//! Moving items within and between ordered sequences.
//!
//! `to` in [`reorder`] is the position in the sequence *after* the moved item
//! has been removed (splice-out, splice-in). Moving the first of four items to
//! index 2 therefore lands it behind the original third item:
//!
//! ```text
//! [a, b, c, d]  --reorder(0, 2)-->  [b, c, a, d]
//! ```

use crate::core::error::{Error, Result};
use crate::data::model::{Bookmark, Folder};

/// Anything addressable by an opaque id inside its sequence.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Bookmark {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Folder {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Move the element at `from` to `to` (post-removal index).
///
/// Returns `Ok(false)` when `from == to`, so callers can skip persisting.
pub fn reorder<T>(seq: &mut Vec<T>, from: usize, to: usize) -> Result<bool> {
    let len = seq.len();
    if from >= len || to >= len {
        return Err(Error::NotFound(format!(
            "Position {} -> {} in a list of {}",
            from, to, len
        )));
    }
    if from == to {
        return Ok(false);
    }

    let moved = seq.remove(from);
    seq.insert(to, moved);
    Ok(true)
}

/// Move the item with `id` from `src` into `dest`.
///
/// `dest_index` past the end is clamped; `None` appends.
pub fn move_between<T: Identified>(
    src: &mut Vec<T>,
    dest: &mut Vec<T>,
    id: &str,
    dest_index: Option<usize>,
) -> Result<()> {
    let pos = src
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| Error::NotFound(format!("Item {}", id)))?;

    let item = src.remove(pos);
    match dest_index {
        Some(index) => dest.insert(index.min(dest.len()), item),
        None => dest.push(item),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(ids: &[&str]) -> Vec<Bookmark> {
        ids.iter()
            .map(|id| Bookmark::new(*id, id.to_uppercase(), format!("https://{}.example", id)))
            .collect()
    }

    fn ids(seq: &[Bookmark]) -> Vec<&str> {
        seq.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_reorder_forward_uses_post_removal_index() {
        let mut seq = items(&["a", "b", "c", "d"]);
        assert!(reorder(&mut seq, 0, 2).unwrap());
        assert_eq!(ids(&seq), ["b", "c", "a", "d"]);
    }

    #[test]
    fn test_reorder_backward() {
        let mut seq = items(&["a", "b", "c", "d"]);
        reorder(&mut seq, 3, 1).unwrap();
        assert_eq!(ids(&seq), ["a", "d", "b", "c"]);
    }

    #[test]
    fn test_reorder_to_last_position() {
        let mut seq = items(&["a", "b", "c"]);
        reorder(&mut seq, 0, 2).unwrap();
        assert_eq!(ids(&seq), ["b", "c", "a"]);
    }

    #[test]
    fn test_reorder_same_index_is_noop() {
        let mut seq = items(&["a", "b", "c"]);
        assert!(!reorder(&mut seq, 1, 1).unwrap());
        assert_eq!(ids(&seq), ["a", "b", "c"]);
    }

    #[test]
    fn test_reorder_out_of_range_leaves_sequence() {
        let mut seq = items(&["a", "b"]);
        assert!(matches!(reorder(&mut seq, 2, 0), Err(Error::NotFound(_))));
        assert!(matches!(reorder(&mut seq, 0, 2), Err(Error::NotFound(_))));
        assert_eq!(ids(&seq), ["a", "b"]);

        let mut empty: Vec<Bookmark> = Vec::new();
        assert!(reorder(&mut empty, 0, 0).is_err());
    }

    #[test]
    fn test_move_between_inserts_at_index() {
        let mut src = items(&["a", "b"]);
        let mut dest = items(&["c"]);
        move_between(&mut src, &mut dest, "a", Some(0)).unwrap();
        assert_eq!(ids(&src), ["b"]);
        assert_eq!(ids(&dest), ["a", "c"]);
    }

    #[test]
    fn test_move_between_appends_without_index() {
        let mut src = items(&["a", "b"]);
        let mut dest = items(&["c"]);
        move_between(&mut src, &mut dest, "b", None).unwrap();
        assert_eq!(ids(&dest), ["c", "b"]);
    }

    #[test]
    fn test_move_between_clamps_index() {
        let mut src = items(&["a"]);
        let mut dest = items(&["c", "d"]);
        move_between(&mut src, &mut dest, "a", Some(10)).unwrap();
        assert_eq!(ids(&dest), ["c", "d", "a"]);
    }

    #[test]
    fn test_move_between_missing_id() {
        let mut src = items(&["a"]);
        let mut dest = items(&["c"]);
        let result = move_between(&mut src, &mut dest, "zzz", Some(0));
        assert!(matches!(result, Err(Error::NotFound(_))));
        assert_eq!(ids(&src), ["a"]);
        assert_eq!(ids(&dest), ["c"]);
    }

    #[test]
    fn test_folders_are_identified() {
        let mut folders = vec![Folder::new("f1", "One"), Folder::new("f2", "Two")];
        let mut other = Vec::new();
        move_between(&mut folders, &mut other, "f2", None).unwrap();
        assert_eq!(other[0].name, "Two");
    }
}
