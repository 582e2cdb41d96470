//! Keyboard cursor over the dashboard.
//!
//! ```text
//!   Inactive ──any arrow──▶ Favorites(0)  (or Folders(0) without favorites)
//!
//!   Favorites(i) ──Down──▶ Folders(0)
//!   Folders(i)   ──Up (first row)──▶ Favorites(min(i, last))
//!   Folders(i)   ──Down (last row) / Enter──▶ Sites(i, 0)
//!   Sites(i, 0)  ──Up──▶ Folders(i)
//!   Sites(i, _)  ──Left / Right──▶ Folders(i)
//!
//!   any ──clear──▶ Inactive
//! ```
//!
//! The focus is a single value, so at most one item is ever highlighted.
//! Every call hands back the previous and the new focus; renderers drop the
//! old marker before drawing the new one.

use crate::data::model::{AppData, Bookmark};

/// Folders are laid out in rows of this many cards.
pub const GRID_COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Favorites,
    Folders,
    Sites,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Inactive,
    Favorites(usize),
    Folders(usize),
    Sites {
        folder_index: usize,
        folder_id: String,
        site_index: usize,
    },
}

impl Focus {
    pub fn zone(&self) -> Option<Zone> {
        match self {
            Focus::Inactive => None,
            Focus::Favorites(_) => Some(Zone::Favorites),
            Focus::Folders(_) => Some(Zone::Folders),
            Focus::Sites { .. } => Some(Zone::Sites),
        }
    }

    /// Index of the folder card that is focused or holds the focused site.
    pub fn folder_index(&self) -> Option<usize> {
        match self {
            Focus::Folders(i) => Some(*i),
            Focus::Sites { folder_index, .. } => Some(*folder_index),
            _ => None,
        }
    }
}

/// What the navigator can see of the dashboard.
#[derive(Debug, Clone, Copy)]
pub struct NavContext<'a> {
    data: &'a AppData,
}

impl<'a> NavContext<'a> {
    pub fn new(data: &'a AppData) -> Self {
        Self { data }
    }

    /// Favorites only take part when the row is shown.
    pub fn favorites_count(&self) -> usize {
        if self.data.settings.show_favorites {
            self.data.favorites.len()
        } else {
            0
        }
    }

    pub fn folder_count(&self) -> usize {
        self.data.folders.len()
    }

    pub fn site_count(&self, folder_index: usize) -> usize {
        self.data
            .folders
            .get(folder_index)
            .map(|f| f.sites.len())
            .unwrap_or(0)
    }

    fn sites_entry(&self, folder_index: usize) -> Option<Focus> {
        let folder = self.data.folders.get(folder_index)?;
        if folder.sites.is_empty() {
            return None;
        }
        Some(Focus::Sites {
            folder_index,
            folder_id: folder.id.clone(),
            site_index: 0,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub previous: Focus,
    pub current: Focus,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Drilled into a folder's sites.
    Moved(Transition),
    /// Open the focused item's URL; the focus stays put.
    Open(String),
    Nothing,
}

#[derive(Debug, Clone, Default)]
pub struct GridNavigator {
    focus: Focus,
}

impl GridNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    pub fn is_active(&self) -> bool {
        self.focus != Focus::Inactive
    }

    fn set(&mut self, next: Focus) -> Transition {
        let previous = std::mem::replace(&mut self.focus, next);
        Transition {
            previous,
            current: self.focus.clone(),
        }
    }

    /// Move the cursor one step. An inactive navigator wakes up on any arrow.
    pub fn step(&mut self, direction: Direction, ctx: &NavContext<'_>) -> Transition {
        let next = Self::next_focus(&self.focus, direction, ctx);
        self.set(next)
    }

    fn next_focus(focus: &Focus, direction: Direction, ctx: &NavContext<'_>) -> Focus {
        let favorites = ctx.favorites_count();
        let folders = ctx.folder_count();

        match focus {
            Focus::Inactive => {
                if favorites > 0 {
                    Focus::Favorites(0)
                } else if folders > 0 {
                    Focus::Folders(0)
                } else {
                    Focus::Inactive
                }
            }
            Focus::Favorites(i) => {
                let i = *i;
                match direction {
                    Direction::Left => Focus::Favorites(i.saturating_sub(1)),
                    Direction::Right => Focus::Favorites((i + 1).min(favorites.saturating_sub(1))),
                    Direction::Down if folders > 0 => Focus::Folders(0),
                    _ => focus.clone(),
                }
            }
            Focus::Folders(i) => {
                let i = *i;
                match direction {
                    Direction::Left => Focus::Folders(i.saturating_sub(1)),
                    Direction::Right => Focus::Folders((i + 1).min(folders.saturating_sub(1))),
                    Direction::Up if i >= GRID_COLUMNS => Focus::Folders(i - GRID_COLUMNS),
                    Direction::Up if favorites > 0 => Focus::Favorites(i.min(favorites - 1)),
                    Direction::Down if i + GRID_COLUMNS < folders => {
                        Focus::Folders(i + GRID_COLUMNS)
                    }
                    Direction::Down => ctx.sites_entry(i).unwrap_or_else(|| focus.clone()),
                    _ => focus.clone(),
                }
            }
            Focus::Sites {
                folder_index,
                folder_id,
                site_index,
            } => match direction {
                Direction::Up if *site_index > 0 => Focus::Sites {
                    folder_index: *folder_index,
                    folder_id: folder_id.clone(),
                    site_index: site_index - 1,
                },
                Direction::Down => Focus::Sites {
                    folder_index: *folder_index,
                    folder_id: folder_id.clone(),
                    site_index: (site_index + 1)
                        .min(ctx.site_count(*folder_index).saturating_sub(1)),
                },
                // Up from the first site, and any sideways move, go back to the card.
                _ => Focus::Folders(*folder_index),
            },
        }
    }

    /// Enter: drill into a folder, or open the focused favorite / site.
    pub fn activate(&mut self, ctx: &NavContext<'_>) -> Activation {
        match &self.focus {
            Focus::Folders(i) => match ctx.sites_entry(*i) {
                Some(entry) => Activation::Moved(self.set(entry)),
                None => Activation::Nothing,
            },
            Focus::Favorites(_) | Focus::Sites { .. } => self
                .focused_item(ctx)
                .map(|item| Activation::Open(item.url.clone()))
                .unwrap_or(Activation::Nothing),
            Focus::Inactive => Activation::Nothing,
        }
    }

    /// Escape, or a text input took focus.
    pub fn clear(&mut self) -> Transition {
        self.set(Focus::Inactive)
    }

    /// Put the cursor on `focus` (e.g. after moving the focused item), clamped
    /// to what exists.
    pub fn focus_on(&mut self, focus: Focus, ctx: &NavContext<'_>) -> Transition {
        let previous = std::mem::replace(&mut self.focus, focus);
        let current = self.reconcile(ctx).current;
        Transition { previous, current }
    }

    /// Pull the cursor back into range after the data changed underneath it.
    pub fn reconcile(&mut self, ctx: &NavContext<'_>) -> Transition {
        let next = match &self.focus {
            Focus::Inactive => Focus::Inactive,
            Focus::Favorites(i) => match ctx.favorites_count() {
                0 => Focus::Inactive,
                n => Focus::Favorites((*i).min(n - 1)),
            },
            Focus::Folders(i) => match ctx.folder_count() {
                0 => Focus::Inactive,
                n => Focus::Folders((*i).min(n - 1)),
            },
            Focus::Sites {
                folder_index,
                folder_id,
                site_index,
            } => match ctx.data.folder_index(folder_id) {
                Some(index) => match ctx.site_count(index) {
                    0 => Focus::Folders(index),
                    n => Focus::Sites {
                        folder_index: index,
                        folder_id: folder_id.clone(),
                        site_index: (*site_index).min(n - 1),
                    },
                },
                None => match ctx.folder_count() {
                    0 => Focus::Inactive,
                    n => Focus::Folders((*folder_index).min(n - 1)),
                },
            },
        };
        self.set(next)
    }

    /// The bookmark under the cursor, if the cursor sits on one.
    pub fn focused_item<'a>(&self, ctx: &NavContext<'a>) -> Option<&'a Bookmark> {
        let data = ctx.data;
        match &self.focus {
            Focus::Favorites(i) => data.favorites.get(*i),
            Focus::Sites {
                folder_id,
                site_index,
                ..
            } => data.folder(folder_id)?.sites.get(*site_index),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Folder;

    fn bookmarks(prefix: &str, n: usize) -> Vec<Bookmark> {
        (0..n)
            .map(|i| {
                Bookmark::new(
                    format!("{}{}", prefix, i),
                    format!("{} {}", prefix, i),
                    format!("https://{}{}.test", prefix, i),
                )
            })
            .collect()
    }

    /// `sites[i]` is the number of sites in folder `i`.
    fn data(favorites: usize, sites: &[usize]) -> AppData {
        AppData {
            favorites: bookmarks("fav", favorites),
            folders: sites
                .iter()
                .enumerate()
                .map(|(i, &n)| {
                    Folder::new(format!("folder{}", i), format!("Folder {}", i))
                        .with_sites(bookmarks(&format!("f{}s", i), n))
                })
                .collect(),
            ..AppData::default()
        }
    }

    fn sites_focus(folder_index: usize, site_index: usize) -> Focus {
        Focus::Sites {
            folder_index,
            folder_id: format!("folder{}", folder_index),
            site_index,
        }
    }

    fn nav_at(focus: Focus) -> GridNavigator {
        GridNavigator { focus }
    }

    #[test]
    fn test_first_arrow_activates_favorites() {
        let data = data(3, &[1, 1]);
        let ctx = NavContext::new(&data);
        let mut nav = GridNavigator::new();

        assert_eq!(nav.step(Direction::Right, &ctx).current, Focus::Favorites(0));
        assert_eq!(nav.step(Direction::Right, &ctx).current, Focus::Favorites(1));
        assert_eq!(nav.step(Direction::Down, &ctx).current, Focus::Folders(0));
    }

    #[test]
    fn test_activation_skips_hidden_favorites() {
        let mut data = data(3, &[1]);
        data.settings.show_favorites = false;
        let ctx = NavContext::new(&data);
        let mut nav = GridNavigator::new();
        assert_eq!(nav.step(Direction::Down, &ctx).current, Focus::Folders(0));

        let empty = AppData::default();
        let ctx = NavContext::new(&empty);
        let mut nav = GridNavigator::new();
        assert_eq!(nav.step(Direction::Down, &ctx).current, Focus::Inactive);
    }

    #[test]
    fn test_favorites_clamp_and_down_without_folders() {
        let data = data(2, &[]);
        let ctx = NavContext::new(&data);
        let mut nav = nav_at(Focus::Favorites(0));

        assert_eq!(nav.step(Direction::Left, &ctx).current, Focus::Favorites(0));
        assert_eq!(nav.step(Direction::Right, &ctx).current, Focus::Favorites(1));
        assert_eq!(nav.step(Direction::Right, &ctx).current, Focus::Favorites(1));
        assert_eq!(nav.step(Direction::Down, &ctx).current, Focus::Favorites(1));
        assert_eq!(nav.step(Direction::Up, &ctx).current, Focus::Favorites(1));
    }

    #[test]
    fn test_folders_move_by_rows() {
        let data = data(3, &[0; 10]);
        let ctx = NavContext::new(&data);
        let mut nav = nav_at(Focus::Folders(1));

        assert_eq!(nav.step(Direction::Down, &ctx).current, Focus::Folders(5));
        assert_eq!(nav.step(Direction::Down, &ctx).current, Focus::Folders(9));
        assert_eq!(nav.step(Direction::Right, &ctx).current, Focus::Folders(9));
        assert_eq!(nav.step(Direction::Up, &ctx).current, Focus::Folders(5));
        assert_eq!(nav.step(Direction::Up, &ctx).current, Focus::Folders(1));
        assert_eq!(nav.step(Direction::Up, &ctx).current, Focus::Favorites(1));
    }

    #[test]
    fn test_folder_up_clamps_to_last_favorite() {
        let data = data(2, &[0; 4]);
        let ctx = NavContext::new(&data);
        let mut nav = nav_at(Focus::Folders(3));
        assert_eq!(nav.step(Direction::Up, &ctx).current, Focus::Favorites(1));

        let no_favorites = self::data(0, &[0; 4]);
        let ctx = NavContext::new(&no_favorites);
        let mut nav = nav_at(Focus::Folders(2));
        assert_eq!(nav.step(Direction::Up, &ctx).current, Focus::Folders(2));
    }

    #[test]
    fn test_folder_down_on_last_row_enters_sites() {
        let data = data(0, &[0, 2]);
        let ctx = NavContext::new(&data);

        let mut nav = nav_at(Focus::Folders(1));
        assert_eq!(nav.step(Direction::Down, &ctx).current, sites_focus(1, 0));

        let mut nav = nav_at(Focus::Folders(0));
        assert_eq!(nav.step(Direction::Down, &ctx).current, Focus::Folders(0));
    }

    #[test]
    fn test_sites_vertical_and_exit() {
        let data = data(0, &[3]);
        let ctx = NavContext::new(&data);
        let mut nav = nav_at(sites_focus(0, 0));

        assert_eq!(nav.step(Direction::Down, &ctx).current, sites_focus(0, 1));
        assert_eq!(nav.step(Direction::Down, &ctx).current, sites_focus(0, 2));
        assert_eq!(nav.step(Direction::Down, &ctx).current, sites_focus(0, 2));
        assert_eq!(nav.step(Direction::Up, &ctx).current, sites_focus(0, 1));
        assert_eq!(nav.step(Direction::Up, &ctx).current, sites_focus(0, 0));
        assert_eq!(nav.step(Direction::Up, &ctx).current, Focus::Folders(0));
    }

    #[test]
    fn test_sites_sideways_returns_to_same_folder() {
        let data = data(0, &[1, 1, 3]);
        let ctx = NavContext::new(&data);
        for direction in [Direction::Left, Direction::Right] {
            let mut nav = nav_at(sites_focus(2, 1));
            let transition = nav.step(direction, &ctx);
            assert_eq!(transition.previous, sites_focus(2, 1));
            assert_eq!(transition.current, Focus::Folders(2));
        }
    }

    #[test]
    fn test_activate() {
        let data = data(1, &[2, 0]);
        let ctx = NavContext::new(&data);

        let mut nav = nav_at(Focus::Folders(0));
        match nav.activate(&ctx) {
            Activation::Moved(t) => assert_eq!(t.current, sites_focus(0, 0)),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            nav.activate(&ctx),
            Activation::Open("https://f0s0.test".to_string())
        );
        assert_eq!(nav.focus(), &sites_focus(0, 0));

        let mut nav = nav_at(Focus::Folders(1));
        assert_eq!(nav.activate(&ctx), Activation::Nothing);

        let mut nav = nav_at(Focus::Favorites(0));
        assert_eq!(
            nav.activate(&ctx),
            Activation::Open("https://fav0.test".to_string())
        );
        assert_eq!(GridNavigator::new().activate(&ctx), Activation::Nothing);
    }

    #[test]
    fn test_clear_from_any_state() {
        for focus in [Focus::Favorites(1), Focus::Folders(0), sites_focus(0, 0)] {
            let mut nav = nav_at(focus.clone());
            let transition = nav.clear();
            assert_eq!(transition.previous, focus);
            assert!(!nav.is_active());
        }
    }

    #[test]
    fn test_reconcile_after_data_changes() {
        let data = data(1, &[1]);
        let ctx = NavContext::new(&data);

        let mut nav = nav_at(Focus::Favorites(4));
        assert_eq!(nav.reconcile(&ctx).current, Focus::Favorites(0));

        let mut nav = nav_at(sites_focus(0, 3));
        assert_eq!(nav.reconcile(&ctx).current, sites_focus(0, 0));

        let mut nav = nav_at(Focus::Sites {
            folder_index: 5,
            folder_id: "gone".to_string(),
            site_index: 0,
        });
        assert_eq!(nav.reconcile(&ctx).current, Focus::Folders(0));

        let empty = AppData::default();
        let mut nav = nav_at(Focus::Folders(2));
        assert_eq!(nav.reconcile(&NavContext::new(&empty)).current, Focus::Inactive);
    }

    #[test]
    fn test_transition_reports_previous_focus() {
        let data = data(2, &[]);
        let ctx = NavContext::new(&data);
        let mut nav = nav_at(Focus::Favorites(0));
        let t = nav.step(Direction::Right, &ctx);
        assert_eq!(t.previous, Focus::Favorites(0));
        assert!(t.changed());
        assert!(!nav.step(Direction::Right, &ctx).changed());
    }

    #[test]
    fn test_focus_on_clamps_to_existing_items() {
        let data = data(2, &[3]);
        let ctx = NavContext::new(&data);
        let mut nav = nav_at(Focus::Favorites(1));

        let t = nav.focus_on(sites_focus(0, 7), &ctx);
        assert_eq!(t.previous, Focus::Favorites(1));
        assert_eq!(t.current, sites_focus(0, 2));
        assert_eq!(nav.focus_on(Focus::Favorites(5), &ctx).current, Focus::Favorites(1));
    }
}
