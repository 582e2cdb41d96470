//! Pointer drag-and-drop as an explicit state machine.
//!
//! ```text
//! Idle ──begin(source)──▶ Dragging(source) ──drop_at(target)──▶ Idle
//!                                  └────────cancel()───────────▶ Idle
//! ```
//!
//! Insertion indices are computed over the siblings *without* the dragged
//! item, which is exactly the post-removal index `reorder` expects.

/// Screen-space box of a rendered item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Index to insert at in a single row or column.
///
/// Picks the nearest sibling whose centre lies past the pointer; with none,
/// the item goes to the end.
pub fn insertion_index(others: &[Rect], position: f32, axis: Axis) -> usize {
    let mut best: Option<(usize, f32)> = None;
    for (i, rect) in others.iter().enumerate() {
        let offset = match axis {
            Axis::Horizontal => position - rect.center_x(),
            Axis::Vertical => position - rect.center_y(),
        };
        if offset < 0.0 && best.map_or(true, |(_, b)| offset > b) {
            best = Some((i, offset));
        }
    }
    best.map(|(i, _)| i).unwrap_or(others.len())
}

/// Index to insert at in a wrapping grid.
///
/// Within the pointer's row the X distance decides; rows above the pointer
/// are ranked with Y dominating (`dy * 1000 + dx`).
pub fn grid_insertion_index(others: &[Rect], x: f32, y: f32) -> usize {
    let mut best: Option<(usize, f32)> = None;
    for (i, rect) in others.iter().enumerate() {
        let offset_x = x - rect.center_x();
        let offset_y = y - rect.center_y();
        let same_row = offset_y.abs() < rect.height / 2.0;

        let candidate = if same_row {
            (offset_x < 0.0).then_some(offset_x)
        } else if offset_y < 0.0 {
            Some(offset_y * 1000.0 + offset_x)
        } else {
            None
        };

        if let Some(offset) = candidate {
            if best.map_or(true, |(_, b)| offset > b) {
                best = Some((i, offset));
            }
        }
    }
    best.map(|(i, _)| i).unwrap_or(others.len())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragKind {
    Favorite,
    Folder,
    Site { folder_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSource {
    pub kind: DragKind,
    pub id: String,
    pub index: usize,
}

/// Where the pointer was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// The favorites row or the folders grid, whichever the source came from.
    List { index: usize },
    /// The site list of a folder.
    Folder { folder_id: String, index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListKind {
    Favorites,
    Folders,
    Sites { folder_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropAction {
    Reorder {
        list: ListKind,
        from: usize,
        to: usize,
    },
    MoveSite {
        from_folder: String,
        to_folder: String,
        site_id: String,
        index: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSource),
}

impl DragState {
    pub fn begin(&mut self, source: DragSource) {
        *self = DragState::Dragging(source);
    }

    pub fn cancel(&mut self) {
        *self = DragState::Idle;
    }

    pub fn source(&self) -> Option<&DragSource> {
        match self {
            DragState::Dragging(source) => Some(source),
            DragState::Idle => None,
        }
    }

    /// Finish the drag. Returns `None` for drops that change nothing or
    /// land somewhere the source cannot go.
    pub fn drop_at(&mut self, target: DropTarget) -> Option<DropAction> {
        let source = match std::mem::take(self) {
            DragState::Dragging(source) => source,
            DragState::Idle => return None,
        };

        match (source.kind, target) {
            (DragKind::Favorite, DropTarget::List { index }) => {
                reorder_action(ListKind::Favorites, source.index, index)
            }
            (DragKind::Folder, DropTarget::List { index }) => {
                reorder_action(ListKind::Folders, source.index, index)
            }
            (DragKind::Site { folder_id }, DropTarget::Folder { folder_id: to, index }) => {
                if folder_id == to {
                    reorder_action(ListKind::Sites { folder_id }, source.index, index)
                } else {
                    Some(DropAction::MoveSite {
                        from_folder: folder_id,
                        to_folder: to,
                        site_id: source.id,
                        index,
                    })
                }
            }
            _ => None,
        }
    }
}

fn reorder_action(list: ListKind, from: usize, to: usize) -> Option<DropAction> {
    (from != to).then_some(DropAction::Reorder { list, from, to })
}
