mod search;

use crate::core::error::Result;
use crate::data::model::{AppData, Theme};
use crate::nav::drag::{
    self, grid_insertion_index, insertion_index, Axis, DragKind, DragSource, DragState, DropAction,
    DropTarget, ListKind,
};
use crate::nav::grid::{Activation, Direction as NavDirection, Focus, GridNavigator, NavContext, GRID_COLUMNS};
use crate::nav::paging::{folders_per_page, Pager, Scroll, FAVORITES_PER_PAGE};
use crate::search::engine::HitKind;
use crate::storage::dashboard::DashboardStore;
use crate::ui::notice::{NoticeBoard, NoticeLevel};
use crossterm::cursor;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;
use search::{highlighted, SearchState};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

// TUI configuration constants
const TICK_RATE: Duration = Duration::from_millis(250); // Redraw often enough to expire notices
const CARD_HEIGHT: u16 = 3; // Border, one line of text, border

/// Colors derived from the theme setting
struct Palette {
    accent: Color,
    border: Style,
    focus: Style,
    muted: Style,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        let accent = match theme {
            Theme::Dark => Color::Yellow,
            Theme::Light => Color::Blue,
        };
        Self {
            accent,
            border: Style::default().fg(Color::DarkGray),
            focus: Style::default().fg(accent).add_modifier(Modifier::BOLD),
            muted: Style::default().fg(Color::DarkGray),
        }
    }

    fn selected(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}

/// `#rrggbb` folder accent, if set and well-formed
fn folder_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    Some(Color::Rgb((value >> 16) as u8, (value >> 8) as u8, value as u8))
}

fn to_drag_rect(area: Rect) -> drag::Rect {
    drag::Rect::new(
        area.x as f32,
        area.y as f32,
        area.width as f32,
        area.height as f32,
    )
}

fn page_title(name: &str, pager: &Pager, len: usize) -> String {
    if pager.needs_paging(len) {
        format!(" {} ({}/{}) ", name, pager.page() + 1, pager.page_count(len))
    } else {
        format!(" {} ", name)
    }
}

/// Where items were drawn in the last frame, for mouse hit-testing
#[derive(Debug, Default)]
struct HitMap {
    favorites_area: Option<drag::Rect>,
    favorites: Vec<(usize, drag::Rect)>,
    folders_area: Option<drag::Rect>,
    folders: Vec<(usize, drag::Rect)>,
    sites_area: Option<drag::Rect>,
    sites_folder: Option<usize>,
    /// Index of the first site row drawn.
    sites_start: usize,
    sites: Vec<(usize, drag::Rect)>,
}

/// Interactive dashboard: favorites row, paged folder grid and the sites of
/// the current folder, driven by the keyboard and mouse drags.
pub struct Dashboard {
    store: DashboardStore,
    data: AppData,

    favorites_pager: Pager,
    folders_pager: Pager,
    sites_scroll: Scroll,
    sites_scroll_folder: Option<String>,
    navigator: GridNavigator,
    drag: DragState,
    hits: HitMap,
    search: SearchState,
    notices: NoticeBoard,

    open_url: Option<String>,
    should_quit: bool,
}

impl Dashboard {
    pub fn new(store: DashboardStore) -> Result<Self> {
        let data = store.load()?;
        let folders_pager = Pager::new(folders_per_page(&data.settings));

        Ok(Self {
            store,
            data,
            favorites_pager: Pager::new(FAVORITES_PER_PAGE),
            folders_pager,
            sites_scroll: Scroll::default(),
            sites_scroll_folder: None,
            navigator: GridNavigator::new(),
            drag: DragState::default(),
            hits: HitMap::default(),
            search: SearchState::default(),
            notices: NoticeBoard::new(),
            open_url: None,
            should_quit: false,
        })
    }

    /// Run until the user quits. Returns the URL picked with Enter, if any.
    pub fn run(&mut self) -> Result<Option<String>> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;

        // Always restore terminal, even if we early-return with an error.
        struct TerminalRestore;
        impl Drop for TerminalRestore {
            fn drop(&mut self) {
                let _ = disable_raw_mode();
                let mut stdout = io::stdout();
                let _ = execute!(stdout, LeaveAlternateScreen, DisableMouseCapture, cursor::Show);
            }
        }
        let _restore = TerminalRestore;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = ratatui::Terminal::new(backend)?;

        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if event::poll(TICK_RATE)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
        }

        Ok(self.open_url.take())
    }

    /// Re-read the stored dashboard and pull every view back into range.
    fn reload(&mut self) -> Result<()> {
        self.data = self.store.load()?;
        self.folders_pager
            .set_per_page(folders_per_page(&self.data.settings));
        self.favorites_pager.clamp(self.data.favorites.len());
        self.folders_pager.clamp(self.data.folders.len());
        self.navigator.reconcile(&NavContext::new(&self.data));
        self.search.refresh(&self.data);
        Ok(())
    }

    /// Run a store mutation, then reload. The outcome becomes a notice.
    fn apply(&mut self, done: &str, action: impl FnOnce(&DashboardStore) -> Result<()>) -> bool {
        let result = action(&self.store);
        let reloaded = self.reload();
        match result.and(reloaded) {
            Ok(()) => {
                self.notices.info(done);
                true
            }
            Err(e) => {
                warn!("dashboard action failed: {}", e);
                self.notices.error(&e);
                false
            }
        }
    }

    fn open(&mut self, url: String) {
        debug!(url = %url, "opening");
        self.open_url = Some(url);
        self.should_quit = true;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.search.editing {
            self.handle_search_key(key);
            return;
        }

        let direction = match key.code {
            KeyCode::Up => Some(NavDirection::Up),
            KeyCode::Down => Some(NavDirection::Down),
            KeyCode::Left => Some(NavDirection::Left),
            KeyCode::Right => Some(NavDirection::Right),
            _ => None,
        };
        if let Some(direction) = direction {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                self.move_focused(direction);
            } else {
                self.navigator
                    .step(direction, &NavContext::new(&self.data));
                self.follow_focus();
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                self.navigator.clear();
                self.drag.cancel();
                self.search.clear();
            }
            KeyCode::Char('/') => {
                self.navigator.clear();
                self.search.editing = true;
            }
            KeyCode::Char('[') => {
                if self.folders_pager.prev() {
                    self.focus_first_folder_on_page();
                }
            }
            KeyCode::Char(']') => {
                if self.folders_pager.next(self.data.folders.len()) {
                    self.focus_first_folder_on_page();
                }
            }
            KeyCode::Enter => {
                let activation = self.navigator.activate(&NavContext::new(&self.data));
                match activation {
                    Activation::Open(url) => self.open(url),
                    Activation::Moved(_) => self.follow_focus(),
                    Activation::Nothing => {}
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.search.clear(),
            KeyCode::Enter => {
                if let Some(url) = self.search.selected_url().map(str::to_string) {
                    self.open(url);
                }
            }
            KeyCode::Up => self.search.select_prev(),
            KeyCode::Down => self.search.select_next(),
            KeyCode::Backspace => self.search.pop(&self.data),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                // Clear query
                self.search.query.clear();
                self.search.refresh(&self.data);
            }
            KeyCode::Char(c) => self.search.push(c, &self.data),
            _ => {}
        }
    }

    /// Keep the page that holds the focused item on screen.
    fn follow_focus(&mut self) {
        match self.navigator.focus() {
            Focus::Favorites(i) => self.favorites_pager.show(*i),
            Focus::Folders(i) | Focus::Sites { folder_index: i, .. } => {
                self.folders_pager.show(*i)
            }
            Focus::Inactive => {}
        }
    }

    fn focus_first_folder_on_page(&mut self) {
        if self.navigator.focus().folder_index().is_none() {
            return;
        }
        let first = self.folders_pager.range(self.data.folders.len()).start;
        self.navigator
            .focus_on(Focus::Folders(first), &NavContext::new(&self.data));
    }

    /// Shift+arrow: move the focused item one step and keep focus on it.
    fn move_focused(&mut self, direction: NavDirection) {
        let neighbour = |i: usize, len: usize, delta: isize| {
            i.checked_add_signed(delta).filter(|&to| to < len)
        };
        let columns = GRID_COLUMNS as isize;

        match self.navigator.focus().clone() {
            Focus::Favorites(i) => {
                let delta = match direction {
                    NavDirection::Left => -1,
                    NavDirection::Right => 1,
                    _ => return,
                };
                if let Some(to) = neighbour(i, self.data.favorites.len(), delta) {
                    let moved =
                        self.apply("Favorite order changed.", |store| store.reorder_favorites(i, to));
                    if moved {
                        self.refocus(Focus::Favorites(to));
                    }
                }
            }
            Focus::Folders(i) => {
                let delta = match direction {
                    NavDirection::Left => -1,
                    NavDirection::Right => 1,
                    NavDirection::Up => -columns,
                    NavDirection::Down => columns,
                };
                if let Some(to) = neighbour(i, self.data.folders.len(), delta) {
                    let moved =
                        self.apply("Folder order changed.", |store| store.reorder_folders(i, to));
                    if moved {
                        self.refocus(Focus::Folders(to));
                    }
                }
            }
            Focus::Sites {
                folder_index,
                folder_id,
                site_index,
            } => {
                let delta = match direction {
                    NavDirection::Up => -1,
                    NavDirection::Down => 1,
                    _ => return,
                };
                let len = self
                    .data
                    .folder(&folder_id)
                    .map(|f| f.sites.len())
                    .unwrap_or(0);
                if let Some(to) = neighbour(site_index, len, delta) {
                    let moved = self.apply("Site order changed.", |store| {
                        store.reorder_sites(&folder_id, site_index, to)
                    });
                    if moved {
                        self.refocus(Focus::Sites {
                            folder_index,
                            folder_id,
                            site_index: to,
                        });
                    }
                }
            }
            Focus::Inactive => {}
        }
    }

    fn refocus(&mut self, focus: Focus) {
        self.navigator.focus_on(focus, &NavContext::new(&self.data));
        self.follow_focus();
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        // Aim at the middle of the cell.
        let x = mouse.column as f32 + 0.5;
        let y = mouse.row as f32 + 0.5;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(source) = self.drag_source_at(x, y) {
                    self.drag.begin(source);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(source) = self.drag.source().cloned() else {
                    return;
                };
                let action = match self.drop_target_at(&source, x, y) {
                    Some(target) => self.drag.drop_at(target),
                    None => {
                        self.drag.cancel();
                        None
                    }
                };
                if let Some(action) = action {
                    debug!(?action, "drop");
                    let done = match &action {
                        DropAction::Reorder {
                            list: ListKind::Favorites,
                            ..
                        } => "Favorite order changed.",
                        DropAction::Reorder {
                            list: ListKind::Folders,
                            ..
                        } => "Folder order changed.",
                        DropAction::Reorder { .. } => "Site order changed.",
                        DropAction::MoveSite { .. } => "Site moved.",
                    };
                    self.apply(done, |store| store.apply_drop(&action));
                }
            }
            _ => {}
        }
    }

    fn drag_source_at(&self, x: f32, y: f32) -> Option<DragSource> {
        let under = |rects: &[(usize, drag::Rect)]| {
            rects
                .iter()
                .find(|(_, r)| r.contains(x, y))
                .map(|(i, _)| *i)
        };

        if let Some(index) = under(&self.hits.favorites) {
            let item = self.data.favorites.get(index)?;
            return Some(DragSource {
                kind: DragKind::Favorite,
                id: item.id.clone(),
                index,
            });
        }
        if let Some(index) = under(&self.hits.folders) {
            let folder = self.data.folders.get(index)?;
            return Some(DragSource {
                kind: DragKind::Folder,
                id: folder.id.clone(),
                index,
            });
        }

        let folder = self.data.folders.get(self.hits.sites_folder?)?;
        let index = under(&self.hits.sites)?;
        let site = folder.sites.get(index)?;
        Some(DragSource {
            kind: DragKind::Site {
                folder_id: folder.id.clone(),
            },
            id: site.id.clone(),
            index,
        })
    }

    fn drop_target_at(&self, source: &DragSource, x: f32, y: f32) -> Option<DropTarget> {
        let inside = |area: Option<drag::Rect>| area.is_some_and(|a| a.contains(x, y));
        let others = |rects: &[(usize, drag::Rect)]| -> Vec<drag::Rect> {
            rects
                .iter()
                .filter(|(i, _)| *i != source.index)
                .map(|(_, r)| *r)
                .collect()
        };

        match &source.kind {
            DragKind::Favorite => {
                if !inside(self.hits.favorites_area) {
                    return None;
                }
                let start = self.favorites_pager.range(self.data.favorites.len()).start;
                let offset = insertion_index(&others(&self.hits.favorites), x, Axis::Horizontal);
                Some(DropTarget::List {
                    index: start + offset,
                })
            }
            DragKind::Folder => {
                if !inside(self.hits.folders_area) {
                    return None;
                }
                let start = self.folders_pager.range(self.data.folders.len()).start;
                let offset = grid_insertion_index(&others(&self.hits.folders), x, y);
                Some(DropTarget::List {
                    index: start + offset,
                })
            }
            DragKind::Site { folder_id } => {
                if inside(self.hits.sites_area) {
                    let folder = self.data.folders.get(self.hits.sites_folder?)?;
                    let start = self.hits.sites_start;
                    let (siblings, before) = if folder.id == *folder_id {
                        // The dragged site no longer counts once it is picked up.
                        let before = if source.index < start { start - 1 } else { start };
                        (others(&self.hits.sites), before)
                    } else {
                        (self.hits.sites.iter().map(|(_, r)| *r).collect(), start)
                    };
                    return Some(DropTarget::Folder {
                        folder_id: folder.id.clone(),
                        index: before + insertion_index(&siblings, y, Axis::Vertical),
                    });
                }

                // Dropped on a folder card: append to that folder.
                let &(index, _) = self.hits.folders.iter().find(|(_, r)| r.contains(x, y))?;
                let folder = self.data.folders.get(index)?;
                let end = if folder.id == *folder_id {
                    folder.sites.len().saturating_sub(1)
                } else {
                    folder.sites.len()
                };
                Some(DropTarget::Folder {
                    folder_id: folder.id.clone(),
                    index: end,
                })
            }
        }
    }

    fn render(&mut self, f: &mut Frame) {
        self.hits = HitMap::default();
        let palette = Palette::for_theme(self.data.settings.theme);
        let show_favorites = self.data.settings.show_favorites;
        let folder_rows = u16::from(self.data.settings.folder_rows.clamp(1, 2));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(3), // Search bar
                Constraint::Length(if show_favorites { CARD_HEIGHT + 2 } else { 0 }),
                Constraint::Length(folder_rows * CARD_HEIGHT + 2), // Folder grid
                Constraint::Min(0),    // Sites of the current folder
                Constraint::Length(2), // Footer (border + text)
            ])
            .split(f.size());

        self.render_title(f, chunks[0], &palette);
        self.render_search_bar(f, chunks[1], &palette);

        if self.search.is_active() {
            self.render_results(f, chunks[2].union(chunks[4]), &palette);
        } else {
            if show_favorites {
                self.render_favorites(f, chunks[2], &palette);
            }
            self.render_folders(f, chunks[3], folder_rows, &palette);
            self.render_sites(f, chunks[4], &palette);
        }

        self.render_footer(f, chunks[5], &palette);
    }

    fn render_title(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                "marklog",
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  {} favorites, {} folders",
                    self.data.favorites.len(),
                    self.data.folders.len()
                ),
                palette.muted,
            ),
        ]))
        .alignment(Alignment::Left);
        f.render_widget(title, area);
    }

    fn render_search_bar(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if self.search.editing {
                palette.focus
            } else {
                palette.border
            })
            .title(" Search ");

        let text = if self.search.query.is_empty() {
            Span::styled("Press / to search names, URLs, memos or initials (ㄱㄴㄷ)", palette.muted)
        } else {
            Span::raw(self.search.query.as_str())
        };
        f.render_widget(Paragraph::new(Line::from(text)).block(block), area);
    }

    fn render_favorites(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        let len = self.data.favorites.len();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border)
            .title(page_title("Favorites", &self.favorites_pager, len));
        let inner = block.inner(area);
        f.render_widget(block, area);
        self.hits.favorites_area = Some(to_drag_rect(inner));

        let slots = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![
                Constraint::Ratio(1, FAVORITES_PER_PAGE as u32);
                FAVORITES_PER_PAGE
            ])
            .split(inner);

        for (slot, index) in slots.iter().zip(self.favorites_pager.range(len)) {
            let item = &self.data.favorites[index];
            let focused = *self.navigator.focus() == Focus::Favorites(index);
            let card = Paragraph::new(Line::from(item.name.as_str()))
                .style(if focused { palette.selected() } else { Style::default() })
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(
                    if focused { palette.focus } else { palette.border },
                ));
            f.render_widget(card, *slot);
            self.hits.favorites.push((index, to_drag_rect(*slot)));
        }
    }

    fn render_folders(&mut self, f: &mut Frame, area: Rect, rows: u16, palette: &Palette) {
        let len = self.data.folders.len();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border)
            .title(page_title("Folders", &self.folders_pager, len));
        let inner = block.inner(area);
        f.render_widget(block, area);
        self.hits.folders_area = Some(to_drag_rect(inner));

        let row_areas = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(CARD_HEIGHT); rows as usize])
            .split(inner);
        let cells: Vec<Rect> = row_areas
            .iter()
            .flat_map(|row| {
                Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(vec![Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
                    .split(*row)
                    .to_vec()
            })
            .collect();

        let focus = self.navigator.focus().clone();
        for (cell, index) in cells.iter().zip(self.folders_pager.range(len)) {
            let folder = &self.data.folders[index];
            let border = match &focus {
                Focus::Folders(i) if *i == index => palette.focus,
                Focus::Sites { folder_index, .. } if *folder_index == index => {
                    palette.focus.add_modifier(Modifier::DIM)
                }
                _ => folder_color(&folder.color)
                    .map(|c| Style::default().fg(c))
                    .unwrap_or(palette.border),
            };
            let title = if folder.emoji.is_empty() {
                folder.name.clone()
            } else {
                format!("{} {}", folder.emoji, folder.name)
            };
            let card = Paragraph::new(Line::from(vec![
                Span::styled(title, Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!(" ({})", folder.sites.len()), palette.muted),
            ]))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(border));
            f.render_widget(card, *cell);
            self.hits.folders.push((index, to_drag_rect(*cell)));
        }
    }

    /// Sites of the focused folder, or of the first folder on the page.
    fn render_sites(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        let len = self.data.folders.len();
        let current = self
            .navigator
            .focus()
            .folder_index()
            .or_else(|| (len > 0).then(|| self.folders_pager.range(len).start));
        let Some(folder) = current.and_then(|i| self.data.folders.get(i)) else {
            let empty = Paragraph::new("No folders yet. Add one with `marklog folder add`.")
                .style(palette.muted)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(palette.border));
            f.render_widget(empty, area);
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border)
            .title(format!(" {} {} ", folder.emoji, folder.name));
        let inner = block.inner(area);
        f.render_widget(block, area);
        self.hits.sites_area = Some(to_drag_rect(inner));
        self.hits.sites_folder = current;

        let focused_site = match self.navigator.focus() {
            Focus::Sites {
                folder_id,
                site_index,
                ..
            } if *folder_id == folder.id => Some(*site_index),
            _ => None,
        };

        if self.sites_scroll_folder.as_deref() != Some(folder.id.as_str()) {
            self.sites_scroll.reset();
            self.sites_scroll_folder = Some(folder.id.clone());
        }
        let visible = self
            .sites_scroll
            .follow(focused_site, inner.height as usize, folder.sites.len());
        self.hits.sites_start = visible.start;

        for (row, index) in visible.enumerate() {
            let site = &folder.sites[index];
            let line_area = Rect::new(inner.x, inner.y + row as u16, inner.width, 1);
            let style = if focused_site == Some(index) {
                palette.selected()
            } else {
                Style::default()
            };
            let mut spans = vec![Span::styled(site.name.as_str(), style), Span::raw("  ")];
            spans.push(Span::styled(site.url.as_str(), palette.muted));
            if !site.memo.is_empty() {
                spans.push(Span::styled(format!("  {}", site.memo), palette.muted));
            }
            f.render_widget(Paragraph::new(Line::from(spans)), line_area);
            self.hits.sites.push((index, to_drag_rect(line_area)));
        }
    }

    fn render_results(&self, f: &mut Frame, area: Rect, palette: &Palette) {
        let query = self.search.query.as_str();
        let accent = Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

        if self.search.results.is_empty() {
            let message = if query.trim().is_empty() {
                "Type to search"
            } else {
                "No results found."
            };
            let empty = Paragraph::new(vec![Line::from(""), Line::from(message)])
                .style(palette.muted)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Results "));
            f.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .search
            .results
            .iter()
            .map(|row| {
                let tag = match row.kind {
                    HitKind::Favorite => "★",
                    HitKind::Site => "•",
                };
                let mut spans = vec![Span::styled(
                    format!("{} [{}] ", tag, row.label),
                    palette.muted,
                )];
                spans.extend(highlighted(&row.name, query, Style::default(), accent));
                spans.push(Span::raw("  "));
                spans.extend(highlighted(&row.url, query, palette.muted, accent));
                if !row.memo.is_empty() {
                    spans.push(Span::raw("  "));
                    spans.extend(highlighted(&row.memo, query, palette.muted, accent));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(palette.border)
                    .title(format!(" Results ({} found) ", self.search.total)),
            )
            .highlight_style(palette.selected());

        let mut list_state = ListState::default();
        list_state.select(Some(self.search.selected));
        f.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_footer(&mut self, f: &mut Frame, area: Rect, palette: &Palette) {
        let key = |k: &'static str, color: Color| {
            Span::styled(k, Style::default().fg(color).add_modifier(Modifier::BOLD))
        };

        let line = match self.notices.visible(Instant::now()) {
            Some(notice) => {
                let color = match notice.level {
                    NoticeLevel::Info => Color::Green,
                    NoticeLevel::Error => Color::Red,
                };
                Line::from(Span::styled(notice.text.clone(), Style::default().fg(color)))
            }
            None if self.search.editing => Line::from(vec![
                key("↑↓", Color::Cyan),
                Span::raw(": Select  "),
                key("Enter", Color::Green),
                Span::raw(": Open  "),
                key("Ctrl+U", Color::Cyan),
                Span::raw(": Clear  "),
                key("Esc", Color::Yellow),
                Span::raw(": Close"),
            ]),
            None => Line::from(vec![
                key("←↑↓→", Color::Cyan),
                Span::raw(": Move  "),
                key("Shift+←↑↓→", Color::Magenta),
                Span::raw(": Reorder  "),
                key("[ ]", Color::Cyan),
                Span::raw(": Pages  "),
                key("Enter", Color::Green),
                Span::raw(": Open  "),
                key("/", Color::Cyan),
                Span::raw(": Search  "),
                key("Esc", Color::Yellow),
                Span::raw(": Clear  "),
                key("q", Color::Red),
                Span::raw(": Quit"),
            ]),
        };

        let footer = Paragraph::new(line)
            .style(palette.muted)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::TOP).border_style(palette.border));
        f.render_widget(footer, area);
    }
}
