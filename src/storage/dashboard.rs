//! Persistence of the whole dashboard as one JSON blob.
//!
//! Every mutation loads the full [`AppData`], changes it in memory and writes
//! it back. Mutations from threads sharing one store are serialized by a lock,
//! and the final write is a compare-and-swap on a SHA-256 tag of the stored
//! blob: if something else rewrote the blob since it was loaded, the mutation
//! fails with [`Error::Conflict`] instead of silently overwriting it.

use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::data::migrate::parse_stored;
use crate::data::model::{
    generate_id, AppData, Background, BackgroundKind, Bookmark, Folder, Language, ScrollMode,
    Settings, Theme,
};
use crate::data::reorder::{move_between, reorder};
use crate::nav::drag::{DropAction, ListKind};
use crate::storage::kv::{KeyValueStore, RedbStore};
use crate::storage::synced::SyncedStore;
use sha2::{Digest, Sha256};
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Storage key of the dashboard blob.
pub const DATA_KEY: &str = "marklogData";
/// Key used before the product was renamed; read once and migrated.
pub const LEGACY_DATA_KEY: &str = "linklogData";

/// Fields for a new favorite or site.
#[derive(Debug, Clone, Default)]
pub struct ItemInput {
    pub name: String,
    pub url: String,
    pub memo: String,
}

/// Shallow update of a favorite or site; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub url: Option<String>,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FolderInput {
    pub name: String,
    pub emoji: String,
    pub color: String,
}

/// Shallow update of a folder. Sites are never touched.
#[derive(Debug, Clone, Default)]
pub struct FolderPatch {
    pub name: Option<String>,
    pub emoji: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsPatch {
    pub theme: Option<Theme>,
    pub show_favorites: Option<bool>,
    pub folder_rows: Option<u8>,
    pub folder_scroll_mode: Option<ScrollMode>,
    pub language: Option<Language>,
}

#[derive(Debug, Clone, Default)]
pub struct BackgroundPatch {
    pub kind: Option<BackgroundKind>,
    pub color: Option<String>,
    pub gradient: Option<String>,
    pub image_url: Option<String>,
    pub opacity: Option<f64>,
}

fn required(value: &str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::Validation(message.to_string()))
    } else {
        Ok(trimmed.to_string())
    }
}

const NAME_REQUIRED: &str = "Please enter a name.";
const URL_REQUIRED: &str = "Please enter a URL.";

fn version_of(raw: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw.unwrap_or_default().as_bytes());
    format!("{:x}", hasher.finalize())
}

fn folder_not_found(folder_id: &str) -> Error {
    Error::NotFound(format!("Folder {}", folder_id))
}

fn apply_item_patch(item: &mut Bookmark, patch: ItemPatch) -> Result<()> {
    if let Some(name) = patch.name {
        item.name = required(&name, NAME_REQUIRED)?;
    }
    if let Some(url) = patch.url {
        item.url = required(&url, URL_REQUIRED)?;
    }
    if let Some(memo) = patch.memo {
        item.memo = memo.trim().to_string();
    }
    Ok(())
}

fn new_item(prefix: &str, input: ItemInput) -> Result<Bookmark> {
    Ok(Bookmark {
        id: generate_id(prefix),
        name: required(&input.name, NAME_REQUIRED)?,
        url: required(&input.url, URL_REQUIRED)?,
        memo: input.memo.trim().to_string(),
    })
}

/// Read-modify-write access to the stored dashboard.
pub struct DashboardStore {
    kv: Box<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl DashboardStore {
    pub fn new(kv: Box<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    /// Open the sync store with its local fallback, as laid out in `config`.
    pub fn open(config: &Config) -> Result<Self> {
        let primary = RedbStore::open_sync(config)?;
        let secondary = RedbStore::open_local(config)?;
        Ok(Self::new(Box::new(SyncedStore::new(
            Box::new(primary),
            Box::new(secondary),
        ))))
    }

    /// Load the dashboard, seeding sample data on first use.
    pub fn load(&self) -> Result<AppData> {
        self.load_versioned().map(|(data, _)| data)
    }

    fn load_versioned(&self) -> Result<(AppData, String)> {
        if let Some(raw) = self.kv.get(DATA_KEY)? {
            let (data, migrated) = parse_stored(&raw)?;
            if migrated {
                debug!("applied forward migration to stored data");
            }
            return Ok((data, version_of(Some(&raw))));
        }

        let data = match self.kv.get(LEGACY_DATA_KEY)? {
            Some(raw) => {
                info!("migrating data from legacy key {}", LEGACY_DATA_KEY);
                parse_stored(&raw)?.0
            }
            None => {
                info!("no stored data, seeding sample dashboard");
                AppData::sample()
            }
        };
        let raw = self.write(&data)?;
        Ok((data, version_of(Some(&raw))))
    }

    fn write(&self, data: &AppData) -> Result<String> {
        let raw = serde_json::to_string(data)
            .map_err(|e| Error::Serialization(format!("Failed to serialize data: {}", e)))?;
        self.kv.set(DATA_KEY, &raw)?;
        Ok(raw)
    }

    /// Persist `data` as the new state, unconditionally.
    pub fn save(&self, data: &AppData) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.write(data).map(|_| ())
    }

    /// Load, apply `change`, and write back only if the data actually changed.
    fn mutate<T>(&self, change: impl FnOnce(&mut AppData) -> Result<T>) -> Result<T> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());

        let (mut data, version) = self.load_versioned()?;
        let before = data.clone();
        let output = change(&mut data)?;
        if data == before {
            return Ok(output);
        }

        let current = self.kv.get(DATA_KEY)?;
        if version_of(current.as_deref()) != version {
            warn!("stored data changed during update, refusing to overwrite");
            return Err(Error::Conflict);
        }
        self.write(&data)?;
        Ok(output)
    }

    // ===== Favorites =====

    pub fn add_favorite(&self, input: ItemInput) -> Result<Bookmark> {
        let favorite = new_item("fav", input)?;
        self.mutate(|data| {
            data.favorites.push(favorite.clone());
            Ok(())
        })?;
        debug!(id = %favorite.id, "added favorite");
        Ok(favorite)
    }

    pub fn update_favorite(&self, id: &str, patch: ItemPatch) -> Result<Bookmark> {
        self.mutate(|data| {
            let item = data
                .favorites
                .iter_mut()
                .find(|f| f.id == id)
                .ok_or_else(|| Error::NotFound(format!("Favorite {}", id)))?;
            apply_item_patch(item, patch)?;
            Ok(item.clone())
        })
    }

    pub fn delete_favorite(&self, id: &str) -> Result<()> {
        self.mutate(|data| {
            let index = data
                .favorites
                .iter()
                .position(|f| f.id == id)
                .ok_or_else(|| Error::NotFound(format!("Favorite {}", id)))?;
            data.favorites.remove(index);
            Ok(())
        })?;
        debug!(id, "deleted favorite");
        Ok(())
    }

    pub fn reorder_favorites(&self, from: usize, to: usize) -> Result<()> {
        self.mutate(|data| reorder(&mut data.favorites, from, to).map(|_| ()))
    }

    // ===== Folders =====

    pub fn add_folder(&self, input: FolderInput) -> Result<Folder> {
        let folder = Folder {
            id: generate_id("folder"),
            name: required(&input.name, NAME_REQUIRED)?,
            emoji: input.emoji.trim().to_string(),
            color: input.color.trim().to_string(),
            sites: Vec::new(),
        };
        self.mutate(|data| {
            data.folders.push(folder.clone());
            Ok(())
        })?;
        debug!(id = %folder.id, "added folder");
        Ok(folder)
    }

    pub fn update_folder(&self, id: &str, patch: FolderPatch) -> Result<Folder> {
        self.mutate(|data| {
            let folder = data.folder_mut(id).ok_or_else(|| folder_not_found(id))?;
            if let Some(name) = patch.name {
                folder.name = required(&name, NAME_REQUIRED)?;
            }
            if let Some(emoji) = patch.emoji {
                folder.emoji = emoji.trim().to_string();
            }
            if let Some(color) = patch.color {
                folder.color = color.trim().to_string();
            }
            Ok(folder.clone())
        })
    }

    pub fn delete_folder(&self, id: &str) -> Result<()> {
        self.mutate(|data| {
            let index = data.folder_index(id).ok_or_else(|| folder_not_found(id))?;
            data.folders.remove(index);
            Ok(())
        })?;
        debug!(id, "deleted folder");
        Ok(())
    }

    pub fn reorder_folders(&self, from: usize, to: usize) -> Result<()> {
        self.mutate(|data| reorder(&mut data.folders, from, to).map(|_| ()))
    }

    // ===== Sites =====

    pub fn add_site(&self, folder_id: &str, input: ItemInput) -> Result<Bookmark> {
        let site = new_item("site", input)?;
        self.mutate(|data| {
            let folder = data
                .folder_mut(folder_id)
                .ok_or_else(|| folder_not_found(folder_id))?;
            folder.sites.push(site.clone());
            Ok(())
        })?;
        debug!(id = %site.id, folder_id, "added site");
        Ok(site)
    }

    pub fn update_site(&self, folder_id: &str, site_id: &str, patch: ItemPatch) -> Result<Bookmark> {
        self.mutate(|data| {
            let folder = data
                .folder_mut(folder_id)
                .ok_or_else(|| folder_not_found(folder_id))?;
            let site = folder
                .sites
                .iter_mut()
                .find(|s| s.id == site_id)
                .ok_or_else(|| Error::NotFound(format!("Site {}", site_id)))?;
            apply_item_patch(site, patch)?;
            Ok(site.clone())
        })
    }

    pub fn delete_site(&self, folder_id: &str, site_id: &str) -> Result<()> {
        self.mutate(|data| {
            let folder = data
                .folder_mut(folder_id)
                .ok_or_else(|| folder_not_found(folder_id))?;
            let index = folder
                .site_index(site_id)
                .ok_or_else(|| Error::NotFound(format!("Site {}", site_id)))?;
            folder.sites.remove(index);
            Ok(())
        })
    }

    pub fn reorder_sites(&self, folder_id: &str, from: usize, to: usize) -> Result<()> {
        self.mutate(|data| {
            let folder = data
                .folder_mut(folder_id)
                .ok_or_else(|| folder_not_found(folder_id))?;
            reorder(&mut folder.sites, from, to).map(|_| ())
        })
    }

    /// Move a site to another folder at `index`, or to its end with `None`.
    ///
    /// Within one folder this is a reorder to `index` (clamped to the last slot).
    pub fn move_site(
        &self,
        from_folder: &str,
        to_folder: &str,
        site_id: &str,
        index: Option<usize>,
    ) -> Result<Bookmark> {
        self.mutate(|data| {
            let from = data
                .folder_index(from_folder)
                .ok_or_else(|| folder_not_found(from_folder))?;
            let to = data
                .folder_index(to_folder)
                .ok_or_else(|| folder_not_found(to_folder))?;
            let position = data.folders[from]
                .site_index(site_id)
                .ok_or_else(|| Error::NotFound(format!("Site {}", site_id)))?;
            let site = data.folders[from].sites[position].clone();

            if from == to {
                let last = data.folders[from].sites.len() - 1;
                let target = index.unwrap_or(last).min(last);
                reorder(&mut data.folders[from].sites, position, target)?;
                return Ok(site);
            }

            if data.folders[to].site_index(site_id).is_some() {
                return Err(Error::Validation(format!(
                    "Folder {} already contains site {}",
                    to_folder, site_id
                )));
            }

            let mut source = std::mem::take(&mut data.folders[from].sites);
            let moved = move_between(&mut source, &mut data.folders[to].sites, site_id, index);
            data.folders[from].sites = source;
            moved?;
            Ok(site)
        })
    }

    /// Persist the outcome of a finished drag.
    pub fn apply_drop(&self, action: &DropAction) -> Result<()> {
        match action {
            DropAction::Reorder { list, from, to } => match list {
                ListKind::Favorites => self.reorder_favorites(*from, *to),
                ListKind::Folders => self.reorder_folders(*from, *to),
                ListKind::Sites { folder_id } => self.reorder_sites(folder_id, *from, *to),
            },
            DropAction::MoveSite {
                from_folder,
                to_folder,
                site_id,
                index,
            } => self
                .move_site(from_folder, to_folder, site_id, Some(*index))
                .map(|_| ()),
        }
    }

    // ===== Settings =====

    pub fn save_settings(&self, patch: SettingsPatch) -> Result<Settings> {
        if let Some(rows) = patch.folder_rows {
            if !(1..=2).contains(&rows) {
                return Err(Error::Validation(format!(
                    "Folder rows must be 1 or 2, got {}",
                    rows
                )));
            }
        }

        self.mutate(|data| {
            let settings = &mut data.settings;
            if let Some(theme) = patch.theme {
                settings.theme = theme;
            }
            if let Some(show) = patch.show_favorites {
                settings.show_favorites = show;
            }
            if let Some(rows) = patch.folder_rows {
                settings.folder_rows = rows;
            }
            if let Some(mode) = patch.folder_scroll_mode {
                settings.folder_scroll_mode = mode;
            }
            if let Some(language) = patch.language {
                settings.language = language;
            }
            Ok(settings.clone())
        })
    }

    pub fn save_background(&self, patch: BackgroundPatch) -> Result<Background> {
        if let Some(opacity) = patch.opacity {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(Error::Validation(format!(
                    "Opacity must be between 0 and 1, got {}",
                    opacity
                )));
            }
        }

        self.mutate(|data| {
            let background = &mut data.settings.background;
            if let Some(kind) = patch.kind {
                background.kind = kind;
            }
            if let Some(color) = patch.color {
                background.color = color;
            }
            if let Some(gradient) = patch.gradient {
                background.gradient = gradient;
            }
            if let Some(image_url) = patch.image_url {
                background.image_url = image_url;
            }
            if let Some(opacity) = patch.opacity {
                background.opacity = opacity;
            }
            Ok(background.clone())
        })
    }

    /// Re-save the current blob so it is pushed through the sync store again.
    pub fn force_sync(&self) -> Result<AppData> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let (data, _) = self.load_versioned()?;
        self.write(&data)?;
        info!("re-saved dashboard to trigger sync");
        Ok(data)
    }
}
