use clap::Parser;
use marklog::data::model::AppData;
use marklog::search::engine::{search, HitKind};
use marklog::storage::backup;
use marklog::storage::dashboard::{
    BackgroundPatch, DashboardStore, FolderInput, FolderPatch, ItemInput, ItemPatch, SettingsPatch,
};
use marklog::ui::cli::{Cli, Commands, FavoriteAction, FolderAction, SiteAction};
use marklog::{Config, Dashboard, Result};
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::new(cli.base_dir.map(PathBuf::from))?;

    if let Some(Commands::Init) = cli.command {
        return handle_init(&config);
    }
    if !config.is_initialized() {
        config.init()?;
    }
    init_logging(&config);
    tracing::debug!(command = ?cli.command, "starting");

    let store = DashboardStore::open(&config)?;
    match cli.command {
        None | Some(Commands::Tui) => handle_tui(store),
        Some(Commands::Init) => Ok(()),
        Some(Commands::List) => handle_list(&store),
        Some(Commands::Search { query, limit }) => handle_search(&store, &query, limit),
        Some(Commands::Favorite { action }) => handle_favorite(&store, action),
        Some(Commands::Folder { action }) => handle_folder(&store, action),
        Some(Commands::Site { action }) => handle_site(&store, action),
        Some(Commands::Settings {
            theme,
            show_favorites,
            folder_rows,
            scroll_mode,
            language,
        }) => handle_settings(
            &store,
            SettingsPatch {
                theme: theme.map(Into::into),
                show_favorites,
                folder_rows,
                folder_scroll_mode: scroll_mode.map(Into::into),
                language: language.map(Into::into),
            },
        ),
        Some(Commands::Background {
            kind,
            color,
            gradient,
            image_url,
            opacity,
        }) => handle_background(
            &store,
            BackgroundPatch {
                kind: kind.map(Into::into),
                color,
                gradient,
                image_url,
                opacity,
            },
        ),
        Some(Commands::Export { dir }) => {
            let dir = dir
                .map(PathBuf::from)
                .unwrap_or_else(|| config.backups_dir.clone());
            handle_export(&store, &dir)
        }
        Some(Commands::Import { path }) => handle_import(&store, Path::new(&path)),
        Some(Commands::Sync) => handle_sync(&store),
    }
}

/// Log to `<base_dir>/marklog.log` so the dashboard screen stays clean;
/// stderr if the file cannot be opened. `RUST_LOG` wins over the configured level.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let writer = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
    {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(_) => BoxMakeWriter::new(io::stderr),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .try_init();
}

fn handle_init(config: &Config) -> Result<()> {
    println!("Initializing marklog...");

    if config.is_initialized() {
        println!("marklog is already initialized at: {:?}", config.base_dir);
        return Ok(());
    }

    config.init()?;
    println!("✓ Created data directory: {:?}", config.base_dir);
    println!("✓ Created backups directory: {:?}", config.backups_dir);

    println!("\nInitialization complete!");
    println!("Next steps:");
    println!("  1. Open the dashboard: marklog");
    println!("  2. Or add a favorite: marklog favorite add <name> <url>");

    Ok(())
}

fn handle_tui(store: DashboardStore) -> Result<()> {
    let mut dashboard = Dashboard::new(store)?;
    if let Some(url) = dashboard.run()? {
        println!("{}", url);
    }
    Ok(())
}

fn print_data(data: &AppData) {
    if data.settings.show_favorites {
        println!("Favorites:");
        for (i, fav) in data.favorites.iter().enumerate() {
            println!("  [{}] {}  {}  ({})", i, fav.name, fav.url, fav.id);
        }
    } else {
        println!("Favorites: hidden ({} saved)", data.favorites.len());
    }

    for (i, folder) in data.folders.iter().enumerate() {
        println!("\n[{}] {} {}  ({})", i, folder.emoji, folder.name, folder.id);
        if folder.sites.is_empty() {
            println!("    (empty)");
        }
        for (j, site) in folder.sites.iter().enumerate() {
            print!("    [{}] {}  {}", j, site.name, site.url);
            if !site.memo.is_empty() {
                print!("  - {}", site.memo);
            }
            println!("  ({})", site.id);
        }
    }
}

fn handle_list(store: &DashboardStore) -> Result<()> {
    print_data(&store.load()?);
    Ok(())
}

fn handle_search(store: &DashboardStore, query: &str, limit: usize) -> Result<()> {
    let data = store.load()?;
    let hits = search(&data, query);

    if hits.is_empty() {
        println!("No results found for \"{}\".", query);
        return Ok(());
    }

    println!("Found {} results:", hits.len());
    for (i, hit) in hits.iter().take(limit).enumerate() {
        let marker = match hit.kind {
            HitKind::Favorite => "★",
            HitKind::Site => "•",
        };
        println!(
            "\n{}. {} {} [{}]",
            i + 1,
            marker,
            hit.item.name,
            hit.container_label
        );
        println!("   {}", hit.item.url);
        if !hit.item.memo.is_empty() {
            println!("   {}", hit.item.memo);
        }
    }
    if hits.len() > limit {
        println!("\n... {} more (use --limit)", hits.len() - limit);
    }
    Ok(())
}

fn handle_favorite(store: &DashboardStore, action: FavoriteAction) -> Result<()> {
    match action {
        FavoriteAction::Add { name, url, memo } => {
            let fav = store.add_favorite(ItemInput { name, url, memo })?;
            println!("✓ Added favorite {} ({})", fav.name, fav.id);
        }
        FavoriteAction::Edit {
            id,
            name,
            url,
            memo,
        } => {
            let fav = store.update_favorite(&id, ItemPatch { name, url, memo })?;
            println!("✓ Updated favorite {}", fav.name);
        }
        FavoriteAction::Delete { id } => {
            store.delete_favorite(&id)?;
            println!("✓ Deleted favorite {}", id);
        }
        FavoriteAction::Move { from, to } => {
            store.reorder_favorites(from, to)?;
            println!("✓ Moved favorite {} -> {}", from, to);
        }
    }
    Ok(())
}

fn handle_folder(store: &DashboardStore, action: FolderAction) -> Result<()> {
    match action {
        FolderAction::Add { name, emoji, color } => {
            let folder = store.add_folder(FolderInput { name, emoji, color })?;
            println!("✓ Added folder {} ({})", folder.name, folder.id);
        }
        FolderAction::Edit {
            id,
            name,
            emoji,
            color,
        } => {
            let folder = store.update_folder(&id, FolderPatch { name, emoji, color })?;
            println!("✓ Updated folder {}", folder.name);
        }
        FolderAction::Delete { id } => {
            store.delete_folder(&id)?;
            println!("✓ Deleted folder {}", id);
        }
        FolderAction::Move { from, to } => {
            store.reorder_folders(from, to)?;
            println!("✓ Moved folder {} -> {}", from, to);
        }
    }
    Ok(())
}

fn handle_site(store: &DashboardStore, action: SiteAction) -> Result<()> {
    match action {
        SiteAction::Add {
            folder,
            name,
            url,
            memo,
        } => {
            let site = store.add_site(&folder, ItemInput { name, url, memo })?;
            println!("✓ Added site {} ({})", site.name, site.id);
        }
        SiteAction::Edit {
            folder,
            id,
            name,
            url,
            memo,
        } => {
            let site = store.update_site(&folder, &id, ItemPatch { name, url, memo })?;
            println!("✓ Updated site {}", site.name);
        }
        SiteAction::Delete { folder, id } => {
            store.delete_site(&folder, &id)?;
            println!("✓ Deleted site {}", id);
        }
        SiteAction::Move { folder, from, to } => {
            store.reorder_sites(&folder, from, to)?;
            println!("✓ Moved site {} -> {}", from, to);
        }
        SiteAction::Transfer {
            from_folder,
            to_folder,
            id,
            index,
        } => {
            let site = store.move_site(&from_folder, &to_folder, &id, index)?;
            println!("✓ Moved {} to folder {}", site.name, to_folder);
        }
    }
    Ok(())
}

fn handle_settings(store: &DashboardStore, patch: SettingsPatch) -> Result<()> {
    let settings = store.save_settings(patch)?;
    println!("Theme:          {:?}", settings.theme);
    println!("Show favorites: {}", settings.show_favorites);
    println!("Folder rows:    {}", settings.folder_rows);
    println!("Scroll mode:    {:?}", settings.folder_scroll_mode);
    println!(
        "Language:       {:?} (resolves to {:?})",
        settings.language,
        settings.language.resolve()
    );
    Ok(())
}

fn handle_background(store: &DashboardStore, patch: BackgroundPatch) -> Result<()> {
    let background = store.save_background(patch)?;
    println!("Type:      {:?}", background.kind);
    println!("Color:     {}", background.color);
    println!("Gradient:  {}", background.gradient);
    println!("Image URL: {}", background.image_url);
    println!("Opacity:   {}", background.opacity);
    Ok(())
}

fn handle_export(store: &DashboardStore, dir: &Path) -> Result<()> {
    let path = backup::export(store, dir)?;
    println!("✓ Exported backup to {}", path.display());
    Ok(())
}

fn handle_import(store: &DashboardStore, path: &Path) -> Result<()> {
    let data = backup::import(store, path)?;
    println!(
        "✓ Imported {} favorites and {} folders from {}",
        data.favorites.len(),
        data.folders.len(),
        path.display()
    );
    Ok(())
}

fn handle_sync(store: &DashboardStore) -> Result<()> {
    let data = store.force_sync()?;
    println!(
        "✓ Synced {} favorites and {} folders",
        data.favorites.len(),
        data.folders.len()
    );
    Ok(())
}
