use crate::data::model::{BackgroundKind, Language, ScrollMode, Theme};
use clap::{Parser, Subcommand, ValueEnum};

/// marklog - Personal bookmark dashboard in the terminal
#[derive(Parser, Debug)]
#[command(name = "marklog")]
#[command(about = "A personal bookmark dashboard with favorites, folders and chosung search", long_about = None)]
#[command(version)]
#[command(subcommand_required = false)]
#[command(arg_required_else_help = false)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Custom base directory (default: ~/.marklog)
    #[arg(long, global = true)]
    pub base_dir: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize marklog (create the data directories)
    Init,
    /// Print favorites and folders with their positions
    List,
    /// Search names, URLs and memos (Hangul initials work too)
    Search {
        /// Search query
        query: String,
        /// Maximum number of results to return
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Manage the favorites row
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Manage folders
    Folder {
        #[command(subcommand)]
        action: FolderAction,
    },
    /// Manage the sites inside a folder
    Site {
        #[command(subcommand)]
        action: SiteAction,
    },
    /// Show or change display settings
    Settings {
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,
        #[arg(long)]
        show_favorites: Option<bool>,
        /// 1 or 2 rows of folders per page
        #[arg(long)]
        folder_rows: Option<u8>,
        #[arg(long, value_enum)]
        scroll_mode: Option<ScrollModeArg>,
        #[arg(long, value_enum)]
        language: Option<LanguageArg>,
    },
    /// Show or change the dashboard background
    Background {
        #[arg(long = "type", value_enum)]
        kind: Option<BackgroundArg>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        gradient: Option<String>,
        #[arg(long)]
        image_url: Option<String>,
        /// Between 0 and 1
        #[arg(long)]
        opacity: Option<f64>,
    },
    /// Write a JSON backup of everything
    Export {
        /// Target directory (default: <base-dir>/backups)
        #[arg(short, long)]
        dir: Option<String>,
    },
    /// Replace everything with a JSON backup
    Import {
        /// Path to the backup file
        path: String,
    },
    /// Re-save the data so it is pushed through the sync store again
    Sync,
    /// Open the interactive dashboard (default when no command is given)
    Tui,
}

#[derive(Subcommand, Debug)]
pub enum FavoriteAction {
    Add {
        name: String,
        url: String,
        #[arg(long, default_value = "")]
        memo: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        memo: Option<String>,
    },
    Delete {
        id: String,
    },
    /// Move the favorite at position FROM to position TO
    Move {
        from: usize,
        to: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum FolderAction {
    Add {
        name: String,
        #[arg(long, default_value = "")]
        emoji: String,
        /// Accent color as #rrggbb
        #[arg(long, default_value = "")]
        color: String,
    },
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        emoji: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    Delete {
        id: String,
    },
    /// Move the folder at position FROM to position TO
    Move {
        from: usize,
        to: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum SiteAction {
    Add {
        folder: String,
        name: String,
        url: String,
        #[arg(long, default_value = "")]
        memo: String,
    },
    Edit {
        folder: String,
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        memo: Option<String>,
    },
    Delete {
        folder: String,
        id: String,
    },
    /// Move a site within its folder
    Move {
        folder: String,
        from: usize,
        to: usize,
    },
    /// Move a site into another folder
    Transfer {
        from_folder: String,
        to_folder: String,
        id: String,
        /// Position in the target folder (default: end)
        #[arg(long)]
        index: Option<usize>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ScrollModeArg {
    Fixed,
    Auto,
}

impl From<ScrollModeArg> for ScrollMode {
    fn from(arg: ScrollModeArg) -> Self {
        match arg {
            ScrollModeArg::Fixed => ScrollMode::Fixed,
            ScrollModeArg::Auto => ScrollMode::Auto,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum LanguageArg {
    Auto,
    En,
    Ko,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Auto => Language::Auto,
            LanguageArg::En => Language::En,
            LanguageArg::Ko => Language::Ko,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum BackgroundArg {
    Color,
    Gradient,
    Image,
}

impl From<BackgroundArg> for BackgroundKind {
    fn from(arg: BackgroundArg) -> Self {
        match arg {
            BackgroundArg::Color => BackgroundKind::Color,
            BackgroundArg::Gradient => BackgroundKind::Gradient,
            BackgroundArg::Image => BackgroundKind::Image,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["marklog"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_base_dir_after_subcommand() {
        let cli = Cli::try_parse_from(["marklog", "list", "--base-dir", "/tmp/x"]).unwrap();
        assert_eq!(cli.base_dir.as_deref(), Some("/tmp/x"));
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_site_transfer_args() {
        let cli = Cli::try_parse_from([
            "marklog", "site", "transfer", "folder1", "folder2", "site3", "--index", "0",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Site {
                action:
                    SiteAction::Transfer {
                        from_folder,
                        to_folder,
                        id,
                        index,
                    },
            }) => {
                assert_eq!(from_folder, "folder1");
                assert_eq!(to_folder, "folder2");
                assert_eq!(id, "site3");
                assert_eq!(index, Some(0));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_settings_value_enums() {
        let cli = Cli::try_parse_from([
            "marklog", "settings", "--theme", "dark", "--folder-rows", "1", "--language", "ko",
        ])
        .unwrap();
        let Some(Commands::Settings {
            theme,
            folder_rows,
            language,
            ..
        }) = cli.command
        else {
            panic!("expected settings");
        };
        assert_eq!(theme.map(Theme::from), Some(Theme::Dark));
        assert_eq!(folder_rows, Some(1));
        assert_eq!(language.map(Language::from), Some(Language::Ko));
    }
}
