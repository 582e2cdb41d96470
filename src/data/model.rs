use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};

/// Generate a fresh id such as `fav_1718000000000_k3j9x0a1b`.
pub fn generate_id(prefix: &str) -> String {
    let random = uuid::Uuid::new_v4().simple().to_string();
    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), &random[..9])
}

// Backups written by older versions may hold an explicit null for optional text.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A shortcut shown either in the favorites row or inside a folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub memo: String,
}

impl Bookmark {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            memo: String::new(),
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }
}

/// A named, ordered container of sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub emoji: String,
    /// Accent color as a hex string; empty means the theme default.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub color: String,
    #[serde(default)]
    pub sites: Vec<Bookmark>,
}

impl Folder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            emoji: String::new(),
            color: String::new(),
            sites: Vec::new(),
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    pub fn with_sites(mut self, sites: Vec<Bookmark>) -> Self {
        self.sites = sites;
        self
    }

    pub fn site_index(&self, site_id: &str) -> Option<usize> {
        self.sites.iter().position(|s| s.id == site_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollMode {
    /// Folder cards keep a fixed height and scroll internally.
    #[default]
    Fixed,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Auto,
    En,
    Ko,
}

impl Language {
    /// Resolve `Auto` against the process locale.
    pub fn resolve(self) -> Language {
        match self {
            Language::Auto => {
                let locale = std::env::var("LC_ALL")
                    .ok()
                    .filter(|v| !v.is_empty())
                    .or_else(|| std::env::var("LANG").ok())
                    .unwrap_or_default();
                Self::from_locale(&locale)
            }
            explicit => explicit,
        }
    }

    pub fn from_locale(locale: &str) -> Language {
        if locale.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    #[default]
    Color,
    Gradient,
    Image,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    #[serde(rename = "type", default)]
    pub kind: BackgroundKind,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub gradient: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_opacity() -> f64 {
    1.0
}

impl Default for Background {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Color,
            color: String::new(),
            gradient: String::new(),
            image_url: String::new(),
            opacity: default_opacity(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_true")]
    pub show_favorites: bool,
    #[serde(default = "default_folder_rows")]
    pub folder_rows: u8,
    #[serde(default)]
    pub folder_scroll_mode: ScrollMode,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub background: Background,
}

fn default_true() -> bool {
    true
}

fn default_folder_rows() -> u8 {
    2
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            show_favorites: true,
            folder_rows: default_folder_rows(),
            folder_scroll_mode: ScrollMode::Fixed,
            language: Language::Auto,
            background: Background::default(),
        }
    }
}

/// Everything the dashboard persists, stored as one blob.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AppData {
    pub settings: Settings,
    pub favorites: Vec<Bookmark>,
    pub folders: Vec<Folder>,
}

impl AppData {
    pub fn folder(&self, folder_id: &str) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == folder_id)
    }

    pub fn folder_mut(&mut self, folder_id: &str) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| f.id == folder_id)
    }

    pub fn folder_index(&self, folder_id: &str) -> Option<usize> {
        self.folders.iter().position(|f| f.id == folder_id)
    }

    /// Data seeded on first run.
    pub fn sample() -> Self {
        let site = |id: &str, name: &str, url: &str, memo: &str| {
            Bookmark::new(id, name, url).with_memo(memo)
        };

        Self {
            settings: Settings::default(),
            favorites: vec![
                site("fav1", "Google", "https://google.com", "Search Engine"),
                site("fav2", "YouTube", "https://youtube.com", "Video Platform"),
                site("fav3", "Naver", "https://naver.com", "Portal Search"),
            ],
            folders: vec![
                Folder::new("folder1", "Search").with_emoji("🌐").with_sites(vec![
                    site("site1", "Google", "https://google.com", "Search Engine"),
                    site("site2", "Duckduckgo", "https://duckduckgo.com/", "Privacy Search"),
                    site("site3", "Naver", "https://naver.com", "Portal Search"),
                ]),
                Folder::new("folder2", "SNS").with_emoji("💬").with_sites(vec![
                    site("site4", "Instagram", "https://instagram.com", "SNS"),
                    site("site5", "X", "https://x.com/", "Twitter"),
                    site("site6", "Facebook", "https://facebook.com", "Meta"),
                ]),
                Folder::new("folder3", "Productivity").with_emoji("📝").with_sites(vec![
                    site("site7", "Evernote", "https://evernote.com/", "Note Taking"),
                    site("site8", "Notion", "https://notion.so", "Note & Collaboration"),
                    site("site9", "Slack", "https://slack.com", "Workplace Chat"),
                ]),
                Folder::new("folder5", "AI Tools").with_emoji("🤖").with_sites(vec![
                    site("site10", "ChatGPT", "https://chatgpt.com", "Conversational AI Chatbot"),
                    site("site11", "Gemini", "https://gemini.google.com", "Multimodal AI Chatbot"),
                    site("site12", "Claude", "https://claude.ai", "Assistant AI Chatbot"),
                ]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let a = generate_id("fav");
        let b = generate_id("fav");
        assert!(a.starts_with("fav_"));
        assert_eq!(a.split('_').count(), 3);
        assert_eq!(a.rsplit('_').next().unwrap().len(), 9);
        assert_ne!(a, b);
    }

    #[test]
    fn test_settings_use_camel_case_keys() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["showFavorites"], true);
        assert_eq!(json["folderRows"], 2);
        assert_eq!(json["folderScrollMode"], "fixed");
        assert_eq!(json["background"]["type"], "color");
        assert_eq!(json["background"]["imageUrl"], "");
    }

    #[test]
    fn test_bookmark_memo_defaults_to_empty() {
        let item: Bookmark =
            serde_json::from_str(r#"{"id":"a","name":"A","url":"https://a.example"}"#).unwrap();
        assert_eq!(item.memo, "");
    }

    #[test]
    fn test_language_from_locale() {
        assert_eq!(Language::from_locale("ko_KR.UTF-8"), Language::Ko);
        assert_eq!(Language::from_locale("en_US.UTF-8"), Language::En);
        assert_eq!(Language::from_locale(""), Language::En);
        assert_eq!(Language::Ko.resolve(), Language::Ko);
    }

    #[test]
    fn test_sample_has_unique_ids() {
        let data = AppData::sample();
        let mut ids: Vec<&str> = data.favorites.iter().map(|f| f.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), data.favorites.len());
        assert_eq!(data.folders.len(), 4);
        assert_eq!(data.folder_index("folder5"), Some(3));
    }
}
