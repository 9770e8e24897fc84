use crate::{GameConfig, JokerTag};
use serde::{Deserialize, Serialize};

pub const BACKGROUND_KEY: &str = "background";
pub const CARD_BACK_KEY: &str = "card-back";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetEntry {
    pub key: String,
    pub path: String,
}

/// Images a front end has to fetch before the board is shown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssetManifest {
    pub images: Vec<AssetEntry>,
}

impl AssetManifest {
    pub fn for_config(config: &GameConfig) -> Self {
        let mut images = vec![
            entry(BACKGROUND_KEY, "background.jpg"),
            entry(CARD_BACK_KEY, "card-back.png"),
        ];
        for n in 1..=config.number_pool {
            let key = format!("card-front-{n}");
            let file = format!("{key}.png");
            images.push(entry(&key, &file));
        }
        for tag in JokerTag::ALL {
            images.push(entry(tag.key(), &format!("{}.png", tag.key())));
        }
        Self { images }
    }

    /// Looks up an entry by bare file name, as requested under `/assets/`.
    pub fn by_file_name(&self, name: &str) -> Option<&AssetEntry> {
        self.images
            .iter()
            .find(|entry| entry.path.strip_prefix("assets/") == Some(name))
    }
}

fn entry(key: &str, file: &str) -> AssetEntry {
    AssetEntry {
        key: key.to_string(),
        path: format!("assets/{file}"),
    }
}
