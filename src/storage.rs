use crate::errors::StorageError;
use crate::models::{UserSettings, UserSettingsUpdate};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info};

pub const PROFILE_KEY: &str = "userSettings";

/// Local key-value profile storage backed by a single JSON object file.
pub struct ProfileStore {
    path: PathBuf,
    settings: UserSettings,
}

impl ProfileStore {
    pub async fn load(path: PathBuf) -> Self {
        let settings = load_settings(&path).await;
        Self { path, settings }
    }

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    pub async fn update(&mut self, update: UserSettingsUpdate) -> Result<&UserSettings, StorageError> {
        let mut next = self.settings.clone();
        if let Some(name) = update.name {
            next.name = name;
        }
        if let Some(picture) = update.profile_picture {
            next.profile_picture = picture;
        }

        persist_settings(&self.path, &next).await?;
        self.settings = next;
        info!("profile saved");
        Ok(&self.settings)
    }

    pub async fn set_picture(
        &mut self,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<&UserSettings, StorageError> {
        let uri = to_data_uri(content_type, bytes)?;
        self.update(UserSettingsUpdate {
            name: None,
            profile_picture: Some(Some(uri)),
        })
        .await
    }

    pub fn initials(&self) -> String {
        initials(&self.settings.name)
    }
}

async fn load_settings(path: &Path) -> UserSettings {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return UserSettings::default(),
        Err(err) => {
            error!("failed to read profile file: {err}");
            return UserSettings::default();
        }
    };

    let parsed = serde_json::from_slice::<Map<String, Value>>(&bytes).and_then(|mut store| {
        match store.remove(PROFILE_KEY) {
            Some(value) => serde_json::from_value(value),
            None => Ok(UserSettings::default()),
        }
    });

    parsed.unwrap_or_else(|err| {
        error!("failed to parse profile file: {err}");
        UserSettings::default()
    })
}

async fn persist_settings(path: &Path, settings: &UserSettings) -> Result<(), StorageError> {
    // Other keys written by earlier versions are preserved.
    let mut store = match fs::read(path).await {
        Ok(bytes) => serde_json::from_slice::<Map<String, Value>>(&bytes).unwrap_or_else(|err| {
            error!("profile file is corrupt, other stored keys will be dropped: {err}");
            Map::new()
        }),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Map::new(),
        Err(err) => return Err(err.into()),
    };
    store.insert(PROFILE_KEY.to_string(), serde_json::to_value(settings)?);

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(&store)?;
    fs::write(path, payload).await?;
    Ok(())
}

pub fn to_data_uri(content_type: &str, bytes: &[u8]) -> Result<String, StorageError> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if !mime.starts_with("image/") {
        return Err(StorageError::UnsupportedMedia(content_type.to_string()));
    }
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

pub fn initials(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    let first_letter = |part: &str| part.chars().next().into_iter().flat_map(char::to_uppercase);

    match parts.as_slice() {
        [] => "U".to_string(),
        [only] => first_letter(*only).collect(),
        [first, .., last] => first_letter(*first).chain(first_letter(*last)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique_path(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("moodup_{tag}_{}_{}.json", std::process::id(), nanos));
        path
    }

    #[test]
    fn initials_follow_name_shape() {
        assert_eq!(initials(""), "U");
        assert_eq!(initials("   "), "U");
        assert_eq!(initials("ada"), "A");
        assert_eq!(initials("Ada King Lovelace"), "AL");
        assert_eq!(initials("  grace   hopper "), "GH");
    }

    #[test]
    fn data_uri_embeds_base64() {
        let uri = to_data_uri("image/png", b"abc").unwrap();
        assert_eq!(uri, "data:image/png;base64,YWJj");
    }

    #[test]
    fn data_uri_rejects_non_images() {
        assert!(matches!(
            to_data_uri("text/plain", b"abc"),
            Err(StorageError::UnsupportedMedia(_))
        ));
    }

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let store = ProfileStore::load(unique_path("missing")).await;
        assert_eq!(store.settings(), &UserSettings::default());
        assert_eq!(store.initials(), "U");
    }

    #[tokio::test]
    async fn update_persists_under_namespaced_key() {
        let path = unique_path("update");
        let mut store = ProfileStore::load(path.clone()).await;
        store
            .update(UserSettingsUpdate {
                name: Some("Ada Lovelace".to_string()),
                profile_picture: None,
            })
            .await
            .unwrap();
        store.set_picture("image/jpeg", b"\xff\xd8").await.unwrap();

        let raw: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw[PROFILE_KEY]["name"], "Ada Lovelace");
        assert_eq!(raw[PROFILE_KEY]["profilePicture"], "data:image/jpeg;base64,/9g=");

        let reloaded = ProfileStore::load(path.clone()).await;
        assert_eq!(reloaded.settings().name, "Ada Lovelace");
        assert_eq!(reloaded.initials(), "AL");

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn null_picture_clears_it() {
        let path = unique_path("clear");
        let mut store = ProfileStore::load(path.clone()).await;
        store.set_picture("image/png", b"x").await.unwrap();

        let update: UserSettingsUpdate =
            serde_json::from_str(r#"{"profilePicture": null}"#).unwrap();
        let settings = store.update(update).await.unwrap();
        assert!(settings.profile_picture.is_none());

        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn corrupt_file_loads_defaults() {
        let path = unique_path("corrupt");
        std::fs::write(&path, b"{not json").unwrap();
        let store = ProfileStore::load(path.clone()).await;
        assert_eq!(store.settings(), &UserSettings::default());
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn saving_over_corrupt_file_rewrites_it() {
        let path = unique_path("rewrite");
        std::fs::write(&path, b"{not json").unwrap();
        let mut store = ProfileStore::load(path.clone()).await;
        store
            .update(UserSettingsUpdate {
                name: Some("Grace".to_string()),
                profile_picture: None,
            })
            .await
            .unwrap();

        let raw: Map<String, Value> = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[PROFILE_KEY]["name"], "Grace");
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn saving_keeps_unrelated_keys() {
        let path = unique_path("foreign");
        std::fs::write(&path, br#"{"theme":"dark"}"#).unwrap();
        let mut store = ProfileStore::load(path.clone()).await;
        store
            .update(UserSettingsUpdate {
                name: Some("Grace".to_string()),
                profile_picture: None,
            })
            .await
            .unwrap();

        let raw: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw[PROFILE_KEY]["name"], "Grace");
        let _ = std::fs::remove_file(path);
    }
}
