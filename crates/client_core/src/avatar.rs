//! Avatar resolution seam. The core treats avatar lookup as a pure
//! `username -> reference` function supplied by a collaborator.

use url::Url;

pub const DICEBEAR_AVATAR_ENDPOINT: &str = "https://api.dicebear.com/7.x/avataaars/svg";

pub trait AvatarResolver: Send + Sync {
    fn resolve(&self, username: &str) -> String;
}

/// Default resolver: a DiceBear URL seeded with the stored username.
pub struct DicebearAvatarResolver {
    endpoint: Url,
}

impl DicebearAvatarResolver {
    pub fn new(endpoint: Url) -> Self {
        Self { endpoint }
    }
}

impl Default for DicebearAvatarResolver {
    fn default() -> Self {
        let endpoint =
            Url::parse(DICEBEAR_AVATAR_ENDPOINT).expect("static avatar endpoint parses");
        Self { endpoint }
    }
}

impl AvatarResolver for DicebearAvatarResolver {
    fn resolve(&self, username: &str) -> String {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("seed", username);
        url.to_string()
    }
}
