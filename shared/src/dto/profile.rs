use super::auth::{User, UserPatch};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `GET /profile/`
///
/// Quota fields are only present on reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub user: User,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_analyses: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_total: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota_percent: Option<u32>,
}

impl UserProfile {
    /// Patch that folds this profile into a cached [`User`].
    pub fn to_patch(&self) -> UserPatch {
        UserPatch {
            username: Some(self.user.username.clone()),
            email: Some(self.user.email.clone()),
            first_name: Some(self.user.first_name.clone()),
            last_name: Some(self.user.last_name.clone()),
            bio: self.bio.clone(),
            location: self.location.clone(),
            birth_date: self.birth_date,
            website: self.website.clone(),
            profile_picture: self.profile_picture.clone(),
        }
    }
}

/// Uploaded avatar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePicture {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// `PATCH /profile/` (multipart)
///
/// Empty text fields are not sent, so they leave the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub bio: String,
    pub location: String,
    pub birth_date: String,
    pub website: String,
    pub picture: Option<ProfilePicture>,
}

impl ProfileUpdate {
    /// Form prefilled from the stored profile, names falling back to the cached user.
    pub fn prefill(profile: &UserProfile, cached: Option<&User>) -> Self {
        let pick = |stored: &str, cached: Option<&str>| {
            if stored.is_empty() {
                cached.unwrap_or_default().to_string()
            } else {
                stored.to_string()
            }
        };
        Self {
            first_name: pick(&profile.user.first_name, cached.map(|u| u.first_name.as_str())),
            last_name: pick(&profile.user.last_name, cached.map(|u| u.last_name.as_str())),
            email: pick(&profile.user.email, cached.map(|u| u.email.as_str())),
            bio: profile.bio.clone().unwrap_or_default(),
            location: profile.location.clone().unwrap_or_default(),
            birth_date: profile.birth_date.map(|d| d.to_string()).unwrap_or_default(),
            website: profile.website.clone().unwrap_or_default(),
            picture: None,
        }
    }

    /// Text fields that will be sent, in form order.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("bio", &self.bio),
            ("location", &self.location),
            ("birth_date", &self.birth_date),
            ("website", &self.website),
        ]
        .into_iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(name, value)| (name, value.trim().to_string()))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.picture.is_none() && self.text_fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_with_quota() {
        let profile: UserProfile = serde_json::from_value(json!({
            "user": {"id": 1, "username": "alice", "email": "alice@example.com"},
            "profile_picture": null,
            "bio": "Signals person",
            "location": "",
            "birth_date": "1990-05-17",
            "website": null,
            "total_analyses": 5,
            "quota_total": 50,
            "quota_percent": 10
        }))
        .unwrap();

        assert_eq!(profile.quota_percent, Some(10));
        let patch = profile.to_patch();
        assert_eq!(patch.bio.as_deref(), Some("Signals person"));
        assert_eq!(patch.birth_date, NaiveDate::from_ymd_opt(1990, 5, 17));
        assert!(patch.website.is_none());
    }

    #[test]
    fn test_update_skips_blank_fields() {
        let update = ProfileUpdate {
            bio: "  ".into(),
            location: "Lisbon".into(),
            ..Default::default()
        };
        assert_eq!(update.text_fields(), vec![("location", "Lisbon".to_string())]);
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn test_prefill_falls_back_to_cached_user() {
        let profile: UserProfile = serde_json::from_value(json!({
            "user": {"id": 1, "username": "alice", "email": "", "first_name": "Alice"},
            "birth_date": "1990-05-17"
        }))
        .unwrap();
        let cached: User = serde_json::from_value(json!({
            "id": 1, "username": "alice", "email": "alice@example.com", "last_name": "Smith"
        }))
        .unwrap();

        let form = ProfileUpdate::prefill(&profile, Some(&cached));
        assert_eq!(form.first_name, "Alice");
        assert_eq!(form.last_name, "Smith");
        assert_eq!(form.email, "alice@example.com");
        assert_eq!(form.birth_date, "1990-05-17");
    }
}
