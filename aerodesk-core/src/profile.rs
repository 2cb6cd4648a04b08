use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::repository::Record;
use crate::{require, ValidationResult};

/// A user profile. `email` is the key used for deletion.
///
/// Stored as sent: `districtCode` keeps whatever JSON the caller posted (forms
/// send a string, the document schema a number) and unknown keys ride along in
/// `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub country: String,
    pub state: String,
    pub district: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district_code: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airline_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iata_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icao_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Profile {
    pub fn validate(&self) -> ValidationResult<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        Ok(())
    }

    pub fn has_email(&self, email: &str) -> bool {
        self.email == email
    }
}

impl Record for Profile {
    const COLLECTION: &'static str = "users";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;
    use serde_json::json;

    #[test]
    fn test_district_code_kept_verbatim() {
        let from_form: Profile =
            serde_json::from_str(r#"{"name":"Asha","email":"a@x.io","districtCode":"007"}"#).unwrap();
        assert_eq!(from_form.district_code, Some(json!("007")));

        let from_doc: Profile =
            serde_json::from_str(r#"{"name":"Asha","email":"a@x.io","districtCode":560}"#).unwrap();
        assert_eq!(from_doc.district_code, Some(json!(560)));

        let spaced: Profile =
            serde_json::from_str(r#"{"email":"a@x.io","districtCode":"560 001"}"#).unwrap();
        assert_eq!(serde_json::to_value(&spaced).unwrap()["districtCode"], "560 001");
    }

    #[test]
    fn test_unknown_keys_survive() {
        let sent = json!({"name": "Asha", "email": "a@x.io", "phone": "+91 80 1234", "prefs": {"seat": "aisle"}});
        let profile: Profile = serde_json::from_value(sent.clone()).unwrap();
        assert_eq!(profile.extra["phone"], "+91 80 1234");

        let back = serde_json::to_value(&profile).unwrap();
        assert_eq!(back["phone"], sent["phone"]);
        assert_eq!(back["prefs"], sent["prefs"]);
        assert!(back.get("districtCode").is_none());
    }

    #[test]
    fn test_email_is_required() {
        let profile = Profile { name: "Asha".into(), ..Default::default() };
        assert_eq!(profile.validate(), Err(ValidationError::MissingField("email")));
    }
}
