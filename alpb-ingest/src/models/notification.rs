//! Object-created notifications
//!
//! Only the fields the ingest path reads are modelled:
//! `Records[].s3.bucket.name` and `Records[].s3.object.key`.

use percent_encoding::percent_decode_str;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectNotification {
    #[serde(rename = "Records", default)]
    pub records: Vec<NotificationRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotificationRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

/// Bucket and decoded key of one created object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedObject {
    pub bucket: String,
    pub key: String,
}

impl ObjectNotification {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Every created object, keys URL-decoded
    pub fn objects(&self) -> Vec<CreatedObject> {
        self.records
            .iter()
            .map(|record| CreatedObject {
                bucket: record.s3.bucket.name.clone(),
                key: decode_object_key(&record.s3.object.key),
            })
            .collect()
    }
}

/// Keys arrive form-encoded: `+` for space, `%XX` escapes
///
/// Malformed escapes are kept literally. A literal `+` in a key is always
/// sent as `%2B`, so it survives the space substitution.
pub fn decode_object_key(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Records": [
            {
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "bucket": { "name": "alpb-trackman" },
                    "object": { "key": "2024/06/29/CSV/20240629-ClipperMagazine-1_unverified.csv", "size": 1024 }
                }
            }
        ]
    }"#;

    #[test]
    fn test_parse_notification() {
        let notification = ObjectNotification::from_json(SAMPLE).unwrap();
        let objects = notification.objects();

        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].bucket, "alpb-trackman");
        assert_eq!(
            objects[0].key,
            "2024/06/29/CSV/20240629-ClipperMagazine-1_unverified.csv"
        );
    }

    #[test]
    fn test_empty_notification() {
        let notification = ObjectNotification::from_json("{}").unwrap();
        assert!(notification.objects().is_empty());
    }

    #[test]
    fn test_decode_object_key() {
        assert_eq!(decode_object_key("a+b%2Cc"), "a b,c");
        assert_eq!(decode_object_key("100%"), "100%");
        assert_eq!(decode_object_key("bad%zzkey"), "bad%zzkey");
        assert_eq!(decode_object_key("a%2Bb"), "a+b");
    }

    #[test]
    fn test_signed_escape_is_not_hex() {
        // '+' is not a hex digit, so "%+1" is no escape; the '+' still means space
        assert_eq!(decode_object_key("a%+1b"), "a% 1b");
        assert_eq!(decode_object_key("a%-1b"), "a%-1b");
    }
}
