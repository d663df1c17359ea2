pub mod auth;
pub mod daily_records;
pub mod equipment;
pub mod garden_care;
pub mod gardens;
pub mod home;
pub mod journal_entries;
pub mod middleware;
pub mod plant_care;
pub mod plants;
pub mod reminders;
pub mod user;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{
    equipment as equipment_entity, garden, garden_care_activity, journal_entry, plant,
    plant_care_activity,
};
use crate::error::{AppError, AppResult};
use crate::services::datetime::utc;
use crate::services::images::{to_data_uri, DefaultImage};

/// A row serialized with its picture inlined as `image_url`.
#[derive(Debug, Serialize)]
pub struct WithImage<T> {
    #[serde(flatten)]
    pub item: T,
    pub image_url: String,
}

pub trait HasImage {
    const DEFAULT_IMAGE: DefaultImage;

    fn image_data(&self) -> Option<&[u8]>;
    fn image_type(&self) -> Option<&str>;

    fn image_url(&self) -> String {
        to_data_uri(self.image_data(), self.image_type(), Self::DEFAULT_IMAGE)
    }
}

macro_rules! has_image {
    ($model:ty, $default:expr) => {
        impl HasImage for $model {
            const DEFAULT_IMAGE: DefaultImage = $default;

            fn image_data(&self) -> Option<&[u8]> {
                self.image_data.as_deref()
            }

            fn image_type(&self) -> Option<&str> {
                self.image_type.as_deref()
            }
        }
    };
}

has_image!(garden::Model, DefaultImage::Garden);
has_image!(plant::Model, DefaultImage::Plant);
has_image!(equipment_entity::Model, DefaultImage::Equipment);
has_image!(journal_entry::Model, DefaultImage::Garden);
has_image!(garden_care_activity::Model, DefaultImage::Garden);
has_image!(plant_care_activity::Model, DefaultImage::Plant);

pub fn with_image<T: HasImage>(item: T) -> WithImage<T> {
    let image_url = item.image_url();
    WithImage { item, image_url }
}

pub fn with_images<T: HasImage>(items: Vec<T>) -> Vec<WithImage<T>> {
    items.into_iter().map(with_image).collect()
}

/// `?start=&end=` on the list routes.
#[derive(Debug, Default, Deserialize)]
pub struct DateRange {
    #[serde(default, with = "utc::option")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, with = "utc::option")]
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Both ends or neither; a lone bound is a client mistake.
    pub fn bounds(&self) -> AppResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
        match (self.start, self.end) {
            (Some(start), Some(end)) if start <= end => Ok(Some((start, end))),
            (Some(_), Some(_)) => Err(AppError::InvalidInput(
                "The start date must be before the end date.".into(),
            )),
            (None, None) => Ok(None),
            _ => Err(AppError::InvalidInput(
                "Both start and end dates are required.".into(),
            )),
        }
    }
}

pub(crate) fn record_action(table: &str, action: &str, user_id: i32) {
    tracing::Span::current()
        .record("table", table)
        .record("action", action)
        .record("user_id", user_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{gardens, plants};

    #[test]
    fn rows_without_pictures_use_the_kind_default() {
        let json = serde_json::to_value(with_image(gardens::tests::sample(1, 5))).unwrap();
        assert_eq!(json["image_url"], "/img/journal.jpg");
        assert_eq!(json["name"], "Back yard");
        assert!(json.get("image_data").is_none());
    }

    #[test]
    fn stored_pictures_are_inlined() {
        let json = serde_json::to_value(with_image(plants::tests::sample(1, 1, 5))).unwrap();
        assert_eq!(json["image_url"], "data:image/png;base64,AQID");
    }

    #[test]
    fn a_lone_range_bound_is_rejected() {
        let range: DateRange = serde_json::from_value(serde_json::json!({
            "start": "2024-06-01"
        }))
        .unwrap();
        assert!(range.bounds().is_err());

        let full: DateRange = serde_json::from_value(serde_json::json!({
            "start": "2024-06-01",
            "end": "2024-06-30T23:59:59"
        }))
        .unwrap();
        assert!(full.bounds().unwrap().is_some());
        assert!(DateRange::default().bounds().unwrap().is_none());
    }
}
