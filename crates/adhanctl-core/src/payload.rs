//! Time-table payload types.
//!
//! These mirror the JSON document returned by the AlAdhan `timings` endpoints
//! and are also what the on-disk cache stores. Every field is optional on the
//! wire so that partial payloads still decode; the parser decides what is
//! usable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A full time-table response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingsResponse {
    /// Status code echoed in the body (200 on success).
    pub code: i64,
    /// Status text echoed in the body.
    pub status: String,
    /// The time table itself.
    pub data: TimingsData,
}

/// The time table for one date and location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingsData {
    /// Raw time-of-day strings keyed by prayer name, e.g. `"Dhuhr": "12:30 (BST)"`.
    pub timings: BTreeMap<String, String>,
    /// Calendar dates the table applies to.
    pub date: DateInfo,
    /// Location and calculation metadata.
    pub meta: Meta,
}

/// Gregorian and Hijri dates of a time table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateInfo {
    pub gregorian: Gregorian,
    pub hijri: Hijri,
}

/// Gregorian date descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gregorian {
    /// Day-month-year, e.g. `"15-06-2024"`.
    pub date: String,
    pub format: String,
    pub day: String,
    pub weekday: LocalizedName,
    pub month: Month,
    pub year: String,
}

/// Hijri (lunar calendar) date descriptor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hijri {
    /// Day-month-year in the Hijri calendar, e.g. `"09-12-1445"`.
    pub date: String,
    pub format: String,
    pub day: String,
    pub weekday: LocalizedName,
    pub month: Month,
    pub year: String,
}

/// A month with its number and localized names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Month {
    pub number: u32,
    #[serde(flatten)]
    pub name: LocalizedName,
}

/// A name in English and Arabic. Either may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizedName {
    pub en: String,
    pub ar: String,
}

impl LocalizedName {
    /// Returns the Arabic name when `arabic` is set, the English one otherwise.
    pub fn get(&self, arabic: bool) -> &str {
        if arabic { &self.ar } else { &self.en }
    }
}

/// Location and calculation metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Meta {
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone name of the location, e.g. `"Europe/London"`.
    pub timezone: String,
    pub method: MethodInfo,
}

/// Calculation method used to produce the table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodInfo {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "code": 200,
        "status": "OK",
        "data": {
            "timings": {"Fajr": "02:45", "Dhuhr": "13:02 (BST)", "Imsak": "02:35"},
            "date": {
                "readable": "15 Jun 2024",
                "gregorian": {
                    "date": "15-06-2024",
                    "format": "DD-MM-YYYY",
                    "day": "15",
                    "weekday": {"en": "Saturday"},
                    "month": {"number": 6, "en": "June"},
                    "year": "2024"
                },
                "hijri": {
                    "date": "09-12-1445",
                    "format": "DD-MM-YYYY",
                    "day": "09",
                    "weekday": {"en": "Al Sabt", "ar": "السبت"},
                    "month": {"number": 12, "en": "Dhū al-Ḥijjah", "ar": "ذوالحجة"},
                    "year": "1445",
                    "holidays": []
                }
            },
            "meta": {
                "latitude": 51.5073509,
                "longitude": -0.1277583,
                "timezone": "Europe/London",
                "method": {"id": 3, "name": "Muslim World League", "params": {"Fajr": 18}},
                "school": "STANDARD"
            }
        }
    }"#;

    #[test]
    fn decodes_full_response() {
        let resp: TimingsResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(resp.code, 200);
        assert_eq!(resp.data.timings["Dhuhr"], "13:02 (BST)");
        assert_eq!(resp.data.date.gregorian.date, "15-06-2024");
        assert_eq!(resp.data.date.gregorian.month.number, 6);
        assert_eq!(resp.data.date.hijri.month.name.en, "Dhū al-Ḥijjah");
        assert_eq!(resp.data.date.hijri.weekday.get(true), "السبت");
        assert_eq!(resp.data.meta.timezone, "Europe/London");
        assert_eq!(resp.data.meta.method.id, 3);
    }

    #[test]
    fn decodes_partial_response() {
        let resp: TimingsResponse =
            serde_json::from_str(r#"{"data": {"timings": {"Fajr": "05:12"}}}"#).unwrap();
        assert_eq!(resp.data.timings.len(), 1);
        assert!(resp.data.date.gregorian.date.is_empty());
        assert!(resp.data.meta.timezone.is_empty());
    }

    #[test]
    fn cache_roundtrip_preserves_hijri() {
        let resp: TimingsResponse = serde_json::from_str(SAMPLE).unwrap();
        let json = serde_json::to_string(&resp).unwrap();
        let back: TimingsResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(resp, back);
    }
}
