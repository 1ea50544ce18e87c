//! Turning a [`LocationMatch`] into one output line.

use crate::model::{LocationMatch, OutputMode};

impl OutputMode {
    /// Render a single match according to this mode.
    pub fn render(&self, m: &LocationMatch) -> String {
        let lat = &m.latitude;
        let long = &m.longitude;

        match self {
            OutputMode::None => {
                let bbox = m
                    .bounding_box
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(":");
                format!(
                    "{lat}:{long},{bbox},{},{},{},{}, {}",
                    m.confidence,
                    m.entity_type,
                    m.match_codes.join(":"),
                    m.formatted_address,
                    m.country_region,
                )
            }
            OutputMode::Bing => format!("https://bing.com/maps?cp={lat}~{long}&lvl=12&style=b"),
            OutputMode::Google => format!("https://maps.google.com/?q={lat},{long}"),
            OutputMode::OpenStreetMap => {
                format!("http://www.openstreetmap.org/?mlat={lat}&mlon={long}&zoom=12")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;

    fn num(v: f64) -> Number {
        Number::from_f64(v).unwrap()
    }

    fn opera_house() -> LocationMatch {
        LocationMatch {
            latitude: num(-33.857),
            longitude: num(151.215),
            bounding_box: [num(-33.86), num(151.21), num(-33.85), num(151.22)],
            confidence: "High".to_string(),
            entity_type: "LandmarkBuilding".to_string(),
            match_codes: vec!["Good".to_string(), "UpHierarchy".to_string()],
            formatted_address: "Bennelong Point, Sydney, NSW 2000".to_string(),
            country_region: "Australia".to_string(),
        }
    }

    #[test]
    fn structured_line() {
        let expected = "-33.857:151.215,-33.86:151.21:-33.85:151.22,High,LandmarkBuilding,\
                        Good:UpHierarchy,Bennelong Point, Sydney, NSW 2000, Australia";
        assert_eq!(OutputMode::None.render(&opera_house()), expected);
    }

    #[test]
    fn bing_url() {
        assert_eq!(
            OutputMode::Bing.render(&opera_house()),
            "https://bing.com/maps?cp=-33.857~151.215&lvl=12&style=b"
        );
    }

    #[test]
    fn google_url() {
        assert_eq!(
            OutputMode::Google.render(&opera_house()),
            "https://maps.google.com/?q=-33.857,151.215"
        );
    }

    #[test]
    fn openstreetmap_url() {
        assert_eq!(
            OutputMode::OpenStreetMap.render(&opera_house()),
            "http://www.openstreetmap.org/?mlat=-33.857&mlon=151.215&zoom=12"
        );
    }

    #[test]
    fn single_match_code_has_no_separator() {
        let mut m = opera_house();
        m.match_codes = vec!["Good".to_string()];
        assert!(OutputMode::None.render(&m).contains(",LandmarkBuilding,Good,Bennelong"));
    }

    #[test]
    fn coordinates_are_not_rounded() {
        let mut m = opera_house();
        m.latitude = num(-33.856784);
        m.longitude = num(151.215297);
        assert_eq!(
            OutputMode::Google.render(&m),
            "https://maps.google.com/?q=-33.856784,151.215297"
        );
    }
}
