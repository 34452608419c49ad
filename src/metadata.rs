//! Metadata recorded about a point source, used to forward header values and vlrs.
//!
//! A reader (or any other producer) records the header values and vlrs it saw. When a writer is
//! told to forward a value, it looks it up here by name, or, for vlrs, by record id and user id.

use std::collections::HashMap;

/// One vlr recorded in metadata.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VlrEntry {
    /// The user that created this record.
    pub user_id: String,
    /// The record id.
    pub record_id: u16,
    /// Textual description of these data.
    pub description: String,
    /// The data, base64 encoded.
    pub data: String,
}

/// Source metadata.
///
/// # Examples
///
/// ```
/// use las_writer::Metadata;
///
/// let mut metadata = Metadata::default();
/// metadata.set_header_value("minor_version", "4");
/// metadata.add_vlr("LASF_Projection", 2112, "wkt", "R0VPR0NT");
/// assert_eq!(Some("4"), metadata.header_value("minor_version"));
/// assert_eq!(Some("R0VPR0NT"), metadata.find_vlr(2112, "LASF_Projection"));
/// assert_eq!(None, metadata.find_vlr(2112, "liblas"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata {
    header: HashMap<String, String>,
    vlrs: Vec<VlrEntry>,
}

impl Metadata {
    /// Records a header value.
    pub fn set_header_value(&mut self, name: &str, value: &str) {
        let _ = self.header.insert(name.to_string(), value.to_string());
    }

    /// Returns a recorded header value.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.header.get(name).map(String::as_str)
    }

    /// Records a vlr. `data` is base64 encoded.
    pub fn add_vlr(&mut self, user_id: &str, record_id: u16, description: &str, data: &str) {
        self.vlrs.push(VlrEntry {
            user_id: user_id.to_string(),
            record_id,
            description: description.to_string(),
            data: data.to_string(),
        });
    }

    /// Returns the recorded vlrs, in the order they were added.
    pub fn vlrs(&self) -> &[VlrEntry] {
        &self.vlrs
    }

    /// Finds the base64 data of the first vlr with this record id and user id.
    pub fn find_vlr(&self, record_id: u16, user_id: &str) -> Option<&str> {
        self.vlrs
            .iter()
            .find(|vlr| vlr.record_id == record_id && vlr.user_id == user_id)
            .map(|vlr| vlr.data.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins() {
        let mut metadata = Metadata::default();
        metadata.add_vlr("a", 1, "", "Zmlyc3Q=");
        metadata.add_vlr("a", 1, "", "c2Vjb25k");
        assert_eq!(Some("Zmlyc3Q="), metadata.find_vlr(1, "a"));
        assert_eq!(None, metadata.find_vlr(2, "a"));
        assert_eq!(2, metadata.vlrs().len());
    }

    #[test]
    fn header_values_are_replaced() {
        let mut metadata = Metadata::default();
        metadata.set_header_value("format", "1");
        metadata.set_header_value("format", "3");
        assert_eq!(Some("3"), metadata.header_value("format"));
        assert_eq!(None, metadata.header_value("software_id"));
    }
}
