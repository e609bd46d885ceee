// Typed document shapes for the hosted content store
use serde::Deserialize;

/// Envelope returned by a collection listing.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentList {
    pub total: u64,
    pub documents: Vec<Document>,
}

/// A record from one of the content collections.
///
/// Upstream records are free-form; only the fields the portfolio actually
/// displays are deserialized here, everything else is dropped. Missing
/// fields default to `None` so a sparsely filled record still round-trips.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
    #[serde(rename = "Link", default)]
    pub link: Option<String>,
    /// File id of the record's image in the storage bucket.
    #[serde(rename = "Img", default)]
    pub img: Option<String>,
    /// Technology tags; only populated on project records.
    #[serde(rename = "TechStack", default)]
    pub tech_stack: Option<Vec<String>>,
}
