use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// One page of search results as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Page number this payload belongs to (1-based)
    pub page: u32,

    /// Total number of pages for the query
    pub pages: u32,

    /// Records on this page
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<DrugRecord>,
}

/// A single registry entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrugRecord {
    /// License and regulatory details keyed by field name
    #[serde(rename = "詳細資料", default, deserialize_with = "null_as_default")]
    pub detailed: HashMap<String, Option<String>>,

    /// Active ingredients
    #[serde(rename = "成份內容", default, deserialize_with = "null_as_default")]
    pub components: Vec<Component>,

    /// Physical appearance entries
    #[serde(rename = "外觀", default, deserialize_with = "null_as_default")]
    pub appearance: Vec<Appearance>,

    /// Package insert and box image links
    #[serde(rename = "藥品介紹", default, deserialize_with = "null_as_default")]
    pub introductions: Vec<Introduction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(rename = "成分名稱", default)]
    pub name: Option<String>,

    #[serde(rename = "含量", default)]
    pub amount: Option<String>,

    #[serde(rename = "含量單位", default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Appearance {
    #[serde(rename = "形狀", default)]
    pub shape: Option<String>,

    #[serde(rename = "顏色", default)]
    pub color: Option<String>,

    #[serde(rename = "外觀圖檔連結", default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Introduction {
    #[serde(rename = "仿單圖檔連結", default)]
    pub insert_url: Option<String>,

    #[serde(rename = "外盒圖檔連結", default)]
    pub box_image_url: Option<String>,
}

/// Body of a non-success response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The message to surface, preferring `message` over `error`
    pub fn into_message(self) -> Option<String> {
        non_empty(self.message).or_else(|| non_empty(self.error))
    }
}

impl DrugRecord {
    /// Value of a detail field, blank when absent
    pub fn detail(&self, field: &str) -> &str {
        self.detailed
            .get(field)
            .and_then(|v| v.as_deref())
            .unwrap_or("")
    }

    /// Image links of the appearance entries, in order, skipping empty ones
    pub fn image_urls(&self) -> impl Iterator<Item = &str> {
        self.appearance
            .iter()
            .filter_map(|a| a.image_url.as_deref())
            .filter(|url| !url.is_empty())
    }

    /// Introductions that carry at least one link
    pub fn linked_introductions(&self) -> impl Iterator<Item = &Introduction> {
        self.introductions
            .iter()
            .filter(|intro| intro.insert_url().is_some() || intro.box_image_url().is_some())
    }
}

impl Introduction {
    pub fn insert_url(&self) -> Option<&str> {
        self.insert_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn box_image_url(&self) -> Option<&str> {
        self.box_image_url.as_deref().filter(|url| !url.is_empty())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Treats an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
