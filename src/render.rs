//! Markup for the result list, page selector and error region.
//!
//! All values coming from the backend are escaped by maud.

use crate::config::{Features, GalleryMode};
use crate::results::{DrugRecord, ResultPage};
use maud::{Markup, html};

/// Detail fields in display order; the label doubles as the payload key
pub const DETAIL_FIELDS: [&str; 8] = [
    "許可證字號",
    "中文品名",
    "英文品名",
    "適應症",
    "用法用量",
    "製造廠國別",
    "發證日期",
    "有效日期",
];

/// Placeholder for a missing shape or color
pub const MISSING_VALUE: &str = "無";

const IMAGE_ALT: &str = "藥品外觀圖片";
const INSERT_LINK_LABEL: &str = "仿單下載";
const BOX_LINK_LABEL: &str = "外盒圖檔";

/// All result blocks of a page
pub fn results(page: &ResultPage, features: &Features) -> Markup {
    html! {
        @for record in &page.results {
            (record_block(record, features))
        }
    }
}

/// One self-contained `result-item` block
pub fn record_block(record: &DrugRecord, features: &Features) -> Markup {
    let images = gallery(record, features.gallery);
    let introductions: Vec<_> = if features.introductions {
        record.linked_introductions().collect()
    } else {
        Vec::new()
    };

    html! {
        div class="result-item" {
            div class="drug-info" {
                @for field in DETAIL_FIELDS {
                    p { strong { (field) "：" } (record.detail(field)) }
                }
            }
            @if !record.components.is_empty() {
                div class="components" {
                    h3 { "成份內容" }
                    ul {
                        @for comp in &record.components {
                            li {
                                (or_blank(&comp.name)) " - " (or_blank(&comp.amount)) " " (or_blank(&comp.unit))
                            }
                        }
                    }
                }
            }
            @if !record.appearance.is_empty() {
                div class="appearance" {
                    h3 { "外觀" }
                    ul {
                        @for app in &record.appearance {
                            li {
                                "形狀: " (or_missing(&app.shape)) " 顏色: " (or_missing(&app.color))
                            }
                        }
                    }
                }
            }
            @if !images.is_empty() {
                div class="image-container" {
                    @for url in &images {
                        img src=(url) alt=(IMAGE_ALT);
                    }
                }
            }
            @if !introductions.is_empty() {
                div class="introduction" {
                    h3 { "藥品介紹" }
                    ul {
                        @for intro in &introductions {
                            li {
                                @if let Some(url) = intro.insert_url() {
                                    a href=(url) target="_blank" { (INSERT_LINK_LABEL) }
                                }
                                " "
                                @if let Some(url) = intro.box_image_url() {
                                    a href=(url) target="_blank" { (BOX_LINK_LABEL) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Image links shown for a record under the given gallery mode
pub fn gallery(record: &DrugRecord, mode: GalleryMode) -> Vec<&str> {
    match mode {
        GalleryMode::All => record.image_urls().collect(),
        // Later entries overwrite earlier ones
        GalleryMode::LastOnly => record.image_urls().last().into_iter().collect(),
    }
}

/// Options `1..=total_pages` with `selected` marked
pub fn page_options(total_pages: u32, selected: u32) -> Markup {
    html! {
        @for n in 1..=total_pages {
            option value=(n) selected[n == selected] { (n) }
        }
    }
}

/// Escaped error text for the error region
pub fn error_message(message: &str) -> Markup {
    html! { (message) }
}

fn or_blank(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn or_missing(value: &Option<String>) -> &str {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v,
        _ => MISSING_VALUE,
    }
}
