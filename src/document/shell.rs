use crate::config::Features;
use crate::document::ElementId;
use crate::error::DocumentError;
use maud::{DOCTYPE, Markup, html};
use std::path::PathBuf;
use url::Url;

/// Markup of a search page holding every element the client expects
pub fn page(features: &Features) -> Markup {
    html! {
        (DOCTYPE)
        html lang="zh-Hant" {
            head {
                meta charset="utf-8";
                title { "藥品查詢" }
            }
            body {
                div class="search-bar" {
                    input type="text" id=(ElementId::SearchInput.as_str()) placeholder="輸入藥品名稱或適應症";
                    button id=(ElementId::SearchButton.as_str()) { "查詢" }
                    // The checkbox always exists so reads never fail; it is only shown when filtering is on
                    label style=(if features.image_filter { "" } else { "display: none" }) {
                        input type="checkbox" id=(ElementId::ImageFilter.as_str());
                        " 僅顯示有外觀圖片"
                    }
                }
                div id=(ElementId::ErrorContainer.as_str()) style="display: none" {}
                div id=(ElementId::LoadingIndicator.as_str()) style="display: none" { "載入中..." }
                div id=(ElementId::ResultsWrapper.as_str()) style="display: none" {
                    div id=(ElementId::ResultContainer.as_str()) {}
                    div id=(ElementId::Pagination.as_str()) style="display: none" {
                        button id=(ElementId::PreviousPage.as_str()) { "上一頁" }
                        select id=(ElementId::PageSelect.as_str()) {}
                        button id=(ElementId::NextPage.as_str()) { "下一頁" }
                    }
                }
            }
        }
    }
}

/// Write the page shell to the temp directory and return its `file://` URL
pub fn write_to_temp(features: &Features) -> Result<Url, DocumentError> {
    let path: PathBuf = std::env::temp_dir().join("drug-search-page.html");
    std::fs::write(&path, page(features).into_string())?;
    ::log::debug!("Wrote page shell to {}", path.display());

    Url::from_file_path(&path)
        .map_err(|_| DocumentError::Url(path.display().to_string()))
}
