pub mod memory;
pub mod shell;
pub mod webdriver;

use crate::error::DocumentError;

pub use memory::MemoryDocument;
pub use webdriver::WebDriverDocument;

/// Elements of the search page the client reads from or writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    SearchInput,
    SearchButton,
    ImageFilter,
    PreviousPage,
    NextPage,
    PageSelect,
    ResultsWrapper,
    ResultContainer,
    Pagination,
    ErrorContainer,
    LoadingIndicator,
}

impl ElementId {
    pub const ALL: [ElementId; 11] = [
        ElementId::SearchInput,
        ElementId::SearchButton,
        ElementId::ImageFilter,
        ElementId::PreviousPage,
        ElementId::NextPage,
        ElementId::PageSelect,
        ElementId::ResultsWrapper,
        ElementId::ResultContainer,
        ElementId::Pagination,
        ElementId::ErrorContainer,
        ElementId::LoadingIndicator,
    ];

    /// The `id` attribute in the page markup
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementId::SearchInput => "searchValue",
            ElementId::SearchButton => "searchBtn",
            ElementId::ImageFilter => "hasImage",
            ElementId::PreviousPage => "prevPageBtn",
            ElementId::NextPage => "nextPageBtn",
            ElementId::PageSelect => "pageSelect",
            ElementId::ResultsWrapper => "resultsWrapper",
            ElementId::ResultContainer => "resultContainer",
            ElementId::Pagination => "paginationContainer",
            ElementId::ErrorContainer => "errorContainer",
            ElementId::LoadingIndicator => "loadingIndicator",
        }
    }
}

/// CSS `display` values the client switches between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    None,
    Block,
    Flex,
}

impl Display {
    pub fn as_css(&self) -> &'static str {
        match self {
            Display::None => "none",
            Display::Block => "block",
            Display::Flex => "flex",
        }
    }

    pub fn shown(visible: bool, display: Display) -> Display {
        if visible { display } else { Display::None }
    }
}

/// The page the client renders into.
///
/// Reads reflect what the user typed or toggled; writes replace markup or
/// change visibility and enabled state.
#[allow(async_fn_in_trait)]
pub trait Document {
    /// Current value of an input or select
    async fn value(&mut self, id: ElementId) -> Result<String, DocumentError>;

    /// Checked state of a checkbox
    async fn checked(&mut self, id: ElementId) -> Result<bool, DocumentError>;

    /// Rendered text of an element, one line per block
    async fn text(&mut self, id: ElementId) -> Result<String, DocumentError>;

    async fn is_displayed(&mut self, id: ElementId) -> Result<bool, DocumentError>;

    async fn set_value(&mut self, id: ElementId, value: &str) -> Result<(), DocumentError>;

    async fn set_checked(&mut self, id: ElementId, checked: bool) -> Result<(), DocumentError>;

    /// Replace the children of an element with the given markup
    async fn set_inner_html(&mut self, id: ElementId, html: &str) -> Result<(), DocumentError>;

    async fn set_display(&mut self, id: ElementId, display: Display) -> Result<(), DocumentError>;

    async fn set_disabled(&mut self, id: ElementId, disabled: bool) -> Result<(), DocumentError>;
}
