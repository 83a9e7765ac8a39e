use crate::document::{Display, Document, ElementId};
use crate::error::DocumentError;
use crate::textview;
use std::collections::HashMap;

/// State of one element of an in-memory page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub inner_html: String,
    pub value: String,
    pub checked: bool,
    pub display: Display,
    pub disabled: bool,
}

impl Element {
    fn with_display(display: Display) -> Self {
        Self {
            inner_html: String::new(),
            value: String::new(),
            checked: false,
            display,
            disabled: false,
        }
    }
}

/// A page kept entirely in memory.
///
/// Used by the terminal front end and by tests, which can inspect every
/// element through [`MemoryDocument::element`].
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    elements: HashMap<ElementId, Element>,
}

impl MemoryDocument {
    /// A freshly loaded page: results, pagination, error and loading regions hidden
    pub fn new() -> Self {
        let elements = ElementId::ALL
            .iter()
            .map(|&id| {
                let display = match id {
                    ElementId::ResultsWrapper
                    | ElementId::Pagination
                    | ElementId::ErrorContainer
                    | ElementId::LoadingIndicator => Display::None,
                    _ => Display::Block,
                };
                (id, Element::with_display(display))
            })
            .collect();
        Self { elements }
    }

    pub fn element(&self, id: ElementId) -> &Element {
        // Every id is populated in `new`
        &self.elements[&id]
    }

    fn element_mut(&mut self, id: ElementId) -> &mut Element {
        self.elements
            .entry(id)
            .or_insert_with(|| Element::with_display(Display::Block))
    }

    pub fn inner_html(&self, id: ElementId) -> &str {
        &self.element(id).inner_html
    }

    pub fn display(&self, id: ElementId) -> Display {
        self.element(id).display
    }

    pub fn disabled(&self, id: ElementId) -> bool {
        self.element(id).disabled
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Document for MemoryDocument {
    async fn value(&mut self, id: ElementId) -> Result<String, DocumentError> {
        Ok(self.element(id).value.clone())
    }

    async fn checked(&mut self, id: ElementId) -> Result<bool, DocumentError> {
        Ok(self.element(id).checked)
    }

    async fn text(&mut self, id: ElementId) -> Result<String, DocumentError> {
        Ok(textview::lines(self.inner_html(id)).join("\n"))
    }

    async fn is_displayed(&mut self, id: ElementId) -> Result<bool, DocumentError> {
        Ok(self.display(id) != Display::None)
    }

    async fn set_value(&mut self, id: ElementId, value: &str) -> Result<(), DocumentError> {
        self.element_mut(id).value = value.to_string();
        Ok(())
    }

    async fn set_checked(&mut self, id: ElementId, checked: bool) -> Result<(), DocumentError> {
        self.element_mut(id).checked = checked;
        Ok(())
    }

    async fn set_inner_html(&mut self, id: ElementId, html: &str) -> Result<(), DocumentError> {
        self.element_mut(id).inner_html = html.to_string();
        Ok(())
    }

    async fn set_display(&mut self, id: ElementId, display: Display) -> Result<(), DocumentError> {
        self.element_mut(id).display = display;
        Ok(())
    }

    async fn set_disabled(&mut self, id: ElementId, disabled: bool) -> Result<(), DocumentError> {
        self.element_mut(id).disabled = disabled;
        Ok(())
    }
}
