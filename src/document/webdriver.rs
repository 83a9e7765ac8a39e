use crate::config::ClientConfig;
use crate::document::{Display, Document, ElementId, shell};
use crate::error::DocumentError;
use fantoccini::{Client, ClientBuilder};
use serde_json::{Value, json};

/// A search page open in a real browser, driven over WebDriver
pub struct WebDriverDocument {
    client: Client,
}

impl WebDriverDocument {
    /// Connect to the WebDriver server and open the search page.
    ///
    /// Without a configured `page_url` the built-in page shell is written to
    /// the temp directory and opened from there.
    pub async fn connect(config: &ClientConfig) -> Result<Self, DocumentError> {
        ::log::info!("Connecting to WebDriver at {}", config.webdriver_url);
        let client = ClientBuilder::native()
            .connect(&config.webdriver_url)
            .await?;

        let page_url = match &config.page_url {
            Some(url) => url.clone(),
            None => shell::write_to_temp(&config.features)?.to_string(),
        };
        ::log::info!("Opening search page {}", page_url);
        client.goto(&page_url).await?;

        Ok(Self { client })
    }

    /// End the browser session
    pub async fn close(self) -> Result<(), DocumentError> {
        self.client.close().await?;
        Ok(())
    }

    /// Run a script against one element, passed in as `el`
    async fn run(&self, id: ElementId, body: &str, arg: Value) -> Result<Value, DocumentError> {
        let script = format!(
            "const el = document.getElementById(arguments[0]); if (!el) {{ return null; }} {}",
            body
        );
        let value = self
            .client
            .execute(&script, vec![json!(id.as_str()), arg])
            .await?;
        Ok(value)
    }
}

impl Document for WebDriverDocument {
    async fn value(&mut self, id: ElementId) -> Result<String, DocumentError> {
        let value = self.run(id, "return el.value;", Value::Null).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn checked(&mut self, id: ElementId) -> Result<bool, DocumentError> {
        let value = self.run(id, "return el.checked;", Value::Null).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn text(&mut self, id: ElementId) -> Result<String, DocumentError> {
        let value = self.run(id, "return el.innerText;", Value::Null).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn is_displayed(&mut self, id: ElementId) -> Result<bool, DocumentError> {
        let value = self
            .run(
                id,
                "return window.getComputedStyle(el).display !== 'none';",
                Value::Null,
            )
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn set_value(&mut self, id: ElementId, value: &str) -> Result<(), DocumentError> {
        self.run(id, "el.value = arguments[1];", json!(value)).await?;
        Ok(())
    }

    async fn set_checked(&mut self, id: ElementId, checked: bool) -> Result<(), DocumentError> {
        self.run(id, "el.checked = arguments[1];", json!(checked))
            .await?;
        Ok(())
    }

    async fn set_inner_html(&mut self, id: ElementId, html: &str) -> Result<(), DocumentError> {
        self.run(id, "el.innerHTML = arguments[1];", json!(html))
            .await?;
        Ok(())
    }

    async fn set_display(&mut self, id: ElementId, display: Display) -> Result<(), DocumentError> {
        self.run(id, "el.style.display = arguments[1];", json!(display.as_css()))
            .await?;
        Ok(())
    }

    async fn set_disabled(&mut self, id: ElementId, disabled: bool) -> Result<(), DocumentError> {
        self.run(id, "el.disabled = arguments[1];", json!(disabled))
            .await?;
        Ok(())
    }
}
