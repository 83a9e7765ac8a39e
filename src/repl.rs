use drug_search::backends::SearchBackend;
use drug_search::document::{Document, ElementId};
use drug_search::{DocumentError, SearchClient, UiEvent};

pub const HELP: &str = "\
commands:
  s <text> | search <text> | <text>   search for <text>
  n | next                            next page
  p | prev                            previous page
  g <n> | page <n>                    jump to page <n>
  i | image                           toggle the has-image filter
  h | help                            show this help
  q | quit                            exit";

/// A line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Next,
    Previous,
    Page(String),
    ToggleImage,
    Help,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head {
            "" => Command::Empty,
            "s" | "search" => Command::Search(rest.to_string()),
            "n" | "next" if rest.is_empty() => Command::Next,
            "p" | "prev" if rest.is_empty() => Command::Previous,
            "g" | "page" => Command::Page(rest.to_string()),
            "i" | "image" if rest.is_empty() => Command::ToggleImage,
            "h" | "help" if rest.is_empty() => Command::Help,
            "q" | "quit" if rest.is_empty() => Command::Quit,
            // Anything else is a query, as if typed into the search box
            _ => Command::Search(line.to_string()),
        }
    }
}

/// Run one command against the client, returning false when the session should end
pub async fn apply<B: SearchBackend, D: Document>(
    client: &mut SearchClient<B, D>,
    command: Command,
) -> Result<bool, DocumentError> {
    match command {
        Command::Search(text) => {
            client
                .document_mut()
                .set_value(ElementId::SearchInput, &text)
                .await?;
            client.handle(UiEvent::SearchClicked).await?;
        }
        Command::Next => client.handle(UiEvent::NextClicked).await?,
        Command::Previous => client.handle(UiEvent::PreviousClicked).await?,
        Command::Page(raw) => client.handle(UiEvent::PageSelected(raw)).await?,
        Command::ToggleImage => {
            if !client.features().image_filter {
                println!("image filter is not available on this page");
                return Ok(true);
            }
            let document = client.document_mut();
            let checked = document.checked(ElementId::ImageFilter).await?;
            document.set_checked(ElementId::ImageFilter, !checked).await?;
            client.handle(UiEvent::ImageFilterChanged).await?;
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => return Ok(false),
        Command::Empty => {}
    }
    Ok(true)
}

/// What the page currently shows, as terminal text
pub async fn view<B: SearchBackend, D: Document>(
    client: &mut SearchClient<B, D>,
) -> Result<String, DocumentError> {
    let state = client.state().clone();
    let image_filter = client.features().image_filter;
    let document = client.document_mut();

    if document.is_displayed(ElementId::ErrorContainer).await? {
        let message = document.text(ElementId::ErrorContainer).await?;
        return Ok(format!("! {}", message));
    }
    if !document.is_displayed(ElementId::ResultsWrapper).await? {
        return Ok(String::new());
    }

    let mut out = document.text(ElementId::ResultContainer).await?;
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&format!(
        "-- {} | page {} / {}",
        state.current_query, state.current_page, state.total_pages
    ));
    if image_filter && state.has_image_filter {
        out.push_str(" | has image");
    }
    Ok(out)
}
