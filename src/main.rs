use clap::Parser;
use drug_search::backends::SearchBackend;
use drug_search::document::Document;
use drug_search::{SearchClient, Session};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

mod args;
mod repl;
use args::Args;
use repl::Command;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match args.client_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            std::process::exit(2);
        }
    };

    ::log::info!("Starting search client for {}", config.endpoint);
    let session = Session::default().with_config(config);

    if args.webdriver.is_some() {
        println!("Note: browser mode requires a WebDriver server (e.g., ChromeDriver).");
        let client = match session.connect_webdriver().await {
            Ok(client) => client,
            Err(e) => {
                ::log::error!("Failed to open browser page: {}", e);
                std::process::exit(1);
            }
        };
        let client = run(client, args.query).await;
        let (_, document) = client.into_parts();
        if let Err(e) = document.close().await {
            ::log::warn!("Failed to close browser session: {}", e);
        }
    } else {
        let client = match session.connect_memory().await {
            Ok(client) => client,
            Err(e) => {
                ::log::error!("Failed to start search client: {}", e);
                std::process::exit(1);
            }
        };
        run(client, args.query).await;
    }
}

/// Read commands from stdin until EOF or `quit`
async fn run<B: SearchBackend, D: Document>(
    mut client: SearchClient<B, D>,
    initial_query: Option<String>,
) -> SearchClient<B, D> {
    if let Some(query) = initial_query {
        step(&mut client, Command::Search(query)).await;
    } else {
        println!("{}", repl::HELP);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt().await;
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                ::log::error!("Failed to read input: {}", e);
                break;
            }
        };
        if !step(&mut client, Command::parse(&line)).await {
            break;
        }
    }
    client
}

/// Apply one command and print the resulting page; false ends the session
async fn step<B: SearchBackend, D: Document>(
    client: &mut SearchClient<B, D>,
    command: Command,
) -> bool {
    let redraw = !matches!(command, Command::Help | Command::Empty | Command::Quit);
    match repl::apply(client, command).await {
        Ok(true) => {}
        Ok(false) => return false,
        Err(e) => {
            ::log::error!("Page update failed: {}", e);
            return true;
        }
    }

    if redraw {
        match repl::view(client).await {
            Ok(text) if !text.is_empty() => println!("{}", text),
            Ok(_) => {}
            Err(e) => ::log::error!("Failed to read page: {}", e),
        }
    }
    true
}

async fn prompt() {
    let mut stdout = tokio::io::stdout();
    // Prompt display is best effort
    let _ = stdout.write_all(b"> ").await;
    let _ = stdout.flush().await;
}
