//! `studybuddy chat` - terminal rendition of the chat widget.

use anyhow::Result;
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};

use studybuddy_client::catalog;
use studybuddy_client::{ChatSession, RelayClient};

pub async fn run(url: String, category: Option<&str>, subject: Option<&str>) -> Result<()> {
    let client = RelayClient::new(url);
    let mut session = ChatSession::new();

    if let Some(name) = category {
        session.select_category(name)?;
    }
    if let Some(name) = subject {
        session.select_subject(name)?;
    }

    print_header(&session);
    print_starters(&session);

    let mut line_editor = Reedline::create();

    loop {
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(session.subject().name.to_string()),
            DefaultPromptSegment::Empty,
        );

        let line = match line_editor.read_line(&prompt)? {
            Signal::Success(buffer) => buffer,
            _ => break,
        };

        match parse_input(&line) {
            Input::Empty => {}
            Input::Quit => break,
            Input::Help => print_help(),
            Input::Starters => print_starters(&session),
            Input::Category(name) => match session.select_category(name) {
                Ok(()) => {
                    print_header(&session);
                    print_starters(&session);
                }
                Err(e) => eprintln!("{e}. Categories: {}", category_names()),
            },
            Input::Subject(name) => match session.select_subject(name) {
                Ok(()) => {
                    print_header(&session);
                    print_starters(&session);
                }
                Err(e) => eprintln!("{e}. Subjects: {}", subject_names(&session)),
            },
            Input::Starter(index) => match session.subject().starters.get(index) {
                Some(starter) => {
                    println!("> {starter}");
                    send(&mut session, &client, starter).await;
                }
                None => eprintln!("No starter #{}", index + 1),
            },
            Input::Unknown(command) => eprintln!("Unknown command: {command} (try /help)"),
            Input::Message(text) => send(&mut session, &client, text).await,
        }
    }

    Ok(())
}

async fn send(session: &mut ChatSession, client: &RelayClient, text: &str) {
    let persona = session.category().persona;
    eprintln!("{} {} is thinking...", persona.emoji(), persona.name());

    if let Some(reply) = session.submit(client, text).await {
        println!("\n{} {}\n", persona.emoji(), reply.content);
    }
}

// ============================================================================
// Input parsing
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Empty,
    Quit,
    Help,
    Starters,
    Category(&'a str),
    Subject(&'a str),
    /// Zero-based starter index.
    Starter(usize),
    Unknown(&'a str),
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Input::Empty;
    }

    if let Some(command) = line.strip_prefix('/') {
        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map(|(n, a)| (n, a.trim()))
            .unwrap_or((command, ""));
        return match name {
            "quit" | "exit" => Input::Quit,
            "help" => Input::Help,
            "starters" => Input::Starters,
            "category" if !arg.is_empty() => Input::Category(arg),
            "subject" if !arg.is_empty() => Input::Subject(arg),
            _ => Input::Unknown(line),
        };
    }

    if let Ok(n) = line.parse::<usize>()
        && n >= 1
    {
        return Input::Starter(n - 1);
    }

    Input::Message(line)
}

// ============================================================================
// Output
// ============================================================================

fn print_header(session: &ChatSession) {
    let category = session.category();
    let persona = category.persona;
    println!();
    println!("{} {} - {}", persona.emoji(), persona.name(), persona.tagline());
    println!(
        "{} {}  /  {} {}",
        category.emoji,
        category.name,
        session.subject().emoji,
        session.subject().name
    );
}

fn print_starters(session: &ChatSession) {
    println!("Try one of these (type its number):");
    for (i, starter) in session.subject().starters.iter().enumerate() {
        println!("  {}. {}", i + 1, starter);
    }
    println!();
}

fn print_help() {
    println!("Commands:");
    println!("  /category NAME   switch category ({})", category_names());
    println!("  /subject NAME    switch subject within the category");
    println!("  /starters        show suggested questions");
    println!("  /quit            leave");
    println!("Switching category or subject starts a new conversation.");
}

fn category_names() -> String {
    catalog::categories()
        .iter()
        .map(|c| c.name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn subject_names(session: &ChatSession) -> String {
    session
        .category()
        .subjects
        .iter()
        .map(|s| s.name)
        .collect::<Vec<_>>()
        .join(", ")
}
