//! `wayfarer chat` — Interactive or single-message chat mode.

use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use wayfarer_config::AppConfig;

const HELP: &str = "\
  Ask about weather, attractions, hotels, routes or food, for example:
    北京的天气怎么样？
    推荐上海的景点
    What should I eat in Chengdu?
    Plan a day in Beijing

  Commands:
    clear   start a new conversation
    help    show this message
    exit    quit (also: quit)";

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Empty,
    Exit,
    Clear,
    Help,
    Message(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    match line.trim() {
        "" => Input::Empty,
        "exit" | "quit" => Input::Exit,
        "clear" => Input::Clear,
        "help" => Input::Help,
        text => Input::Message(text),
    }
}

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let mut agent = super::build_agent(&config);

    if let Some(msg) = message {
        // Single message mode
        let response = agent.process(&msg).await?;
        println!("{response}");
        return Ok(());
    }

    println!();
    println!("  🧭 Wayfarer — Interactive Mode");
    println!();
    println!("  Provider:  {}", agent.provider_name());
    println!("  Model:     {}", agent.model());
    println!("  Tools:     {}", agent.tools().names().join(", "));
    if !config.has_api_key() {
        println!("  Note:      no API key set, answering with the offline keyword provider");
    }
    println!();
    println!("  Type 'help' for examples, 'exit' to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("  You > ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_input(&line) {
            Input::Empty => continue,
            Input::Exit => break,
            Input::Clear => {
                agent.reset_context();
                println!("  ✅ Conversation cleared");
                println!();
            }
            Input::Help => {
                println!("{HELP}");
                println!();
            }
            Input::Message(text) => {
                eprint!("  ...");
                match agent.process(text).await {
                    Ok(response) => {
                        eprint!("\r     \r");
                        println!();
                        for line in response.lines() {
                            println!("  Wayfarer > {line}");
                        }
                        println!();
                    }
                    Err(e) => {
                        eprint!("\r     \r");
                        eprintln!("  [Error] {e}");
                        println!();
                    }
                }
            }
        }
    }

    println!();
    println!("  Goodbye, and safe travels! 👋");
    println!();

    Ok(())
}
