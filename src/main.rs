use std::io::{self, BufRead, IsTerminal, Read};

use anyhow::{Result, anyhow};
use clap::Parser;
use web_translator_rust::languages;

#[derive(Parser, Debug)]
#[command(
    name = "web-translator-rust",
    version,
    about = "Translate text and look up words using public web APIs"
)]
struct Cli {
    /// Target language (default: bn)
    #[arg(short = 'l', long = "lang", default_value = languages::DEFAULT_TARGET_LANG)]
    lang: String,

    /// Source language code, or "auto" to detect from the input
    #[arg(short = 'L', long = "source-lang", default_value = "auto")]
    source_lang: String,

    /// Read the text to translate from a plain-text file instead of stdin
    #[arg(short = 'f', long = "file")]
    file: Option<String>,

    /// Look up a word in the dictionary instead of translating
    #[arg(long = "define")]
    define: Option<String>,

    /// Also save a successful translation to favorites
    #[arg(long = "favorite")]
    favorite: bool,

    /// Remove the favorite at the given position (see --show-favorites)
    #[arg(long = "remove-favorite")]
    remove_favorite: Option<usize>,

    /// Show translation history and exit
    #[arg(long = "show-history")]
    show_history: bool,

    /// Show saved favorites and exit
    #[arg(long = "show-favorites")]
    show_favorites: bool,

    /// Show enabled languages and exit
    #[arg(long = "show-enabled-languages")]
    show_enabled_languages: bool,

    /// Set the theme preference (light|dark)
    #[arg(long = "theme")]
    theme: Option<String>,

    /// Read extra settings from a local TOML file
    #[arg(short = 'r', long = "read-settings")]
    read_settings: Option<String>,

    /// Enable verbose logging
    #[arg(long = "verbose")]
    verbose: bool,

    /// Interactive mode
    #[arg(short = 'i', long = "interactive")]
    interactive: bool,
}

impl Cli {
    fn to_config(&self) -> web_translator_rust::Config {
        web_translator_rust::Config {
            lang: self.lang.clone(),
            source_lang: self.source_lang.clone(),
            define: self.define.clone(),
            favorite: self.favorite,
            remove_favorite: self.remove_favorite,
            show_history: self.show_history,
            show_favorites: self.show_favorites,
            show_enabled_languages: self.show_enabled_languages,
            theme: self.theme.clone(),
            settings_path: self.read_settings.clone(),
            verbose: self.verbose,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    web_translator_rust::logging::init(cli.verbose)?;
    if cli.interactive {
        return run_interactive(cli).await;
    }

    let needs_input = !(cli.show_history
        || cli.show_favorites
        || cli.show_enabled_languages
        || cli.define.is_some()
        || cli.remove_favorite.is_some()
        || cli.theme.is_some());

    let input = if needs_input {
        if let Some(path) = cli.file.as_deref() {
            Some(read_text_file(path)?)
        } else if io::stdin().is_terminal() {
            None
        } else {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
    } else {
        None
    };

    let output = web_translator_rust::run(cli.to_config(), input).await?;
    println!("{}", output);
    Ok(())
}

fn read_text_file(path: &str) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|err| anyhow!("failed to read {path}: {err}"))?;
    String::from_utf8(bytes).map_err(|_| anyhow!("only plain text files are supported: {path}"))
}

struct InteractiveState {
    config: web_translator_rust::Config,
    last_translation: Option<LastTranslation>,
}

struct LastTranslation {
    source_text: String,
    source_lang: String,
    translated_text: String,
    target_lang: String,
}

impl InteractiveState {
    fn new(cli: &Cli) -> Self {
        let mut config = cli.to_config();
        config.define = None;
        config.favorite = false;
        config.remove_favorite = None;
        config.show_history = false;
        config.show_favorites = false;
        config.show_enabled_languages = false;
        config.theme = None;
        Self {
            config,
            last_translation: None,
        }
    }

    fn config_for_run(&self) -> web_translator_rust::Config {
        self.config.clone()
    }
}

async fn run_interactive(cli: Cli) -> Result<()> {
    use std::io::Write;

    let mut state = InteractiveState::new(&cli);
    println!("Interactive mode. Use /quit or /exit to finish.");
    println!("Type /help to see available commands.");

    let mut line = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();
    loop {
        line.clear();
        print!("> ");
        io::stdout().flush()?;
        if stdin_lock.read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.starts_with('/') {
            match handle_interactive_command(input, &mut state).await {
                Ok(true) => break,
                Ok(false) => {}
                Err(err) => eprintln!("{err:#}"),
            }
            continue;
        }

        translate_line(input, &mut state).await;
    }
    Ok(())
}

/// A failed translation reports and leaves the loop ready for the next one.
async fn translate_line(input: &str, state: &mut InteractiveState) {
    match web_translator_rust::run(state.config_for_run(), Some(input.to_string())).await {
        Ok(translated) => {
            println!("{}", translated);
            let source_lang = resolve_source_for_record(&state.config.source_lang, input);
            state.last_translation = Some(LastTranslation {
                source_text: input.to_string(),
                source_lang,
                translated_text: translated,
                target_lang: state.config.lang.clone(),
            });
        }
        Err(err) => eprintln!("{err:#}"),
    }
}

fn resolve_source_for_record(configured: &str, text: &str) -> String {
    if configured.trim().eq_ignore_ascii_case("auto") {
        web_translator_rust::detect::detect_language(text)
            .unwrap_or(languages::DEFAULT_SOURCE_LANG)
            .to_string()
    } else {
        configured.to_string()
    }
}

async fn handle_interactive_command(input: &str, state: &mut InteractiveState) -> Result<bool> {
    let trimmed = input.trim();
    if matches!(trimmed, "/quit" | "/exit") {
        return Ok(true);
    }
    if trimmed == "/help" {
        print_interactive_help();
        return Ok(false);
    }
    if trimmed == "/history" {
        let mut config = state.config_for_run();
        config.show_history = true;
        println!("{}", web_translator_rust::run(config, None).await?);
        return Ok(false);
    }
    if trimmed == "/favorites" {
        let mut config = state.config_for_run();
        config.show_favorites = true;
        println!("{}", web_translator_rust::run(config, None).await?);
        return Ok(false);
    }
    if trimmed == "/favorite" {
        let Some(last) = state.last_translation.as_ref() else {
            eprintln!("nothing translated yet");
            return Ok(false);
        };
        let message = web_translator_rust::save_favorite(
            &last.source_text,
            &last.source_lang,
            &last.translated_text,
            &last.target_lang,
        )?;
        println!("{}", message);
        return Ok(false);
    }
    if trimmed == "/languages" {
        let mut config = state.config_for_run();
        config.show_enabled_languages = true;
        println!("{}", web_translator_rust::run(config, None).await?);
        return Ok(false);
    }
    if trimmed == "/swap" {
        if state.config.source_lang.trim().eq_ignore_ascii_case("auto") {
            eprintln!("cannot swap while source is auto; set /source-lang first");
            return Ok(false);
        }
        std::mem::swap(&mut state.config.lang, &mut state.config.source_lang);
        println!(
            "languages swapped: {} → {}",
            state.config.source_lang, state.config.lang
        );
        return Ok(false);
    }

    if let Some(arg) = trimmed.strip_prefix("/auto") {
        let enabled = parse_toggle(
            arg,
            state.config.source_lang.trim().eq_ignore_ascii_case("auto"),
        )?;
        if enabled {
            state.config.source_lang = "auto".to_string();
        } else if state.config.source_lang.trim().eq_ignore_ascii_case("auto") {
            state.config.source_lang = languages::DEFAULT_SOURCE_LANG.to_string();
        }
        println!("auto-detect: {}", enabled);
        return Ok(false);
    }
    if let Some(arg) = trimmed.strip_prefix("/define") {
        let word = arg.trim();
        if word.is_empty() {
            eprintln!("usage: /define <word>");
            return Ok(false);
        }
        let mut config = state.config_for_run();
        config.define = Some(word.to_string());
        println!("{}", web_translator_rust::run(config, None).await?);
        return Ok(false);
    }
    if let Some(arg) = trimmed.strip_prefix("/remove-favorite") {
        let value = arg.trim();
        let position: usize = value
            .parse()
            .map_err(|_| anyhow!("usage: /remove-favorite <position>"))?;
        let mut config = state.config_for_run();
        config.remove_favorite = Some(position);
        println!("{}", web_translator_rust::run(config, None).await?);
        return Ok(false);
    }
    if let Some(arg) = trimmed.strip_prefix("/theme") {
        let value = arg.trim();
        if value.is_empty() {
            println!("theme: {}", web_translator_rust::current_theme()?);
        } else {
            let mut config = state.config_for_run();
            config.theme = Some(value.to_string());
            println!("{}", web_translator_rust::run(config, None).await?);
        }
        return Ok(false);
    }
    if let Some(arg) = trimmed.strip_prefix("/source-lang") {
        let value = arg.trim();
        if value.is_empty() {
            println!("source-lang: {}", state.config.source_lang);
        } else {
            state.config.source_lang = value.to_string();
            println!("source-lang set to {}", value);
        }
        return Ok(false);
    }
    if let Some(arg) = trimmed.strip_prefix("/lang") {
        let value = arg.trim();
        if value.is_empty() {
            println!("lang: {}", state.config.lang);
        } else {
            state.config.lang = value.to_string();
            println!("lang set to {}", value);
        }
        return Ok(false);
    }

    eprintln!("unknown command: {}", trimmed);
    Ok(false)
}

fn parse_toggle(arg: &str, current: bool) -> Result<bool> {
    let value = arg.trim();
    if value.is_empty() {
        return Ok(!current);
    }
    match value.to_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        _ => Err(anyhow!("expected on/off/true/false/1/0")),
    }
}

fn print_interactive_help() {
    println!("Commands:");
    println!("  /quit, /exit                Exit interactive mode");
    println!("  /lang <code>                Set target language (or show current)");
    println!("  /source-lang <code>         Set source language (or show current)");
    println!("  /swap                       Swap source and target languages");
    println!("  /auto [on|off]              Toggle source auto-detection");
    println!("  /define <word>              Look up a word in the dictionary");
    println!("  /history                    Show translation history");
    println!("  /favorites                  Show saved favorites");
    println!("  /favorite                   Save the last translation to favorites");
    println!("  /remove-favorite <n>        Remove a favorite by position");
    println!("  /theme [light|dark]         Show or set the theme");
    println!("  /languages                  Show enabled languages");
}
