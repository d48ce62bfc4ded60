//! Command selection and the interactive session loop.

use super::logging::{init_logging, LogConfig};
use super::render::{config_lines, ensure_newline, print_messages, print_result};
use super::session::{self, SessionCommand, HELP};
use super::setup::{Cli, Commands, RenderView};
use clap::Parser;
use console::Term;
use quotegen::api::{self, QuoteApi};
use quotegen::commands::config::ConfigAction;
use quotegen::config::{self, QuoteConfig};
use quotegen::error::{QuoteError, Result};
use quotegen::export::{print_document, BrowserHost, FileHost, PrintHost};
use quotegen::gate::{Credentials, NOT_CONFIGURED};
use quotegen::render::{Branding, EditorSection, QuoteRenderer};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const PROMPT: &str = "quote> ";
const HISTORY_FILENAME: &str = "history.txt";

struct AppContext {
    config_dir: PathBuf,
    config: QuoteConfig,
    use_color: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        with_ansi: !cli.no_color && io::stderr().is_terminal(),
    });

    let ctx = init_context(&cli)?;

    match cli.command {
        None | Some(Commands::Session) => handle_session(&ctx),
        Some(Commands::Render {
            script,
            view,
            section,
            output,
            username,
            password,
        }) => {
            let supplied = match (username, password) {
                (Some(u), Some(p)) => Some(Credentials::new(u, p)),
                _ => None,
            };
            handle_render(&ctx, &script, view, section, output, supplied)
        }
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_dir = config::config_dir()?;
    let config = QuoteConfig::load_or_default(&config_dir);
    debug!(dir = %config_dir.display(), "configuration loaded");

    Ok(AppContext {
        config_dir,
        config,
        use_color: !cli.no_color && Term::stdout().features().colors_supported(),
    })
}

fn new_api(ctx: &AppContext) -> Result<QuoteApi> {
    QuoteApi::from_config(&ctx.config, ctx.use_color)
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = api::config(&ctx.config_dir, action)?;
    if show_all {
        if let Some(config) = &result.config {
            for line in config_lines(config) {
                println!("{}", line);
            }
        }
    }

    let renderer = QuoteRenderer::with_color(Branding::default(), ctx.use_color)?;
    print_messages(&renderer, &result.messages);
    if result
        .messages
        .iter()
        .any(|m| m.level == quotegen::commands::MessageLevel::Error)
    {
        return Err(QuoteError::Config("configuration unchanged".to_string()));
    }
    Ok(())
}

fn handle_render(
    ctx: &AppContext,
    script: &Path,
    view: RenderView,
    section: Option<String>,
    output: Option<PathBuf>,
    supplied: Option<Credentials>,
) -> Result<()> {
    let mut api = new_api(ctx)?;
    if !api.is_unlocked() {
        let credentials = supplied.ok_or(QuoteError::AccessDenied)?;
        api.login(&credentials);
        if !api.is_unlocked() {
            return Err(QuoteError::AccessDenied);
        }
    }

    let source = read_script(script)?;
    for (number, line) in source.lines().enumerate() {
        let command = session::parse_line(line)
            .map_err(|e| QuoteError::Command(format!("line {}: {}", number + 1, e)))?;
        let Some(command) = command else {
            continue;
        };
        if !command.is_scriptable() {
            warn!(line = number + 1, "ignoring non-editing command in script");
            continue;
        }
        apply(&mut api, command)
            .map_err(|e| QuoteError::Command(format!("line {}: {}", number + 1, e)))?;
    }

    let text = match view {
        RenderView::Editor => {
            let section = section
                .map(|s| s.parse::<EditorSection>())
                .transpose()?;
            let result = api.edit_section(section)?;
            rendition_text(&result)
        }
        RenderView::Preview => rendition_text(&api.preview()?),
        RenderView::Html => {
            let result = api.preview()?;
            let markup = result
                .rendered
                .as_ref()
                .and_then(|r| r.preview_root())
                .unwrap_or_default();
            print_document(markup, false)
        }
    };

    match output {
        Some(path) => fs::write(path, text)?,
        None => print!("{}", ensure_newline(&text)),
    }
    Ok(())
}

fn read_script(script: &Path) -> Result<String> {
    if script == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(script)?)
    }
}

fn rendition_text(result: &quotegen::commands::CmdResult) -> String {
    result
        .rendered
        .as_ref()
        .map(|r| r.text().to_string())
        .unwrap_or_default()
}

/// Applies an editing or view-switching command without printing anything.
fn apply(api: &mut QuoteApi, command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::Edit(edit) => api.edit(edit).map(|_| ()),
        SessionCommand::EditView(section) => api.edit_section(section).map(|_| ()),
        SessionCommand::Preview => api.preview().map(|_| ()),
        _ => Ok(()),
    }
}

fn handle_session(ctx: &AppContext) -> Result<()> {
    let mut api = new_api(ctx)?;
    let interactive = io::stdin().is_terminal();
    let mut source = if interactive {
        LineSource::editor(&ctx.config_dir)?
    } else {
        LineSource::Piped(io::stdin().lock().lines())
    };

    if !api.is_unlocked() {
        if !api.gate_configured() {
            println!("The quote is locked. {}", NOT_CONFIGURED);
        } else if interactive {
            if !prompt_login(&mut api, &mut source)? {
                source.finish();
                return Ok(());
            }
        } else {
            println!("The quote is locked; sign in with: login <user> <password>");
        }
    }
    if api.is_unlocked() {
        print_or_report(&api, api.show());
    }

    while let Some(line) = source.next_line(PROMPT)? {
        let command = match session::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                report_error(&e);
                continue;
            }
        };
        if command == SessionCommand::Quit {
            break;
        }
        run_session_command(ctx, &mut api, command);
    }
    source.finish();
    Ok(())
}

/// Where session lines come from: a line editor with history on a terminal, plain
/// stdin otherwise.
enum LineSource {
    Editor {
        editor: DefaultEditor,
        history: PathBuf,
    },
    Piped(io::Lines<io::StdinLock<'static>>),
}

impl LineSource {
    fn editor(config_dir: &Path) -> Result<Self> {
        let mut editor = DefaultEditor::new().map_err(readline_error)?;
        let history = config_dir.join(HISTORY_FILENAME);
        if let Err(e) = editor.load_history(&history) {
            debug!(error = %e, "no session history loaded");
        }
        Ok(LineSource::Editor { editor, history })
    }

    /// The next line, or `None` at end of input. Ctrl-C abandons the current line.
    fn next_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self {
            LineSource::Editor { editor, .. } => match editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        if let Err(e) = editor.add_history_entry(line.as_str()) {
                            debug!(error = %e, "history entry dropped");
                        }
                    }
                    Ok(Some(line))
                }
                Err(ReadlineError::Interrupted) => Ok(Some(String::new())),
                Err(ReadlineError::Eof) => Ok(None),
                Err(e) => Err(readline_error(e)),
            },
            LineSource::Piped(lines) => Ok(lines.next().transpose()?),
        }
    }

    fn finish(&mut self) {
        if let LineSource::Editor { editor, history } = self {
            let saved = history
                .parent()
                .map_or(Ok(()), fs::create_dir_all)
                .map_err(ReadlineError::Io)
                .and_then(|()| editor.save_history(history.as_path()));
            if let Err(e) = saved {
                warn!(error = %e, path = %history.display(), "could not save session history");
            }
        }
    }
}

fn readline_error(error: ReadlineError) -> QuoteError {
    match error {
        ReadlineError::Io(e) => QuoteError::Io(e),
        other => QuoteError::Command(other.to_string()),
    }
}

fn run_session_command(ctx: &AppContext, api: &mut QuoteApi, command: SessionCommand) {
    match command {
        SessionCommand::Edit(edit) => {
            let result = api.edit(edit);
            print_or_report(api, result);
        }
        SessionCommand::EditView(section) => {
            let result = api.edit_section(section);
            print_or_report(api, result);
        }
        SessionCommand::Preview => {
            let result = api.preview();
            print_or_report(api, result);
        }
        SessionCommand::Show => print_or_report(api, api.show()),
        SessionCommand::Dump => print_or_report(api, api.dump()),
        SessionCommand::Print { to } => {
            let host: Box<dyn PrintHost> = match to {
                Some(path) => Box::new(FileHost::new(path)),
                None => Box::new(BrowserHost::new(
                    ctx.config.spool_dir.clone(),
                    ctx.config.print_command.clone(),
                )),
            };
            print_or_report(api, api.print(host.as_ref()));
        }
        SessionCommand::Login(credentials) => {
            let result = api.login(&credentials);
            print_messages(api.renderer(), &result.messages);
            if api.is_unlocked() {
                print_or_report(api, api.show());
            }
        }
        SessionCommand::Help => print!("{}", HELP),
        SessionCommand::Quit => {}
    }
}

/// Asks for credentials until the gate opens. Returns `false` when input ends first.
fn prompt_login(api: &mut QuoteApi, source: &mut LineSource) -> Result<bool> {
    while !api.is_unlocked() {
        let Some(username) = source.next_line("Username: ")? else {
            return Ok(false);
        };
        let password = rpassword::prompt_password("Password: ")?;

        let result = api.login(&Credentials::new(username.trim(), password));
        print_messages(api.renderer(), &result.messages);
    }
    Ok(true)
}

fn print_or_report(api: &QuoteApi, result: Result<quotegen::commands::CmdResult>) {
    match result {
        Ok(result) => print_result(api.renderer(), &result),
        Err(e) => report_error(&e),
    }
}

fn report_error(error: &QuoteError) {
    eprintln!("Error: {}", error);
}
