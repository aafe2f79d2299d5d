use std::io;

use chat_agent::app::{ChatView, SendController};
use chat_agent::config::ChatConfig;
use chat_agent::providers;
use chat_agent::term::{enter_bindings, CommandHelper, TerminalView, PROMPT};
use chat_widget::{init_logging, terminal_columns, EnvConfig, TranscriptOptions};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use session_store::SessionIdStore;

fn main() -> io::Result<()> {
    let env_config = EnvConfig::from_env();
    init_logging(&env_config)?;

    let cwd = std::env::current_dir()?;
    let config = ChatConfig::from_env(&cwd);

    let mut store = SessionIdStore::open(&config.store_path);
    let session_id = store.get_or_create_session_id();

    let provider = providers::provider_from_config(&config).map_err(io::Error::other)?;
    let profile = provider.profile();
    tracing::debug!(
        provider = %profile.provider_id,
        target = %profile.target,
        session_id = %session_id,
        persistent = store.is_persistent(),
        "chat client starting"
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match runtime.block_on(provider.health()) {
        Ok(status) => tracing::debug!(status = %status, "orchestrator health check"),
        Err(error) => tracing::debug!(error = %error, "orchestrator health check failed"),
    }

    let mut controller = SendController::new(provider, session_id)
        .with_session_persistence(store.is_persistent())
        .with_welcome_message(config.welcome_message.clone())
        .with_suggested_queries(config.suggested_queries.clone());

    let color = !env_config.no_color;
    let options = TranscriptOptions {
        color,
        ..TranscriptOptions::default()
    }
    .with_width(terminal_columns());
    let mut view = TerminalView::new(io::stdout(), options);

    let mut editor: Editor<CommandHelper, DefaultHistory> =
        Editor::new().map_err(io::Error::other)?;
    editor.set_helper(Some(CommandHelper::new(color)));
    for (key, cmd) in enter_bindings() {
        editor.bind_sequence(key, cmd);
    }

    controller.start(&mut view);

    while !controller.should_exit() && !view.stop_requested() {
        if !view.input_enabled() {
            tracing::warn!("input left disabled after an exchange; stopping");
            break;
        }

        let readline = match view.take_pending_input() {
            Some(initial) => editor.readline_with_initial(PROMPT, (initial.as_str(), "")),
            None => editor.readline(PROMPT),
        };

        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(error) => return Err(io::Error::other(error)),
        };

        view.refresh_width();
        view.erase_echoed_input(&line);
        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }

        runtime.block_on(controller.on_submit(&line, &mut view));
    }

    view.hide_loading();
    Ok(())
}
