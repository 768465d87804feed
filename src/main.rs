//! Persisted Reducer demo host
//!
//! Drives the example `Settings` store: from the command line natively,
//! and from the page start hook in the browser.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_host {
    use persisted_reducer::settings::{Settings, SettingsAction, reduce};
    use persisted_reducer::{PersistOptions, PersistentReducerStore, Result};

    fn start() -> Result<()> {
        let options = PersistOptions::new().with_fields(Settings::PERSISTED_FIELDS);
        let mut store = PersistentReducerStore::with_local_storage(
            reduce,
            Settings::default(),
            Settings::STORAGE_KEY,
            options,
        )?;

        store.dispatcher().dispatch(SettingsAction::Visit);
        store.commit()?;

        let state = store.state();
        log::info!(
            "Visit #{} (theme: {}, font: {}pt)",
            state.visits,
            state.theme.as_str(),
            state.font_size
        );
        Ok(())
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Persisted Reducer starting...");
        if let Err(e) = start() {
            log::error!("Settings store failed: {}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    web_host::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod native_host {
    use std::path::PathBuf;

    use clap::Parser;
    use persisted_reducer::settings::{Settings, SettingsAction, reduce};
    use persisted_reducer::{FileStorage, PersistOptions, PersistentReducerStore, Result};

    #[derive(Parser, Debug)]
    #[command(
        name = "persisted-reducer",
        about = "Apply settings actions and persist them to a JSON file",
        after_help = "actions: theme=light|system|dark  font+  font-  sidebar  open=NAME  note=TEXT  visit  reset"
    )]
    pub struct Cli {
        /// Storage file holding every key
        #[arg(
            short,
            long,
            env = "PERSISTED_REDUCER_FILE",
            default_value = "persisted-reducer.json"
        )]
        pub file: PathBuf,

        /// Actions applied in order before the commit
        #[arg(value_parser = parse_action)]
        pub actions: Vec<SettingsAction>,
    }

    fn parse_action(token: &str) -> std::result::Result<SettingsAction, String> {
        SettingsAction::parse(token).ok_or_else(|| format!("unknown action '{}'", token))
    }

    pub fn run(cli: Cli) -> Result<Settings> {
        let storage = FileStorage::open(&cli.file)?;
        let options = PersistOptions::new().with_fields(Settings::PERSISTED_FIELDS);
        let mut store = PersistentReducerStore::new(
            reduce,
            Settings::default(),
            Settings::STORAGE_KEY,
            options,
            storage,
        )?;
        log::debug!(
            "Store '{}' persists {:?}",
            store.key(),
            store.options().fields
        );

        let dispatch = store.dispatcher();
        for action in cli.actions {
            dispatch.dispatch(action);
        }
        if store.commit()? {
            log::info!("Settings saved to {}", store.storage().path().display());
        }
        Ok(store.state().clone())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    let cli = native_host::Cli::parse();

    match native_host::run(cli) {
        Ok(settings) => match serde_json::to_string_pretty(&settings) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to print settings: {}", e),
        },
        Err(e) => {
            log::error!("Settings store failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::native_host::Cli;
    use clap::Parser;
    use persisted_reducer::settings::{SettingsAction, Theme};
    use std::path::PathBuf;

    #[test]
    fn test_cli_file_and_actions() {
        let cli = Cli::try_parse_from([
            "persisted-reducer",
            "--file",
            "prefs.json",
            "theme=dark",
            "sidebar",
        ])
        .unwrap();
        assert_eq!(cli.file, PathBuf::from("prefs.json"));
        assert_eq!(
            cli.actions,
            vec![
                SettingsAction::SetTheme(Theme::Dark),
                SettingsAction::ToggleSidebar
            ]
        );
    }

    #[test]
    fn test_cli_rejects_unknown_action() {
        let err = Cli::try_parse_from(["persisted-reducer", "fly"]).unwrap_err();
        assert!(err.to_string().contains("unknown action 'fly'"));
        assert!(Cli::try_parse_from(["persisted-reducer", "--file"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
