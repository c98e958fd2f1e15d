//! Browser shell.
//!
//! Wires the `bridge-wasm` page bindings to a shared [`PlayerSession`]. The
//! session lives in an `Rc<RefCell<_>>`; storage pipelines clone the
//! [`SongLibrary`](core_library::SongLibrary) handle, await without holding a
//! borrow, then borrow once to apply the result.

use std::{cell::RefCell, rc::Rc};

use bridge_traits::BridgeError;
use bridge_wasm::{
    build_wasm_bridges, install_panic_hook, read_upload_files, EventListener, PageElements,
    WasmBridgeSet,
};
use core_runtime::{
    logging::{init_logging, LoggingConfig},
    PlayerConfig,
};
use tracing::{debug, error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, EventTarget, HtmlInputElement};

use crate::{
    error::{CoreError, Result},
    session::{PlayerDependencies, PlayerEvent, PlayerSession},
};

type SharedSession = Rc<RefCell<PlayerSession>>;

/// A running browser player.
///
/// Listeners stay registered until the player is dropped or torn down.
pub struct WebPlayer {
    session: SharedSession,
    listeners: Vec<EventListener>,
}

impl WebPlayer {
    pub fn session(&self) -> SharedSession {
        Rc::clone(&self.session)
    }

    /// Detach every listener, stop playback and revoke all playable URLs.
    pub fn teardown(mut self) -> Result<()> {
        self.listeners.clear();
        let result = self.session.borrow_mut().teardown();
        result
    }
}

/// Bind a player to the page described by `config`.
///
/// Fails when a required element is missing. An unavailable song store only
/// disables persistence.
pub async fn bootstrap_wasm(config: PlayerConfig) -> Result<WebPlayer> {
    config.validate()?;

    let WasmBridgeSet {
        page,
        store,
        media,
        urls,
        view,
    } = build_wasm_bridges(&config)
        .await
        .map_err(|e| CoreError::InitializationFailed(e.to_string()))?;

    let deps = PlayerDependencies::new(Box::new(media), Box::new(urls), Box::new(view))
        .with_opened_store(store);
    let session: SharedSession = Rc::new(RefCell::new(PlayerSession::new(config, deps)));

    let library = session.borrow().library();
    let records = match library.load_all().await {
        Ok(records) => records,
        Err(err) => {
            error!(error = %err, "Failed to load persisted songs");
            Vec::new()
        }
    };
    session.borrow_mut().apply_reload(&records, false)?;

    let listeners = wire_listeners(&page, &session)
        .map_err(|e| CoreError::InitializationFailed(e.to_string()))?;
    debug!(listeners = listeners.len(), "Browser player ready");

    Ok(WebPlayer { session, listeners })
}

fn dispatch(session: &SharedSession, event: PlayerEvent) {
    match session.try_borrow_mut() {
        Ok(mut session) => {
            if let Err(err) = session.dispatch(event) {
                warn!(?event, error = %err, "Player event failed");
            }
        }
        Err(_) => warn!(?event, "Player busy; event dropped"),
    }
}

async fn upload_selection(session: &SharedSession, input: &HtmlInputElement) -> Result<()> {
    let files = read_upload_files(input).await.map_err(BridgeError::from)?;
    if files.is_empty() {
        return Ok(());
    }

    let library = session.borrow().library();
    let records = library.replace_and_reload(files).await?;
    session.borrow_mut().apply_reload(&records, true)
}

async fn clear_collection(session: &SharedSession) -> Result<()> {
    let library = session.borrow().library();
    library.clear_all().await?;
    session.borrow_mut().apply_cleared()
}

fn on_intent(
    target: &EventTarget,
    event_type: &'static str,
    session: &SharedSession,
    intent: PlayerEvent,
) -> bridge_wasm::WasmResult<EventListener> {
    let session = Rc::clone(session);
    EventListener::new(target, event_type, move |_| dispatch(&session, intent))
}

fn wire_listeners(
    page: &PageElements,
    session: &SharedSession,
) -> bridge_wasm::WasmResult<Vec<EventListener>> {
    let mut listeners = vec![
        on_intent(page.prev_button.as_ref(), "click", session, PlayerEvent::Previous)?,
        on_intent(
            page.play_pause_button.as_ref(),
            "click",
            session,
            PlayerEvent::TogglePlayPause,
        )?,
        on_intent(page.next_button.as_ref(), "click", session, PlayerEvent::Next)?,
        on_intent(page.audio.as_ref(), "ended", session, PlayerEvent::Ended)?,
    ];

    {
        let session = Rc::clone(session);
        let input = page.file_input.clone();
        listeners.push(EventListener::new(
            page.file_input.as_ref(),
            "change",
            move |_| {
                let session = Rc::clone(&session);
                let input = input.clone();
                spawn_local(async move {
                    if let Err(err) = upload_selection(&session, &input).await {
                        error!(error = %err, "Upload failed");
                    }
                });
            },
        )?);
    }

    {
        let session = Rc::clone(session);
        listeners.push(EventListener::new(
            page.clear_button.as_ref(),
            "click",
            move |_| {
                let session = Rc::clone(&session);
                spawn_local(async move {
                    if let Err(err) = clear_collection(&session).await {
                        error!(error = %err, "Clearing the playlist failed");
                    }
                });
            },
        )?);
    }

    {
        let session = Rc::clone(session);
        listeners.push(EventListener::new(
            page.playlist.as_ref(),
            "click",
            move |event: Event| {
                if let Some(index) = PageElements::clicked_entry(&event) {
                    dispatch(&session, PlayerEvent::Select(index));
                }
            },
        )?);
    }

    {
        let session = Rc::clone(session);
        let audio = page.audio.clone();
        listeners.push(EventListener::new(
            page.audio.as_ref(),
            "loadedmetadata",
            move |_| dispatch(&session, PlayerEvent::MetadataLoaded(audio.duration())),
        )?);
    }

    {
        let session = Rc::clone(session);
        let audio = page.audio.clone();
        listeners.push(EventListener::new(
            page.audio.as_ref(),
            "timeupdate",
            move |_| dispatch(&session, PlayerEvent::TimeUpdate(audio.current_time())),
        )?);
    }

    {
        let session = Rc::clone(session);
        let page = page.clone();
        listeners.push(EventListener::new(
            page.progress_bar.as_ref(),
            "input",
            move |_| dispatch(&session, PlayerEvent::Seek(page.progress_value())),
        )?);
    }

    Ok(listeners)
}

thread_local! {
    static PLAYER: RefCell<Option<WebPlayer>> = const { RefCell::new(None) };
}

/// Start the player on the current page.
///
/// `config_json` may override any [`PlayerConfig`] field; omitted fields keep
/// their defaults. Calling it again replaces the running player.
#[wasm_bindgen(js_name = startPlayer)]
pub async fn start_player(config_json: Option<String>) -> std::result::Result<(), JsValue> {
    install_panic_hook();
    if let Err(err) = init_logging(LoggingConfig::default()) {
        debug!(error = %err, "Logging already initialized");
    }

    let config = match config_json {
        Some(json) => PlayerConfig::from_json(&json),
        None => Ok(PlayerConfig::default()),
    }
    .map_err(|e| JsValue::from_str(&e.to_string()))?;

    stop_player();
    let player = bootstrap_wasm(config)
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    PLAYER.with(|slot| *slot.borrow_mut() = Some(player));
    Ok(())
}

/// Tear down the running player, if any.
#[wasm_bindgen(js_name = stopPlayer)]
pub fn stop_player() {
    if let Some(player) = PLAYER.with(|slot| slot.borrow_mut().take()) {
        if let Err(err) = player.teardown() {
            warn!(error = %err, "Player teardown failed");
        }
    }
}
