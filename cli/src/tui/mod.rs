// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

mod dispatcher;
mod editor;
mod event_store;

use std::{cell::RefCell, error::Error, rc::Rc};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use rota_core::{Location, Rota, SaveOutcome, Subject, Teacher};

use crate::tui::dispatcher::Dispatcher;
use crate::tui::editor::EventEditor;
use crate::tui::event_store::EventStore;

/// The predefined rows the pickers offer, loaded once per editor session.
pub struct Catalog {
    pub subjects: Vec<Subject>,
    pub teachers: Vec<Teacher>,
    pub locations: Vec<Location>,
}

async fn load_catalog(rota: &Rota) -> Result<Catalog, Box<dyn Error>> {
    Ok(Catalog {
        subjects: rota.list_subjects().await?,
        teachers: rota.list_teachers().await?,
        locations: rota.list_locations().await?,
    })
}

/// Run the entry form and persist the draft when submitted.
pub async fn add_event(rota: &Rota) -> Result<(), Box<dyn Error>> {
    let catalog = load_catalog(rota).await?;
    let mut store = EventStore::new_entry();
    let mut error = None;

    loop {
        store = run_event_editor(store, &catalog, "Add event", false, error.take())?;
        if !store.submit {
            println!("Discarded.");
            return Ok(());
        }
        store.submit = false; // rearm for a retry round

        match rota.save_new_event(&store.draft()).await {
            Ok(SaveOutcome::Saved(id)) => {
                println!("Saved event {id}");
                return Ok(());
            }
            Ok(SaveOutcome::Invalid) => {
                error = Some("the entry is incomplete or has invalid hours".to_string());
            }
            Err(e) => {
                tracing::error!("failed to save event: {e}");
                error = Some(e.to_string());
            }
        }
    }
}

/// Run the edit form for an existing event. Handles saving edits and the
/// in-form remove flow.
pub async fn edit_event(rota: &Rota, id: i64) -> Result<(), Box<dyn Error>> {
    let full = rota.get_full_event(id).await?;
    let catalog = load_catalog(rota).await?;
    let mut store = EventStore::new_edit(&full);
    let mut error = None;

    let title = format!("Edit event {id}");
    loop {
        store = run_event_editor(store, &catalog, &title, true, error.take())?;
        if store.remove {
            rota.delete_event(id).await?;
            println!("Removed event {id}");
            return Ok(());
        }
        if !store.submit {
            println!("No changes saved.");
            return Ok(());
        }
        store.submit = false;

        match rota.save_event_edits(&store.draft()).await {
            Ok(SaveOutcome::Saved(id)) => {
                println!("Saved event {id}");
                return Ok(());
            }
            Ok(SaveOutcome::Invalid) => {
                error = Some("the entry is incomplete or has invalid hours".to_string());
            }
            Err(e) => {
                tracing::error!("failed to save event edits: {e}");
                error = Some(e.to_string());
            }
        }
    }
}

fn run_event_editor(
    store: EventStore,
    catalog: &Catalog,
    title: &str,
    allow_remove: bool,
    error: Option<String>,
) -> Result<EventStore, Box<dyn Error>> {
    let store = Rc::new(RefCell::new(store));

    let mut terminal = ratatui::init();
    let result = {
        let mut dispatcher = Dispatcher::new();
        EventStore::register_to(store.clone(), &mut dispatcher);
        let mut view = EventEditor::new(title, catalog, allow_remove);
        if let Some(message) = error {
            view.show_store_error(message);
        }

        loop {
            if let Err(e) = terminal.draw(|frame| view.render(&store, frame)) {
                break Err(e.into());
            }

            match event::read() {
                Err(e) => break Err(Box::<dyn Error>::from(e)),
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if view.on_key(&mut dispatcher, &store, key.code).is_some() {
                        break Ok(());
                    }
                }
                Ok(_) => {} // redraw on resize and other events
            }
        }
    }; // release dispatcher and view here to drop their store references
    ratatui::restore();
    result?;

    let store = Rc::try_unwrap(store)
        .map_err(|_| "Store still has references")?
        .into_inner();
    Ok(store)
}
