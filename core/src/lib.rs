// SPDX-FileCopyrightText: 2026 Rota contributors
//
// SPDX-License-Identifier: Apache-2.0

mod catalog;
mod config;
mod draft;
mod editor;
mod event;
mod feed;
mod localdb;
mod rota;

pub use crate::catalog::{Location, Subject, Teacher};
pub use crate::config::{APP_NAME, Config};
pub use crate::draft::EventDraft;
pub use crate::editor::EditorState;
pub use crate::event::{
    EARLIEST_HOUR, FullScheduleEvent, LATEST_HOUR, Obligation, ScheduleEvent, Weekday,
};
pub use crate::feed::ChangeFeed;
pub use crate::localdb::LocalDb;
pub use crate::rota::{Rota, SaveOutcome};
