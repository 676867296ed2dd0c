use async_trait::async_trait;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, ErrorKind, Result};
use crate::event::Event;
use crate::provider::{default_provider, EventSource};

/// Event source backed by a TOML file of `[[events]]` records, standing in
/// for a remote backend. The whole file is re-read on every fetch and
/// filtered down to the requested month.
pub struct TomlEventSource {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct EventFile {
    #[serde(default)]
    events: Vec<Event>,
}

impl TomlEventSource {
    pub fn new(path: &Path) -> Self {
        TomlEventSource {
            path: PathBuf::from(path),
        }
    }
}

fn parse_events(raw: &str) -> Result<Vec<Event>> {
    let file: EventFile = toml::from_str(raw).map_err(|err| {
        Error::new(
            ErrorKind::EventFetchFailed,
            format!("invalid event file: {}", err).as_str(),
        )
    })?;

    Ok(file.events)
}

#[async_trait]
impl EventSource for TomlEventSource {
    async fn fetch_events(&self, month: u32, year: i32) -> Result<Vec<Event>> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            Error::new(
                ErrorKind::EventFetchFailed,
                format!("could not read {}: {}", self.path.display(), err).as_str(),
            )
        })?;

        let provider = default_provider();
        let events = parse_events(&raw)?
            .into_iter()
            .filter(|event| {
                let (y, m, _) = provider.components(&event.start);
                y == year && m == month
            })
            .collect();

        Ok(events)
    }
}
