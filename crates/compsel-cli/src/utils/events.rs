use compsel::engine::events::{EventCallback, SelectionEvent};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Routes engine events to the log and keeps a tally the commands can print.
#[derive(Clone, Default)]
pub struct CliEventHandler {
    tally: Arc<Mutex<EventTally>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventTally {
    pub selected: usize,
    pub deselected: usize,
    pub rolled_back: usize,
    pub discarded_queries: usize,
}

impl CliEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_callback(&self) -> EventCallback<'static> {
        let tally = self.tally.clone();

        Box::new(move |event: SelectionEvent| {
            let Ok(mut tally) = tally.lock() else {
                warn!("Event tally mutex was poisoned. Dropping event.");
                return;
            };

            match event {
                SelectionEvent::QueryApplied {
                    generation,
                    query,
                    matches,
                } => {
                    debug!("Query #{} '{}' matched {} compound(s).", generation, query, matches);
                }
                SelectionEvent::QueryDiscarded { generation, latest } => {
                    tally.discarded_queries += 1;
                    debug!("Query #{} discarded, #{} is current.", generation, latest);
                }
                SelectionEvent::CompoundSelected { name, dependents } => {
                    tally.selected += 1;
                    info!("Selected '{}' in {} phase(s).", name, dependents);
                }
                SelectionEvent::CompoundDeselected { name, dependents } => {
                    tally.deselected += 1;
                    info!("Deselected '{}' from {} phase(s).", name, dependents);
                }
                SelectionEvent::RolledBack { name, failed_at } => {
                    tally.rolled_back += 1;
                    warn!("Toggle of '{}' rolled back after failing at {}.", name, failed_at);
                }
            }
        })
    }

    pub fn tally(&self) -> EventTally {
        self.tally.lock().map(|t| *t).unwrap_or_default()
    }
}
