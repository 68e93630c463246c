use crate::core::models::compound::DependentLabel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    QueryApplied {
        generation: u64,
        query: String,
        matches: usize,
    },
    QueryDiscarded {
        generation: u64,
        latest: u64,
    },

    CompoundSelected {
        name: String,
        dependents: usize,
    },
    CompoundDeselected {
        name: String,
        dependents: usize,
    },
    RolledBack {
        name: String,
        failed_at: DependentLabel,
    },
}

pub type EventCallback<'a> = Box<dyn Fn(SelectionEvent) + Send + Sync + 'a>;

#[derive(Default)]
pub struct EventReporter<'a> {
    callback: Option<EventCallback<'a>>,
}

impl<'a> EventReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: EventCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: SelectionEvent) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
