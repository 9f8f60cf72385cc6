use leptos::prelude::*;

/// Single global notification slot. A new message replaces the current one.
#[derive(Clone, Copy)]
pub(crate) struct Toaster {
    pub message: RwSignal<Option<String>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            message: RwSignal::new(None),
        }
    }

    pub fn show(&self, message: impl Into<String>) {
        // try_set: errors can arrive after the owning scope is gone.
        let _ = self.message.try_set(Some(message.into()));
    }

    pub fn dismiss(&self) {
        self.message.set(None);
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}
