//! Media selection boundary.
//!
//! The editing surface does not browse assets itself. It asks a
//! [`MediaPicker`] (the host's asset library dialog) for a URL and writes the
//! answer into the widget config.

use pagekit_common::ConfigPath;

pub trait MediaPicker {
    /// Open the picker for the field at `field_path`.
    ///
    /// Returns the chosen asset URL, or `None` when the user cancelled.
    fn open_picker(&mut self, field_path: &ConfigPath) -> Option<String>;
}

impl<F> MediaPicker for F
where
    F: FnMut(&ConfigPath) -> Option<String>,
{
    fn open_picker(&mut self, field_path: &ConfigPath) -> Option<String> {
        self(field_path)
    }
}
