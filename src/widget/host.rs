//! Boundaries between the widget and the contexts it talks to.
//!
//! The opener form and the popup window are separate contexts. The widget
//! only reaches them through these traits, with explicit requests on named
//! fields, so a front end can place them anywhere.

use crate::popup::PopupDocument;
use std::fmt;

/// Features requested when opening the popup window.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct WindowFeatures {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for WindowFeatures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "popup=yes,width={},height={}", self.width, self.height)
    }
}

/// The document that hosts the widget.
///
pub trait Opener {
    /// Current url of the opener document.
    fn document_url(&self) -> String;

    /// Read the value of a named field of the opener form.
    fn field_value(&self, form: Option<&str>, field: &str) -> Option<String>;

    /// Write a named field and notify the opener of the change. Returns
    /// false when the field does not exist.
    fn set_field_value(&mut self, form: Option<&str>, field: &str, value: &str) -> bool;

    fn alert(&mut self, message: &str);

    /// Run the original action of the wrapped link.
    fn follow_link(&mut self, action: &str);
}

/// Handle of an open popup window. The user may close the window at any
/// time, so every call must tolerate a closed window.
///
pub trait PopupWindow {
    fn is_closed(&self) -> bool;
    fn focus(&mut self);
    fn close(&mut self);
    /// Show the current document content.
    fn present(&mut self, document: &PopupDocument);
    fn alert(&mut self, message: &str);
}

/// Something that can open popup windows.
///
pub trait WindowHost {
    type Window: PopupWindow;

    /// Open a new window, `None` when the host refuses.
    fn open(&mut self, features: &WindowFeatures) -> Option<Self::Window>;
}
