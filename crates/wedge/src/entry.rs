use derive_more::{AsRef, Deref, Display, From, Into};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

pub type Action = Box<dyn FnMut() -> anyhow::Result<()>>;

/// One slice of the menu. Immutable once added.
pub struct MenuEntry {
    label: Label,
    action: Action,
}

impl MenuEntry {
    pub fn new(label: impl Into<Label>, action: impl FnMut() -> anyhow::Result<()> + 'static) -> Self {
        Self {
            label: label.into(),
            action: Box::new(action),
        }
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn trigger(&mut self) -> anyhow::Result<()> {
        (self.action)()
    }
}

impl fmt::Debug for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuEntry")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}
