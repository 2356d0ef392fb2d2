//! Menu contents handed to the host for rendering.

/// One line of a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    /// A numbered option. Non-selectable options act as headers.
    Option {
        choice: u8,
        text: String,
        selectable: bool,
    },
    Text(String),
}

/// A simple menu: an ordered list of items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Menu {
    pub title: Option<String>,
    pub items: Vec<MenuItem>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            items: Vec::new(),
        }
    }

    pub fn header(&mut self, choice: u8, text: impl Into<String>) {
        self.items.push(MenuItem::Option {
            choice,
            text: text.into(),
            selectable: false,
        });
    }

    pub fn option(&mut self, choice: u8, text: impl Into<String>) {
        self.items.push(MenuItem::Option {
            choice,
            text: text.into(),
            selectable: true,
        });
    }

    pub fn text(&mut self, text: impl Into<String>) {
        self.items.push(MenuItem::Text(text.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Choices that can be picked.
    pub fn selectable_choices(&self) -> Vec<u8> {
        self.items
            .iter()
            .filter_map(|item| match item {
                MenuItem::Option {
                    choice,
                    selectable: true,
                    ..
                } => Some(*choice),
                _ => None,
            })
            .collect()
    }
}
