//! Chapter navigation state machine
//!
//! The reader is either on the cover or on chapter `i` (`0 <= i < N`).
//! Every user action is an [`Event`]; [`reduce`] maps a state and an event
//! to the next state plus a "scroll to top" signal for the renderer. The
//! function is pure, so navigation is testable without any UI.
//!
//! Out-of-range moves and unknown chapter ids are absorbed as no-ops: they
//! correspond to controls the renderer disables, never to errors.

use crate::content_model::{Book, Chapter};

/// Top-level screen being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Cover,
    /// Chapter at this reading-order position
    Chapter(usize),
}

/// Direction of a previous/next move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// A user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Leave the cover for the first chapter
    StartReading,
    /// Jump to the chapter with this id; closes the sidebar
    Select(String),
    /// Move to the neighbouring chapter
    Navigate(Direction),
    /// Flip the sidebar overlay
    ToggleSidebar,
    /// Dismiss the sidebar overlay without navigating
    CloseSidebar,
}

/// Complete navigation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavState {
    pub screen: Screen,
    pub sidebar_open: bool,
}

impl NavState {
    /// Initial state: cover shown, sidebar closed
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the current chapter; the cover points at the first one
    pub fn chapter_index(&self) -> usize {
        match self.screen {
            Screen::Cover => 0,
            Screen::Chapter(index) => index,
        }
    }

    /// Whether a previous chapter exists
    pub fn has_prev(&self) -> bool {
        self.chapter_index() > 0
    }

    /// Whether a next chapter exists in a book of `chapter_count` chapters
    pub fn has_next(&self, chapter_count: usize) -> bool {
        self.chapter_index() + 1 < chapter_count
    }
}

/// Result of applying one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub state: NavState,
    /// The renderer should scroll the page back to the top
    pub scroll_to_top: bool,
}

impl Transition {
    fn scroll(state: NavState) -> Self {
        Self {
            state,
            scroll_to_top: true,
        }
    }

    fn stay(state: NavState) -> Self {
        Self {
            state,
            scroll_to_top: false,
        }
    }
}

/// Apply an event to a navigation state
///
/// # Parameters
/// * `book` - The validated book being read
/// * `state` - Current state
/// * `event` - User action
///
/// # Returns
/// * `Transition` - The next state; equal to `state` when the event is a no-op
pub fn reduce(book: &Book, state: &NavState, event: &Event) -> Transition {
    match event {
        Event::StartReading => Transition::scroll(NavState {
            screen: Screen::Chapter(0),
            ..*state
        }),

        Event::Select(id) => match book.position(id) {
            Some(index) => Transition::scroll(NavState {
                screen: Screen::Chapter(index),
                sidebar_open: false,
            }),
            None => {
                log::warn!("Ignoring selection of unknown chapter '{}'", id);
                Transition::stay(*state)
            }
        },

        Event::Navigate(direction) => step(book.len(), state, *direction),

        Event::ToggleSidebar => Transition::stay(NavState {
            sidebar_open: !state.sidebar_open,
            ..*state
        }),

        Event::CloseSidebar => Transition::stay(NavState {
            sidebar_open: false,
            ..*state
        }),
    }
}

/// Move one chapter back or forward, if that chapter exists
fn step(chapter_count: usize, state: &NavState, direction: Direction) -> Transition {
    let Screen::Chapter(index) = state.screen else {
        log::debug!("Ignoring {:?} on the cover", direction);
        return Transition::stay(*state);
    };

    let target = match direction {
        Direction::Prev => index.checked_sub(1),
        Direction::Next => Some(index + 1).filter(|&next| next < chapter_count),
    };

    match target {
        Some(target) => Transition::scroll(NavState {
            screen: Screen::Chapter(target),
            ..*state
        }),
        None => {
            log::debug!("Ignoring {:?} at chapter {}", direction, index + 1);
            Transition::stay(*state)
        }
    }
}

/// A reading session over one book
///
/// Owns the navigation state and borrows the book it navigates.
#[derive(Debug, Clone)]
pub struct Navigator<'a> {
    book: &'a Book,
    state: NavState,
}

impl<'a> Navigator<'a> {
    /// Start a session on the cover
    pub fn new(book: &'a Book) -> Self {
        Self {
            book,
            state: NavState::new(),
        }
    }

    /// Apply an event and keep the resulting state
    pub fn dispatch(&mut self, event: &Event) -> Transition {
        let transition = reduce(self.book, &self.state, event);
        self.state = transition.state;
        transition
    }

    /// `Cover → Chapter(0)`
    pub fn start_reading(&mut self) -> Transition {
        self.dispatch(&Event::StartReading)
    }

    /// Jump to a chapter by id; unknown ids leave the state unchanged
    pub fn select_chapter(&mut self, id: &str) -> Transition {
        self.dispatch(&Event::Select(id.to_string()))
    }

    /// Move to the previous or next chapter when one exists
    pub fn navigate(&mut self, direction: Direction) -> Transition {
        self.dispatch(&Event::Navigate(direction))
    }

    /// Flip the sidebar overlay
    pub fn toggle_sidebar(&mut self) -> Transition {
        self.dispatch(&Event::ToggleSidebar)
    }

    /// Dismiss the sidebar overlay
    pub fn close_sidebar(&mut self) -> Transition {
        self.dispatch(&Event::CloseSidebar)
    }

    /// The book being read
    pub fn book(&self) -> &'a Book {
        self.book
    }

    /// Current navigation state
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Current screen
    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    /// Whether the sidebar overlay is open
    pub fn sidebar_open(&self) -> bool {
        self.state.sidebar_open
    }

    /// The current chapter (the first one while on the cover)
    pub fn current_chapter(&self) -> &'a Chapter {
        // Indices only come from bounds-checked transitions
        &self.book.chapters()[self.state.chapter_index()]
    }

    /// Id of the current chapter
    pub fn current_chapter_id(&self) -> &'a str {
        &self.current_chapter().id
    }

    /// Whether the "previous" control is enabled
    pub fn has_prev(&self) -> bool {
        self.state.has_prev()
    }

    /// Whether the "next" control is enabled
    pub fn has_next(&self) -> bool {
        self.state.has_next(self.book.len())
    }
}
