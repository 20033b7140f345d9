//! # TUI Components
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (top status line)
//! ├── message.rs       (one chat bubble + typing indicator)
//! ├── message_list.rs  (scrollable chat box view)
//! └── input_box.rs     (question field)
//! ```
//!
//! Stateless components (`TitleBar`, `Message`) are built fresh each frame
//! from props. Stateful ones (`InputBox`, `MessageListState`) live in
//! `TuiState` and also implement `EventHandler`.

pub mod input_box;
pub mod message;
pub mod message_list;
pub mod title_bar;

pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
