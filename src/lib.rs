pub mod charset;
pub mod clipboard;
pub mod error;
pub mod generator;
pub mod keystream;
pub mod session;
pub mod strength;

pub use charset::CharacterClass;
pub use clipboard::{Clipboard, Osc52Clipboard};
pub use error::{CommandError, OptionsError};
pub use generator::{GenerationOptions, generate};
pub use keystream::Keystream;
pub use session::{Event, Session};
pub use strength::{Strength, score};
