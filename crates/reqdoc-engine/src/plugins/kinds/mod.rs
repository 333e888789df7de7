pub mod text;
pub mod use_case;

pub use text::TextPlugin;
pub use use_case::UseCasePlugin;
