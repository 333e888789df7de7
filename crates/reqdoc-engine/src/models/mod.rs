pub mod block;
pub mod use_case;

pub use block::{Block, BlockContent, BlockId, ContentKind};
pub use use_case::{UseCase, UseCaseField};
