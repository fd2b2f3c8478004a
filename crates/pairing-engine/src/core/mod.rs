pub use self::{card::*, deck::*, section::*, word::*};

mod card;
mod deck;
mod section;
mod word;
