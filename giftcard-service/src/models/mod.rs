mod card;

pub use card::{Card, Transaction};
