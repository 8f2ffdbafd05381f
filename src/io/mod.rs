pub mod discover;
pub mod measurement;
pub mod tsv;
