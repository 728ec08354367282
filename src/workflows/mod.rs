pub mod episode;
pub mod pairing;
pub mod renamer;
