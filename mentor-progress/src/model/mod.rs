pub mod profile;
pub mod record;
pub mod style;
