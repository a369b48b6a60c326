pub mod ask;
pub mod course;
pub mod embeds;
pub mod lesson;
pub mod status;
pub mod style;
pub mod weak;
