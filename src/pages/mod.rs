pub mod resume_maker;
