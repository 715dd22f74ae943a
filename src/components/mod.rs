pub mod entry_section;
pub mod notice_banner;
pub mod preview_pane;
pub mod progress_overlay;
pub mod skill_group;
