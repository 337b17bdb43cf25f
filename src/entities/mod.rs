//! Database entities, one module per table.

pub mod asset_handover;
pub mod building;
pub mod campus;
pub mod floor;
pub mod handover_approval;
pub mod handover_asset;
pub mod it_asset;
pub mod joiner_leaver_checklist_item;
pub mod joiner_leaver_process;
pub mod leave_application;
pub mod meeting;
pub mod meeting_action_item;
pub mod meeting_attendee;
pub mod notification;
pub mod otp_code;
pub mod room;
pub mod system_log;
pub mod team_attendance;
pub mod training_plan;
pub mod user;
