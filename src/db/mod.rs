// src/db/mod.rs

pub mod request_repo;
pub use request_repo::RequestRepository;
pub mod equipment_repo;
pub use equipment_repo::EquipmentRepository;
pub mod profile_repo;
pub use profile_repo::ProfileRepository;
pub mod team_repo;
pub use team_repo::TeamRepository;
pub mod comment_repo;
pub use comment_repo::CommentRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
